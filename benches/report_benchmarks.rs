//! Performance benchmarks for half-month report generation.
//!
//! Covers the pure aggregation path over growing staff sizes and the full
//! HTTP path through the axum router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use punch_hours::api::{AppState, create_router};
use punch_hours::calculation::compute_period_report;
use punch_hours::config::{ConfigLoader, HoursConfig};
use punch_hours::models::{PeriodRequest, RawPunch};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds one entrance/exit pair per employee per day for the first half of
/// January 2024. Every fifth employee works an overnight shift.
fn synthetic_punches(employees: usize) -> Vec<RawPunch> {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).expect("Valid date");
    let mut punches = Vec::with_capacity(employees * 15 * 2);

    for employee in 0..employees {
        let name = format!("Employee {:04}", employee);
        let overnight = employee % 5 == 0;
        for offset in 0..15 {
            let day = first + Duration::days(offset);
            let (start, end_day, end) = if overnight {
                (time(20, 0), day + Duration::days(1), time(5, 30))
            } else {
                (time(7, 45), day, time(17, 10))
            };
            punches.push(RawPunch::new(name.as_str(), day, start, "entrada"));
            punches.push(RawPunch::new(name.as_str(), end_day, end, "salida"));
        }
    }

    punches
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("Valid time")
}

fn request_body(employees: usize) -> String {
    let punches: Vec<serde_json::Value> = synthetic_punches(employees)
        .into_iter()
        .map(|p| {
            serde_json::json!({
                "name": p.employee_name,
                "date": p.date.map(|d| d.format("%d/%m/%Y").to_string()),
                "time": p.time.map(|t| t.format("%H:%M").to_string()),
                "state": p.state_label,
            })
        })
        .collect();

    serde_json::json!({
        "period": { "year": 2024, "month": 1, "half": 1 },
        "punches": punches
    })
    .to_string()
}

/// Benchmark: report computation without HTTP, scaling by staff size.
fn bench_compute_report(c: &mut Criterion) {
    let config = HoursConfig::default();
    let request = PeriodRequest::new(2024, 1, 1);

    let mut group = c.benchmark_group("compute_report");
    for employees in [1usize, 10, 50, 200] {
        let punches = synthetic_punches(employees);
        group.throughput(Throughput::Elements(punches.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employees),
            &punches,
            |b, punches| {
                b.iter(|| compute_period_report(black_box(punches), &request, &config))
            },
        );
    }
    group.finish();
}

/// Benchmark: full `POST /report` round trip through the router.
fn bench_http_report(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    let mut group = c.benchmark_group("http_report");
    group.sample_size(20);
    for employees in [1usize, 50] {
        let body = request_body(employees);
        group.bench_with_input(BenchmarkId::new("employees", employees), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                let response = router
                    .clone()
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/report")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_report, bench_http_report);
criterion_main!(benches);
