//! 状态判定与结果序列化基准测试

use criterion::{criterion_group, criterion_main, Criterion};
use statusforge_prober::monitor::{CheckRequest, CheckResult, CheckStatus, MonitorSpec, Region};
use statusforge_prober::probe::{classify_content, classify_response, grade_is_valid};
use std::hint::black_box;
use std::time::Duration;

const THRESHOLD: Duration = Duration::from_millis(5000);

/// 状态判定基准测试
fn classification_benchmark(c: &mut Criterion) {
    c.bench_function("classify_response", |b| {
        b.iter(|| {
            for status in [200u16, 301, 404, 503] {
                black_box(classify_response(
                    black_box(status),
                    black_box(Duration::from_millis(150)),
                    THRESHOLD,
                ));
            }
        });
    });

    c.bench_function("classify_content", |b| {
        b.iter(|| {
            let body = black_box("<html><body>Welcome to the shop</body></html>");
            let found = body.contains(black_box("Welcome"));
            black_box(classify_content(200, Duration::from_millis(150), THRESHOLD, found))
        });
    });

    c.bench_function("grade_is_valid", |b| {
        b.iter(|| {
            for grade in [Some("A+"), Some("F"), Some(""), None] {
                black_box(grade_is_valid(black_box(grade)));
            }
        });
    });
}

/// 请求校验与结果序列化基准测试
fn wire_format_benchmark(c: &mut Criterion) {
    c.bench_function("request_validation", |b| {
        b.iter(|| {
            let request = CheckRequest {
                monitor_id: Some("mon_123".to_string()),
                project_id: Some("proj_1".to_string()),
                name: Some("Homepage".to_string()),
                kind: Some("keyword".to_string()),
                url: Some("https://example.com".to_string()),
                keyword: Some("Welcome".to_string()),
                region: Some("EU".to_string()),
            };
            black_box(MonitorSpec::try_from(request))
        });
    });

    c.bench_function("check_result_serialization", |b| {
        b.iter(|| {
            let result = CheckResult::new(Region::Us, CheckStatus::Degraded)
                .with_response_time(Duration::from_millis(5200))
                .with_http_status(200);
            black_box(serde_json::to_string(&result).unwrap())
        });
    });
}

criterion_group!(benches, classification_benchmark, wire_format_benchmark);
criterion_main!(benches);
