use chrono::{DateTime, FixedOffset};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use logfmt_codec::{entries, from_str, layout, logfmt_record, to_string, unmarshal_str};
use std::time::Duration;

#[derive(Default, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

logfmt_record!(User {
    id => "id",
    name => "name",
    email => "email",
    active => "active",
});

#[derive(Default, Clone)]
struct Request {
    method: String,
    path: String,
    status: u16,
    tags: Vec<String>,
    upstreams: Vec<u32>,
    latency: Duration,
    budget: Duration,
    at: DateTime<FixedOffset>,
}

logfmt_record!(Request {
    method => "method",
    path => "path",
    status => "status",
    tags => "tags",
    upstreams => "upstreams",
    latency => "latency",
    budget => "budget_ms,ms",
    at => "at,02/Jan/2006:15:04:05 -0700",
});

fn request() -> Request {
    Request {
        method: "GET".to_string(),
        path: "/api/v1/users".to_string(),
        status: 200,
        tags: vec!["edge".to_string(), "cache miss".to_string()],
        upstreams: vec![10, 11, 12],
        latency: Duration::from_micros(12_345),
        budget: Duration::from_millis(250),
        at: DateTime::parse_from_rfc3339("2023-06-01T10:20:30+02:00").unwrap(),
    }
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("encode_simple_record", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_decode_simple(c: &mut Criterion) {
    let line = "id=123 name=Alice email=alice@example.com active=true";

    c.bench_function("decode_simple_record", |b| {
        b.iter(|| from_str::<User>(black_box(line)))
    });
}

fn benchmark_request(c: &mut Criterion) {
    let req = request();
    let line = to_string(&req).unwrap();

    c.bench_function("encode_request_record", |b| {
        b.iter(|| to_string(black_box(&req)))
    });

    c.bench_function("decode_request_record", |b| {
        b.iter(|| {
            let mut target = Request::default();
            unmarshal_str(black_box(&line), &mut target)
        })
    });
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 50, 100, 500].iter() {
        let line = (0..*size)
            .map(|i| format!("key{}=\"value number {}\"", i, i))
            .collect::<Vec<_>>()
            .join(" ");

        group.bench_with_input(BenchmarkId::from_parameter(size), &line, |b, line| {
            b.iter(|| entries(black_box(line)))
        });
    }
    group.finish();
}

fn benchmark_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let t = request().at;
    let access_log = "02/Jan/2006:15:04:05 -0700";
    let formatted = layout::format(&t, access_log);

    group.bench_function("format", |b| {
        b.iter(|| layout::format(black_box(&t), black_box(access_log)))
    });

    group.bench_function("parse", |b| {
        b.iter(|| layout::parse(black_box(&formatted), black_box(access_log)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_decode_simple,
    benchmark_request,
    benchmark_tokenize,
    benchmark_layout
);
criterion_main!(benches);
