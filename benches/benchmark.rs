use std::io;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dogstatsd_reporter::{Registry, ReporterBuilder, Transport};

struct NullTransport;

impl Transport for NullTransport {
    fn count(&self, _name: &str, _delta: i64, _tags: &[String], _rate: f64) -> io::Result<()> {
        Ok(())
    }

    fn gauge(&self, _name: &str, _value: f64, _tags: &[String], _rate: f64) -> io::Result<()> {
        Ok(())
    }
}

pub fn benchmark_register(c: &mut Criterion) {
    c.bench_function("register-existing", |b| {
        let registry = Registry::new();
        let _counter = registry.counter("bench.requests[method:GET]");
        b.iter(|| black_box(registry.counter("bench.requests[method:GET]")));
    });
    c.bench_function("register-new", |b| {
        let registry = Registry::new();
        let mut names = (0u64..).map(|i| format!("bench.requests.{i}"));
        b.iter(|| registry.counter(&names.next().unwrap()));
    });
}

pub fn benchmark_flush(c: &mut Criterion) {
    c.bench_function("flush-100-instruments", |b| {
        let registry: &'static Registry = Box::leak(Box::new(Registry::new()));
        for i in 0..25u64 {
            registry
                .counter(&format!("bench.count.{i}[shard:{i}]"))
                .incr_by(i);
            registry.int_gauge(&format!("bench.gauge.{i}")).set(i as i64);
            registry.histogram(&format!("bench.hist.{i}")).record(i + 1);
            registry
                .timer(&format!("bench.timer.{i}"))
                .record(Duration::from_micros(i + 1));
        }
        let mut reporter = ReporterBuilder::new()
            .percentiles([0.5, 0.95, 0.99])
            .tags(["bench:true"])
            .build_with_transport(Some(registry), Box::new(NullTransport))
            .expect("static configuration is valid");
        b.iter(|| reporter.flush_once().expect("null transport cannot fail"));
    });
}

criterion_group!(benches, benchmark_register, benchmark_flush);
criterion_main!(benches);
