use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use kline_core::{Bar, CandleChart, ChartConfig, Interval, TradeLevels};

fn gen_bars(n: usize) -> Vec<Bar> {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let o = 100.0 + (i as f64 * 0.01).sin() * 10.0;
            let c = o + (i as f64 * 0.3).cos();
            let open_time = t0 + Duration::hours(i as i64);
            Bar::try_new(open_time, open_time + Duration::hours(1), o, o.max(c) + 0.4, o.min(c) - 0.4, c, 50.0 + i as f64)
                .unwrap()
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    let bars = gen_bars(500);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    group.bench_function("plain_1200x600", |b| {
        let cfg = ChartConfig::default();
        let chart = CandleChart::new("BTCUSDT", Interval::H1, &bars);
        b.iter(|| -> Result<()> {
            black_box(chart.render_at(&cfg, now)?);
            Ok(())
        });
    });

    group.bench_function("levels_1400x700", |b| {
        let cfg = ChartConfig::for_levels();
        let levels = TradeLevels::new(105.0, 95.0).with_take_profits(110.0, 115.0, 120.0);
        let chart = CandleChart::new("BTCUSDT", Interval::H1, &bars).with_levels(levels);
        b.iter(|| -> Result<()> {
            black_box(chart.render_at(&cfg, now)?);
            Ok(())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
