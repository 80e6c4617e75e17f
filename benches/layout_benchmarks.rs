use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use levels_chart_wasm::domain::chart::{ChartConfig, ChartInputs, ChartSurface};
use levels_chart_wasm::domain::market_data::PriceCandle;
use levels_chart_wasm::infrastructure::rendering::{RecordingSurface, layout_candles, render_chart};
use std::time::Duration;

/// Hourly candles drifting around 2000 with a bit of noise
fn generate_candles(count: usize) -> Vec<PriceCandle> {
    let mut candles = Vec::with_capacity(count);
    let mut base = 2000.0;

    for i in 0..count {
        let trend = (i as f64 * 0.01).sin() * 15.0;
        let noise = ((i as f64 * 0.5).sin() + (i as f64 * 1.3).cos()) * 2.0;
        let open = base + trend + noise;
        let close = open + (i as f64 * 0.3).cos() * 4.0;
        let high = open.max(close) + (i as f64 * 0.7).sin().abs() * 3.0;
        let low = open.min(close) - (i as f64 * 0.9).cos().abs() * 3.0;

        let day = 1 + (i / 24) % 28;
        let month = 1 + (i / (24 * 28)) % 12;
        let timestamp = format!("2024-{:02}-{:02}T{:02}:00:00", month, day, i % 24);
        candles.push(PriceCandle::new(timestamp, open, high, low, close));
        base = close * 0.999 + open * 0.001;
    }

    candles
}

fn bench_candle_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("candle_layout");
    group.measurement_time(Duration::from_secs(5));
    let config = ChartConfig::default();

    for count in [50, 200, 1000, 5000] {
        let inputs = ChartInputs::new(2000.0).candles(generate_candles(count));
        let chart = ChartSurface::with_inputs(config.clone(), inputs);

        group.bench_with_input(BenchmarkId::new("layout", count), &count, |b, _| {
            b.iter(|| layout_candles(black_box(&chart.inputs().candles), chart.viewport(), &config));
        });

        group.bench_with_input(BenchmarkId::new("viewport_fit", count), &count, |b, _| {
            b.iter(|| black_box(chart.inputs()).price_range());
        });

        group.bench_with_input(BenchmarkId::new("full_repaint", count), &count, |b, _| {
            let mut surface = RecordingSurface::new();
            b.iter(|| render_chart(black_box(&chart), &mut surface));
        });
    }
    group.finish();
}

criterion_group!(layout_benches, bench_candle_layout);
criterion_main!(layout_benches);
