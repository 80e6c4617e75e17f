use levels_chart_wasm::domain::chart::{ChartInputs, PriceRange, compute_price_range};
use levels_chart_wasm::domain::market_data::{PriceCandle, PricePoint};
use quickcheck_macros::quickcheck;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// zero and negative prices included
fn candles_from(raw: &[(i16, i16, u8)]) -> Vec<PriceCandle> {
    raw.iter()
        .enumerate()
        .map(|(i, &(open, close, wick))| {
            let open = open as f64;
            let close = close as f64;
            let wick = wick as f64 / 100.0;
            PriceCandle::new(
                format!("2024-01-01T{:02}:{:02}:00", (i / 60) % 24, i % 60),
                open,
                open.max(close) + wick,
                open.min(close) - wick,
                close,
            )
        })
        .collect()
}

#[quickcheck]
fn every_visible_price_is_strictly_inside(raw: Vec<(i16, i16, u8)>, support: Option<i16>, current: i16) -> bool {
    let inputs = ChartInputs::new(current as f64)
        .support(support.map(f64::from))
        .candles(candles_from(&raw));
    let range = inputs.price_range();

    let mut visible: Vec<f64> = inputs.candles.iter().flat_map(|c| c.prices()).collect();
    visible.push(inputs.current_price);
    visible.extend(inputs.support_level);

    range.min_price < range.max_price
        && visible
            .iter()
            .all(|&p| p > range.min_price && p < range.max_price)
}

#[test]
fn extremes_padded_by_half_percent() {
    let inputs = ChartInputs::new(2005.0)
        .support(Some(2000.0))
        .resistance(Some(2020.0));
    let range = inputs.price_range();
    assert!(close(range.min_price, 2000.0 * 0.995));
    assert!(close(range.max_price, 2020.0 * 1.005));
}

#[test]
fn candle_extremes_widen_the_range() {
    let inputs = ChartInputs::new(2005.0).candles(vec![
        PriceCandle::new("2024-01-01", 2001.0, 2030.0, 1980.0, 2004.0),
    ]);
    let range = inputs.price_range();
    assert!(close(range.min_price, 1980.0 * 0.995));
    assert!(close(range.max_price, 2030.0 * 1.005));
}

#[test]
fn history_closes_widen_the_range() {
    let inputs = ChartInputs::new(100.0).price_history(vec![
        PricePoint::new("2024-01-01", 90.0),
        PricePoint::new("2024-01-02", 120.0),
    ]);
    let range = inputs.price_range();
    assert!(close(range.min_price, 90.0 * 0.995));
    assert!(close(range.max_price, 120.0 * 1.005));
}

#[test]
fn nothing_visible_falls_back_to_one_percent_band() {
    let range = compute_price_range(&[], &[], &[None, None], 2000.0);
    assert!(close(range.min_price, 1980.0));
    assert!(close(range.max_price, 2020.0));
}

#[test]
fn only_current_price_is_padded() {
    let range = ChartInputs::new(2000.0).price_range();
    assert!(close(range.min_price, 1990.0));
    assert!(close(range.max_price, 2010.0));
}

#[test]
fn non_finite_levels_are_ignored() {
    let inputs = ChartInputs::new(100.0)
        .support(Some(f64::NAN))
        .resistance(Some(f64::INFINITY));
    let range = inputs.price_range();
    assert!(range.min_price.is_finite() && range.max_price.is_finite());
    assert!(close(range.max_price, 100.5));
}

#[test]
fn all_zero_prices_get_minimum_span() {
    let range = ChartInputs::new(0.0).price_range();
    assert_eq!(range, PriceRange { min_price: -0.5, max_price: 0.5 });
}

#[test]
fn zero_level_sits_inside_the_range() {
    let range = ChartInputs::new(100.0).support(Some(0.0)).price_range();
    assert!(range.min_price < 0.0, "{:?}", range);
    assert!(close(range.min_price, -0.5));
    assert!(close(range.max_price, 100.5));
}

#[test]
fn zero_maximum_with_negative_prices_is_padded() {
    let range = ChartInputs::new(-40.0).resistance(Some(0.0)).price_range();
    assert!(range.max_price > 0.0, "{:?}", range);
    assert!(close(range.max_price, 0.2));
    assert!(close(range.min_price, -40.2));
}
