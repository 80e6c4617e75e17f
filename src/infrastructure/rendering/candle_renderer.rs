#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::surface::{DrawSurface, Stroke};
use crate::domain::{
    chart::{ChartConfig, Color, Viewport},
    errors::RenderingResult,
    market_data::{PriceCandle, PricePoint, sort_by_time},
};
#[cfg(feature = "parallel")]
use crate::{domain::logging::LogComponent, log_debug};

/// Minimum candle count before layout is spread over the rayon pool
pub const PARALLEL_THRESHOLD: usize = 100;

/// Precomputed pixel geometry of one candle
#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    /// Left edge of the body
    pub x: f64,
    pub body_width: f64,
    /// Wick x, the center of the candle's slot
    pub center_x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub bullish: bool,
    pub color: Color,
}

/// Slot width for `count` candles across the plot
pub fn slot_width(viewport: &Viewport, count: usize) -> f64 {
    if count == 0 { 0.0 } else { viewport.plot_width() / count as f64 }
}

fn candle_geometry(
    index: usize,
    candle: &PriceCandle,
    slot: f64,
    viewport: &Viewport,
    config: &ChartConfig,
) -> CandleGeometry {
    let gap = slot * config.candle_gap_ratio;
    let body_width = slot - gap;
    let x = viewport.plot_left() + index as f64 * slot + gap / 2.0;

    let open_y = viewport.price_to_y(candle.open);
    let close_y = viewport.price_to_y(candle.close);
    let bullish = candle.is_bullish();

    CandleGeometry {
        x,
        body_width,
        center_x: x + body_width / 2.0,
        high_y: viewport.price_to_y(candle.high),
        low_y: viewport.price_to_y(candle.low),
        body_top: open_y.min(close_y),
        body_height: (open_y - close_y).abs().max(config.min_body_height),
        bullish,
        color: config.theme.candle_color(bullish),
    }
}

/// Lay candles out left to right in ascending time order
pub fn layout_candles(candles: &[PriceCandle], viewport: &Viewport, config: &ChartConfig) -> Vec<CandleGeometry> {
    let sorted = sort_by_time(candles);
    let slot = slot_width(viewport, sorted.len());

    #[cfg(feature = "parallel")]
    if sorted.len() >= PARALLEL_THRESHOLD {
        log_debug!(
            LogComponent::Infrastructure("CandleRenderer"),
            "parallel layout of {} candles on {} threads",
            sorted.len(),
            rayon::current_num_threads()
        );
        return sorted
            .par_iter()
            .enumerate()
            .map(|(i, candle)| candle_geometry(i, candle, slot, viewport, config))
            .collect();
    }

    sorted
        .iter()
        .enumerate()
        .map(|(i, candle)| candle_geometry(i, candle, slot, viewport, config))
        .collect()
}

/// Wick, body fill, then body outline for each candle
pub fn draw_candles<S: DrawSurface>(
    surface: &mut S,
    geometries: &[CandleGeometry],
    config: &ChartConfig,
) -> RenderingResult<()> {
    for candle in geometries {
        let wick = Stroke::solid(candle.color, config.wick_width);
        surface.stroke_line((candle.center_x, candle.high_y), (candle.center_x, candle.low_y), &wick)?;
        surface.fill_rect(candle.x, candle.body_top, candle.body_width, candle.body_height, candle.color)?;
        let outline = Stroke::solid(candle.color, config.body_outline_width);
        surface.stroke_rect(candle.x, candle.body_top, candle.body_width, candle.body_height, &outline)?;
    }
    Ok(())
}

/// Points of the close-price polyline, one per slot center in time order
pub fn close_line_points(history: &[PricePoint], viewport: &Viewport) -> Vec<(f64, f64)> {
    let sorted = sort_by_time(history);
    let slot = slot_width(viewport, sorted.len());
    sorted
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = viewport.plot_left() + (i as f64 + 0.5) * slot;
            (x, viewport.price_to_y(point.close))
        })
        .collect()
}

/// Fallback when no candles are available. Fewer than two points draw nothing.
pub fn draw_close_line<S: DrawSurface>(
    surface: &mut S,
    history: &[PricePoint],
    viewport: &Viewport,
    config: &ChartConfig,
) -> RenderingResult<()> {
    let points = close_line_points(history, viewport);
    if points.len() < 2 {
        return Ok(());
    }
    let stroke = Stroke::solid(config.theme.history_line, config.history_line_width);
    surface.stroke_polyline(&points, &stroke)
}
