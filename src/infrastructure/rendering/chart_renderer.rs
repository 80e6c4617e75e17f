use super::candle_renderer::{draw_candles, draw_close_line, layout_candles};
use super::level_renderer::draw_reference_levels;
use super::surface::DrawSurface;
use crate::domain::{chart::ChartSurface, errors::RenderingResult, logging::LogComponent};
use crate::log_trace;

/// Full clear-and-repaint: background, candles (or the close-line fallback),
/// reference levels, then the user's markers on top.
pub fn render_chart<S: DrawSurface>(chart: &ChartSurface, surface: &mut S) -> RenderingResult<()> {
    let config = chart.config();
    let viewport = chart.viewport();
    let inputs = chart.inputs();

    surface.clear(config.width, config.height, config.theme.background)?;

    if !inputs.candles.is_empty() {
        let layout = layout_candles(&inputs.candles, viewport, config);
        draw_candles(surface, &layout, config)?;
    } else if !inputs.price_history.is_empty() {
        draw_close_line(surface, &inputs.price_history, viewport, config)?;
    }

    let levels = chart.reference_levels();
    draw_reference_levels(surface, &levels, viewport, config)?;

    for point in chart.annotations().iter() {
        surface.fill_circle((point.x, point.y), config.marker_radius, config.theme.marker_color(point.kind))?;
    }

    log_trace!(
        LogComponent::Infrastructure("ChartRenderer"),
        "painted {} candles, {} levels, {} markers",
        inputs.candles.len(),
        levels.len(),
        chart.annotations().len()
    );
    Ok(())
}
