use super::surface::{DrawSurface, Stroke};
use crate::domain::{
    chart::{ChartConfig, ReferenceLevel, Viewport},
    errors::RenderingResult,
};

/// Where a level's line and caption land on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGeometry {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub label_x: f64,
    pub label_y: f64,
}

pub fn level_geometry(level: &ReferenceLevel, viewport: &Viewport, config: &ChartConfig) -> LevelGeometry {
    let y = viewport.price_to_y(level.price);
    LevelGeometry {
        y,
        x_start: viewport.plot_left(),
        x_end: viewport.plot_right(),
        label_x: viewport.plot_right() - config.label_inset,
        label_y: y - config.label_offset,
    }
}

/// One full-width line plus caption per level, in the given order
pub fn draw_reference_levels<S: DrawSurface>(
    surface: &mut S,
    levels: &[ReferenceLevel],
    viewport: &Viewport,
    config: &ChartConfig,
) -> RenderingResult<()> {
    for level in levels {
        let geometry = level_geometry(level, viewport, config);
        let stroke = Stroke::dashed(level.color, config.level_line_width, config.dash_pattern(level.style));
        surface.stroke_line((geometry.x_start, geometry.y), (geometry.x_end, geometry.y), &stroke)?;
        surface.fill_text(&level.caption(), geometry.label_x, geometry.label_y, &config.label_font, level.color)?;
    }
    Ok(())
}
