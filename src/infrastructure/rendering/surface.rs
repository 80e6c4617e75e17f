use serde::Serialize;

use crate::domain::chart::Color;
use crate::domain::errors::RenderingResult;

/// Line appearance for stroke operations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Empty for a solid line
    pub dash: Vec<f64>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: Vec::new() }
    }

    pub fn dashed(color: Color, width: f64, dash: Vec<f64>) -> Self {
        Self { color, width, dash }
    }
}

/// 2D drawing backend the chart paints onto. Coordinates are surface-local
/// pixels with Y growing downward.
pub trait DrawSurface {
    /// Wipe the whole surface and fill it with `background`
    fn clear(&mut self, width: f64, height: f64, background: Color) -> RenderingResult<()>;

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) -> RenderingResult<()>;

    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) -> RenderingResult<()>;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> RenderingResult<()>;

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &Stroke) -> RenderingResult<()>;

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) -> RenderingResult<()>;

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) -> RenderingResult<()>;
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: f64, height: f64, background: Color },
    Line { from: (f64, f64), to: (f64, f64), stroke: Stroke },
    Polyline { points: Vec<(f64, f64)>, stroke: Stroke },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Color },
    StrokeRect { x: f64, y: f64, width: f64, height: f64, stroke: Stroke },
    Circle { center: (f64, f64), radius: f64, color: Color },
    Text { text: String, x: f64, y: f64, font: String, color: Color },
}

/// Surface that records every call instead of drawing. Used off-browser
/// and in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(&(f64, f64), &(f64, f64), &Stroke)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(&(f64, f64), f64, &Color)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Circle { center, radius, color } => Some((center, *radius, color)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64, background: Color) -> RenderingResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height, background });
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Line { from, to, stroke: stroke.clone() });
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), stroke: stroke.clone() });
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> RenderingResult<()> {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color });
        Ok(())
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &Stroke) -> RenderingResult<()> {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height, stroke: stroke.clone() });
        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Circle { center, radius, color });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color,
        });
        Ok(())
    }
}
