use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::chart_renderer::render_chart;
use super::surface::{DrawSurface, Stroke};
use crate::domain::{
    chart::{ChartSurface, Color},
    errors::{ChartError, RenderingResult},
    logging::LogComponent,
};
use crate::log_debug;

fn js_err(context: &str) -> impl Fn(JsValue) -> ChartError + '_ {
    move |err| ChartError::RenderingError(format!("{}: {:?}", context, err))
}

/// Canvas 2D implementation of [`DrawSurface`]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Size the canvas backing store and grab its 2D context
    pub fn from_canvas(canvas: HtmlCanvasElement, width: f64, height: f64) -> RenderingResult<Self> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")
            .map_err(js_err("Failed to get 2D context"))?
            .ok_or_else(|| ChartError::RenderingError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::RenderingError("Failed to cast to 2D context".to_string()))?;

        log_debug!(
            LogComponent::Infrastructure("CanvasSurface"),
            "canvas ready at {}x{}",
            width,
            height
        );
        Ok(Self { canvas, context })
    }

    pub fn from_canvas_id(canvas_id: &str, width: f64, height: f64) -> RenderingResult<Self> {
        let canvas = gloo::utils::document()
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ChartError::RenderingError(format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::RenderingError(format!("Element '{}' is not a canvas", canvas_id)))?;
        Self::from_canvas(canvas, width, height)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_stroke(&self, stroke: &Stroke) -> RenderingResult<()> {
        self.context.set_stroke_style_str(&stroke.color.to_css());
        self.context.set_line_width(stroke.width);
        let dash: js_sys::Array = stroke.dash.iter().map(|v| JsValue::from_f64(*v)).collect();
        self.context.set_line_dash(&dash).map_err(js_err("Failed to set line dash"))
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64, background: Color) -> RenderingResult<()> {
        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style_str(&background.to_css());
        self.context.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) -> RenderingResult<()> {
        self.stroke_polyline(&[from, to], stroke)
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) -> RenderingResult<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.apply_stroke(stroke)?;
        self.context.begin_path();
        self.context.move_to(first.0, first.1);
        for (x, y) in rest {
            self.context.line_to(*x, *y);
        }
        self.context.stroke();
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> RenderingResult<()> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(x, y, width, height);
        Ok(())
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &Stroke) -> RenderingResult<()> {
        self.apply_stroke(stroke)?;
        self.context.stroke_rect(x, y, width, height);
        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) -> RenderingResult<()> {
        self.context.begin_path();
        self.context
            .arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU)
            .map_err(js_err("Failed to draw marker"))?;
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) -> RenderingResult<()> {
        self.context.set_font(font);
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_text(text, x, y).map_err(js_err("Failed to draw label"))
    }
}

/// Repaint `chart` onto `canvas`
pub fn paint_chart(canvas: &HtmlCanvasElement, chart: &ChartSurface) -> RenderingResult<()> {
    let config = chart.config();
    let mut surface = CanvasSurface::from_canvas(canvas.clone(), config.width, config.height)?;
    render_chart(chart, &mut surface)
}
