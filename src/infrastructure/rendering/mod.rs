pub mod candle_renderer;
pub mod canvas_renderer;
pub mod chart_renderer;
pub mod level_renderer;
pub mod surface;

pub use candle_renderer::{CandleGeometry, PARALLEL_THRESHOLD, close_line_points, layout_candles};
pub use canvas_renderer::{CanvasSurface, paint_chart};
pub use chart_renderer::render_chart;
pub use level_renderer::{LevelGeometry, level_geometry};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Stroke};
