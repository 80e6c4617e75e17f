use std::cell::RefCell;
use std::rc::Rc;

use super::entities::{AnnotatedPoint, ChartSurface, PointerClick};
use super::value_objects::PointKind;

pub type PointAddedCallback = Rc<dyn Fn(f64, PointKind)>;
pub type RedrawHook = Rc<dyn Fn(&ChartSurface)>;

/// Click handler bound to a shared chart surface.
///
/// A valid click appends the point, repaints, then notifies the host. The
/// mutable borrow is released before either hook runs, so hooks may read the
/// surface freely.
#[derive(Clone)]
pub struct ClickHandler {
    chart: Rc<RefCell<ChartSurface>>,
    redraw: Option<RedrawHook>,
    on_point_added: Option<PointAddedCallback>,
}

impl ClickHandler {
    pub fn new(chart: Rc<RefCell<ChartSurface>>) -> Self {
        Self { chart, redraw: None, on_point_added: None }
    }

    pub fn on_redraw(mut self, redraw: impl Fn(&ChartSurface) + 'static) -> Self {
        self.redraw = Some(Rc::new(redraw));
        self
    }

    pub fn on_point_added(mut self, callback: impl Fn(f64, PointKind) + 'static) -> Self {
        self.on_point_added = Some(Rc::new(callback));
        self
    }

    pub fn handle(&self, click: PointerClick) -> Option<AnnotatedPoint> {
        let point = self.chart.borrow_mut().record_click(click)?;
        if let Some(redraw) = &self.redraw {
            redraw(&self.chart.borrow());
        }
        if let Some(callback) = &self.on_point_added {
            callback(point.price, point.kind);
        }
        Some(point)
    }
}
