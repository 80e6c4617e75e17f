use serde::Serialize;

use super::config::ChartConfig;
use super::levels::{ChartInputs, ReferenceLevel};
use super::value_objects::{PointId, PointKind, Viewport};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info, log_warn};

/// A marker the user placed by clicking the plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPoint {
    pub id: PointId,
    pub price: f64,
    pub kind: PointKind,
    /// Surface-local pixel position of the click
    pub x: f64,
    pub y: f64,
}

/// Append-only list of annotated points in click order
#[derive(Debug, Clone, Default)]
pub struct AnnotationList {
    points: Vec<AnnotatedPoint>,
    next_id: u64,
}

impl AnnotationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, price: f64, kind: PointKind, x: f64, y: f64) -> AnnotatedPoint {
        let point = AnnotatedPoint {
            id: PointId::from(self.next_id),
            price,
            kind,
            x,
            y,
        };
        self.next_id += 1;
        self.points.push(point.clone());
        point
    }

    pub fn points(&self) -> &[AnnotatedPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop every point. Ids are never reused.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Pointer position in viewport coordinates together with the surface's
/// bounding-box origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub client_x: f64,
    pub client_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl PointerClick {
    pub fn new(client_x: f64, client_y: f64, origin_x: f64, origin_y: f64) -> Self {
        Self { client_x, client_y, origin_x, origin_y }
    }

    /// Click already expressed in surface-local pixels
    pub fn local(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    pub fn local_position(&self) -> (f64, f64) {
        (self.client_x - self.origin_x, self.client_y - self.origin_y)
    }
}

/// Domain entity - the chart surface: current inputs, the derived viewport
/// and the user's annotations
#[derive(Debug, Clone)]
pub struct ChartSurface {
    config: ChartConfig,
    inputs: ChartInputs,
    viewport: Viewport,
    annotations: AnnotationList,
    marker_kind: PointKind,
}

impl ChartSurface {
    pub fn new(config: ChartConfig) -> Self {
        let inputs = ChartInputs::new(0.0);
        let viewport = Viewport::new(inputs.price_range(), config.width, config.height, config.padding);
        Self {
            config,
            inputs,
            viewport,
            annotations: AnnotationList::new(),
            marker_kind: PointKind::default(),
        }
    }

    pub fn with_inputs(config: ChartConfig, inputs: ChartInputs) -> Self {
        let mut chart = Self::new(config);
        chart.set_inputs(inputs);
        chart
    }

    /// Replace the inputs and refit the viewport. Annotations are kept.
    pub fn set_inputs(&mut self, inputs: ChartInputs) {
        let malformed = inputs.candles.iter().filter(|c| !c.is_well_formed()).count();
        if malformed > 0 {
            log_warn!(
                LogComponent::Domain("ChartSurface"),
                "{} of {} candles are malformed",
                malformed,
                inputs.candles.len()
            );
        }
        let range = inputs.price_range();
        self.viewport = Viewport::new(range, self.config.width, self.config.height, self.config.padding);
        log_debug!(
            LogComponent::Domain("ChartSurface"),
            "inputs: {} candles, {} history points, range {:.4}..{:.4}",
            inputs.candles.len(),
            inputs.price_history.len(),
            self.viewport.min_price,
            self.viewport.max_price
        );
        self.inputs = inputs;
    }

    pub fn inputs(&self) -> &ChartInputs {
        &self.inputs
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn annotations(&self) -> &AnnotationList {
        &self.annotations
    }

    pub fn reference_levels(&self) -> Vec<ReferenceLevel> {
        self.inputs.reference_levels(&self.config.theme)
    }

    pub fn marker_kind(&self) -> PointKind {
        self.marker_kind
    }

    pub fn set_marker_kind(&mut self, kind: PointKind) {
        self.marker_kind = kind;
    }

    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    /// Turn a click into a new annotated point. Clicks outside the plotting
    /// rectangle return `None` and change nothing.
    pub fn record_click(&mut self, click: PointerClick) -> Option<AnnotatedPoint> {
        let (x, y) = click.local_position();
        if !self.viewport.contains_point(x, y) {
            log_debug!(LogComponent::Domain("ChartSurface"), "click at ({:.1}, {:.1}) outside plot", x, y);
            return None;
        }

        let price = self.viewport.y_to_price(y);
        let point = self.annotations.push(price, self.marker_kind, x, y);
        log_info!(
            LogComponent::Domain("ChartSurface"),
            "point #{} {} at {:.2}",
            point.id,
            point.kind,
            point.price
        );
        Some(point)
    }
}
