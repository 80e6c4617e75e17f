use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::domain::{
    chart::{ChartConfig, ChartInputs, ChartSurface, ClickHandler, PointKind},
    errors::ChartError,
    logging::LogComponent,
    market_data::{PriceCandle, TradeRecommendation},
};
use crate::event_utils::{CanvasClickListener, ListenerSlot};
use crate::infrastructure::rendering::{CanvasSurface, paint_chart};
use crate::{log_error, log_info};

type JsCallbackSlot = Rc<RefCell<Option<js_sys::Function>>>;

/// Entry-point chart for plain JavaScript hosts.
///
/// ```js
/// const chart = new EntryPointChartApi("levels-canvas");
/// chart.onPointAdded((price, kind) => console.log(kind, price));
/// chart.setInputs(JSON.stringify({ currentPrice: 2005.5, supportLevel: 1990 }));
/// ```
#[wasm_bindgen]
pub struct EntryPointChartApi {
    canvas: HtmlCanvasElement,
    chart: Rc<RefCell<ChartSurface>>,
    on_point_added: JsCallbackSlot,
    listener: ListenerSlot<CanvasClickListener>,
}

#[wasm_bindgen]
impl EntryPointChartApi {
    /// Bind to the canvas with the given id. `config_json` may override any
    /// subset of the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: String, config_json: Option<String>) -> Result<EntryPointChartApi, JsValue> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json(&json)?,
            None => ChartConfig::default(),
        };

        let canvas = CanvasSurface::from_canvas_id(&canvas_id, config.width, config.height)?
            .canvas()
            .clone();

        let chart = Rc::new(RefCell::new(ChartSurface::new(config)));
        let on_point_added: JsCallbackSlot = Rc::new(RefCell::new(None));

        let redraw_canvas = canvas.clone();
        let callback_slot = on_point_added.clone();
        let handler = ClickHandler::new(chart.clone())
            .on_redraw(move |surface| {
                if let Err(e) = paint_chart(&redraw_canvas, surface) {
                    log_error!(LogComponent::Presentation("EntryPointChartApi"), "render failed: {}", e);
                }
            })
            .on_point_added(move |price, kind| {
                // cloned out so the callback may replace itself
                let callback = callback_slot.borrow().clone();
                let Some(callback) = callback else {
                    return;
                };
                if let Err(e) = callback.call2(&JsValue::NULL, &JsValue::from_f64(price), &JsValue::from_str(kind.as_ref())) {
                    log_error!(LogComponent::Presentation("EntryPointChartApi"), "onPointAdded threw: {:?}", e);
                }
            });

        let mut listener = ListenerSlot::new();
        listener.install(CanvasClickListener::attach(&canvas, move |click| {
            handler.handle(click);
        }));

        log_info!(LogComponent::Presentation("EntryPointChartApi"), "bound to canvas '{}'", canvas_id);

        let api = Self { canvas, chart, on_point_added, listener };
        api.render()?;
        Ok(api)
    }

    /// Replace every chart input from a JSON object (`currentPrice`,
    /// `supportLevel`, `candles`, ...) and repaint.
    #[wasm_bindgen(js_name = setInputs)]
    pub fn set_inputs(&self, inputs_json: &str) -> Result<(), JsValue> {
        let inputs: ChartInputs = serde_json::from_str(inputs_json).map_err(ChartError::from)?;
        self.chart.borrow_mut().set_inputs(inputs);
        self.render()
    }

    /// Feed a backend trade recommendation plus an optional candle array
    #[wasm_bindgen(js_name = setRecommendation)]
    pub fn set_recommendation(&self, recommendation_json: &str, candles_json: Option<String>) -> Result<(), JsValue> {
        let recommendation = TradeRecommendation::from_json(recommendation_json).map_err(ChartError::from)?;
        let candles: Vec<PriceCandle> = match candles_json {
            Some(json) => serde_json::from_str(&json).map_err(ChartError::from)?,
            None => Vec::new(),
        };
        self.chart
            .borrow_mut()
            .set_inputs(recommendation.chart_inputs(candles, Vec::new()));
        self.render()
    }

    /// `fn(price: number, kind: string)` called after every accepted click
    #[wasm_bindgen(js_name = onPointAdded)]
    pub fn on_point_added(&self, callback: Option<js_sys::Function>) {
        *self.on_point_added.borrow_mut() = callback;
    }

    /// `entry`, `stop_loss` or `take_profit`
    #[wasm_bindgen(js_name = setMarkerKind)]
    pub fn set_marker_kind(&self, kind: &str) -> Result<(), JsValue> {
        let kind = PointKind::from_str(kind)
            .map_err(|_| ChartError::ValidationError(format!("unknown marker kind '{}'", kind)))?;
        self.chart.borrow_mut().set_marker_kind(kind);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearPoints)]
    pub fn clear_points(&self) -> Result<(), JsValue> {
        self.chart.borrow_mut().clear_annotations();
        self.render()
    }

    /// Annotated points in click order as a JSON array
    pub fn points(&self) -> Result<String, JsValue> {
        let json = serde_json::to_string(self.chart.borrow().annotations().points()).map_err(ChartError::from)?;
        Ok(json)
    }

    pub fn render(&self) -> Result<(), JsValue> {
        paint_chart(&self.canvas, &self.chart.borrow())?;
        Ok(())
    }

    /// Detach the click listener. The chart stays painted but inert.
    pub fn destroy(&mut self) {
        self.listener.release();
        self.on_point_added.borrow_mut().take();
        log_info!(LogComponent::Presentation("EntryPointChartApi"), "destroyed");
    }
}
