use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

pub mod app;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;

pub use app::EntryPointChart;
pub use domain::chart::{ChartConfig, ChartInputs, ChartSurface, PointKind};
pub use domain::market_data::{PriceCandle, TradeDirection, TradeRecommendation};
pub use presentation::EntryPointChartApi;

/// Install the panic hook, console logger and browser clock
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(console_logger));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    crate::log_info!(LogComponent::Presentation("Initialize"), "levels chart ready");
}
