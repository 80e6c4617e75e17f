use serde::{Deserialize, Serialize};

use super::entities::{PriceCandle, PricePoint};
use super::value_objects::TradeDirection;
use crate::domain::chart::ChartInputs;

/// Trade recommendation as served by the analytics backend. Unknown fields
/// are ignored; any level may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeRecommendation {
    #[serde(default)]
    pub direction: TradeDirection,
    #[serde(default)]
    pub confidence: Option<f64>,
    pub current_price: f64,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit_1: Option<f64>,
    #[serde(default)]
    pub take_profit_2: Option<f64>,
    #[serde(default)]
    pub support_level: Option<f64>,
    #[serde(default)]
    pub resistance_level: Option<f64>,
    #[serde(default)]
    pub h4_ema_50: Option<f64>,
    #[serde(default)]
    pub h4_ema_100: Option<f64>,
    #[serde(default)]
    pub h4_ema_200: Option<f64>,
}

impl TradeRecommendation {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Chart inputs for this recommendation over the given market data
    pub fn chart_inputs(&self, candles: Vec<PriceCandle>, history: Vec<PricePoint>) -> ChartInputs {
        ChartInputs::from(self).candles(candles).price_history(history)
    }
}

impl From<&TradeRecommendation> for ChartInputs {
    fn from(rec: &TradeRecommendation) -> Self {
        ChartInputs::new(rec.current_price)
            .support(rec.support_level)
            .resistance(rec.resistance_level)
            .entry(rec.entry_price)
            .stop_loss(rec.stop_loss)
            .take_profits(rec.take_profit_1, rec.take_profit_2)
            .emas(rec.h4_ema_50, rec.h4_ema_100, rec.h4_ema_200)
    }
}
