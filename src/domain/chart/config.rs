use serde::{Deserialize, Serialize};

use super::value_objects::{Color, PointKind, StrokeStyle};
use crate::domain::{errors::ChartError, logging::LogComponent};
use crate::log_warn;

/// Colors of every chart element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Color,
    pub bullish: Color,
    pub bearish: Color,
    pub history_line: Color,
    pub support: Color,
    pub resistance: Color,
    pub ema_50: Color,
    pub ema_100: Color,
    pub ema_200: Color,
    pub current_price: Color,
    pub entry: Color,
    pub stop_loss: Color,
    pub take_profit: Color,
    pub marker_entry: Color,
    pub marker_stop_loss: Color,
    pub marker_take_profit: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xf9fafb),
            bullish: Color::from_hex(0x10b981),
            bearish: Color::from_hex(0xef4444),
            history_line: Color::from_hex(0x3b82f6),
            support: Color::from_hex(0x10b981),
            resistance: Color::from_hex(0xef4444),
            ema_50: Color::from_hex(0x3b82f6),
            ema_100: Color::from_hex(0x8b5cf6),
            ema_200: Color::from_hex(0xf59e0b),
            current_price: Color::from_hex(0x1f2937),
            entry: Color::from_hex(0x3b82f6),
            stop_loss: Color::from_hex(0xef4444),
            take_profit: Color::from_hex(0x10b981),
            marker_entry: Color::from_hex(0x3b82f6),
            marker_stop_loss: Color::from_hex(0xef4444),
            marker_take_profit: Color::from_hex(0x10b981),
        }
    }
}

impl ChartTheme {
    pub fn marker_color(&self, kind: PointKind) -> Color {
        match kind {
            PointKind::Entry => self.marker_entry,
            PointKind::StopLoss => self.marker_stop_loss,
            PointKind::TakeProfit => self.marker_take_profit,
        }
    }

    pub fn candle_color(&self, bullish: bool) -> Color {
        if bullish { self.bullish } else { self.bearish }
    }
}

/// Surface geometry and drawing constants. Every field has a default, so a
/// host may override any subset through [`ChartConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Share of each candle slot left empty between bodies
    pub candle_gap_ratio: f64,
    pub min_body_height: f64,
    pub wick_width: f64,
    pub body_outline_width: f64,
    pub history_line_width: f64,
    pub level_line_width: f64,
    pub dash_on: f64,
    pub dash_off: f64,
    /// Label x = right edge of the plot minus this inset
    pub label_inset: f64,
    /// Label baseline sits this far above its line
    pub label_offset: f64,
    pub label_font: String,
    pub marker_radius: f64,
    pub theme: ChartTheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 40.0,
            candle_gap_ratio: 0.1,
            min_body_height: 1.0,
            wick_width: 1.0,
            body_outline_width: 1.0,
            history_line_width: 2.0,
            level_line_width: 2.0,
            dash_on: 5.0,
            dash_off: 5.0,
            label_inset: 100.0,
            label_offset: 5.0,
            label_font: "12px sans-serif".to_string(),
            marker_radius: 6.0,
            theme: ChartTheme::default(),
        }
    }
}

impl ChartConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// `self` if it validates, otherwise the defaults (the error is logged)
    pub fn or_default_if_invalid(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log_warn!(LogComponent::Domain("ChartConfig"), "{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !(self.padding >= 0.0) {
            return Err(ChartError::ValidationError(format!("padding must be >= 0, got {}", self.padding)));
        }
        if !(self.width > 2.0 * self.padding && self.height > 2.0 * self.padding) {
            return Err(ChartError::ValidationError(format!(
                "surface {}x{} leaves no plotting area with padding {}",
                self.width, self.height, self.padding
            )));
        }
        if !(0.0..1.0).contains(&self.candle_gap_ratio) {
            return Err(ChartError::ValidationError(format!(
                "candle_gap_ratio must be in [0, 1), got {}",
                self.candle_gap_ratio
            )));
        }
        Ok(())
    }

    pub fn dash_pattern(&self, style: StrokeStyle) -> Vec<f64> {
        if style.is_dashed() { vec![self.dash_on, self.dash_off] } else { Vec::new() }
    }
}
