//! Horizontal reference levels and the chart's input snapshot.

use serde::{Deserialize, Serialize};

use super::config::ChartTheme;
use super::value_objects::{Color, PriceRange, StrokeStyle};
use crate::domain::market_data::{PriceCandle, PricePoint};

/// Which guide a reference level represents. Variant order is draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LevelKind {
    Support,
    Resistance,
    MovingAverage(u32),
    CurrentPrice,
    Entry,
    StopLoss,
    TakeProfit1,
    TakeProfit2,
}

impl LevelKind {
    pub fn label(&self) -> String {
        match self {
            LevelKind::Support => "Support".to_string(),
            LevelKind::Resistance => "Resistance".to_string(),
            LevelKind::MovingAverage(period) => format!("EMA {}", period),
            LevelKind::CurrentPrice => "Current Price".to_string(),
            LevelKind::Entry => "Entry".to_string(),
            LevelKind::StopLoss => "Stop Loss".to_string(),
            LevelKind::TakeProfit1 => "TP1".to_string(),
            LevelKind::TakeProfit2 => "TP2".to_string(),
        }
    }

    /// Indicator overlays are dashed, trade levels solid.
    pub fn style(&self) -> StrokeStyle {
        match self {
            LevelKind::Support | LevelKind::Resistance | LevelKind::MovingAverage(_) => StrokeStyle::Dashed,
            _ => StrokeStyle::Solid,
        }
    }

    pub fn color(&self, theme: &ChartTheme) -> Color {
        match self {
            LevelKind::Support => theme.support,
            LevelKind::Resistance => theme.resistance,
            LevelKind::MovingAverage(100) => theme.ema_100,
            LevelKind::MovingAverage(200) => theme.ema_200,
            LevelKind::MovingAverage(_) => theme.ema_50,
            LevelKind::CurrentPrice => theme.current_price,
            LevelKind::Entry => theme.entry,
            LevelKind::StopLoss => theme.stop_loss,
            LevelKind::TakeProfit1 | LevelKind::TakeProfit2 => theme.take_profit,
        }
    }

    /// Shown in the legend under the chart
    pub fn is_indicator(&self) -> bool {
        matches!(self, LevelKind::Support | LevelKind::Resistance | LevelKind::MovingAverage(_))
    }
}

/// A horizontal guide ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLevel {
    pub kind: LevelKind,
    pub price: f64,
    pub label: String,
    pub color: Color,
    pub style: StrokeStyle,
}

impl ReferenceLevel {
    pub fn new(kind: LevelKind, price: f64, theme: &ChartTheme) -> Self {
        Self {
            kind,
            price,
            label: kind.label(),
            color: kind.color(theme),
            style: kind.style(),
        }
    }

    pub fn caption(&self) -> String {
        format!("{}: {:.2}", self.label, self.price)
    }
}

/// Legend swatch for an indicator overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub style: StrokeStyle,
}

/// Everything the chart draws besides the user's own markers.
///
/// Field names on the wire follow the host props (`currentPrice`,
/// `supportLevel`, `takeProfit1`, `ema50`, ...). Only `currentPrice` is
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInputs {
    pub current_price: f64,
    #[serde(default)]
    pub support_level: Option<f64>,
    #[serde(default)]
    pub resistance_level: Option<f64>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit1: Option<f64>,
    #[serde(default)]
    pub take_profit2: Option<f64>,
    #[serde(default)]
    pub ema50: Option<f64>,
    #[serde(default)]
    pub ema100: Option<f64>,
    #[serde(default)]
    pub ema200: Option<f64>,
    #[serde(default)]
    pub candles: Vec<PriceCandle>,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

impl ChartInputs {
    pub fn new(current_price: f64) -> Self {
        Self {
            current_price,
            support_level: None,
            resistance_level: None,
            entry_price: None,
            stop_loss: None,
            take_profit1: None,
            take_profit2: None,
            ema50: None,
            ema100: None,
            ema200: None,
            candles: Vec::new(),
            price_history: Vec::new(),
        }
    }

    pub fn support(mut self, val: Option<f64>) -> Self {
        self.support_level = val;
        self
    }

    pub fn resistance(mut self, val: Option<f64>) -> Self {
        self.resistance_level = val;
        self
    }

    pub fn entry(mut self, val: Option<f64>) -> Self {
        self.entry_price = val;
        self
    }

    pub fn stop_loss(mut self, val: Option<f64>) -> Self {
        self.stop_loss = val;
        self
    }

    pub fn take_profits(mut self, tp1: Option<f64>, tp2: Option<f64>) -> Self {
        self.take_profit1 = tp1;
        self.take_profit2 = tp2;
        self
    }

    pub fn emas(mut self, ema50: Option<f64>, ema100: Option<f64>, ema200: Option<f64>) -> Self {
        self.ema50 = ema50;
        self.ema100 = ema100;
        self.ema200 = ema200;
        self
    }

    pub fn candles(mut self, candles: Vec<PriceCandle>) -> Self {
        self.candles = candles;
        self
    }

    pub fn price_history(mut self, history: Vec<PricePoint>) -> Self {
        self.price_history = history;
        self
    }

    /// Moving averages in ascending period order
    pub fn moving_averages(&self) -> [(u32, Option<f64>); 3] {
        [(50, self.ema50), (100, self.ema100), (200, self.ema200)]
    }

    /// Every level slot in draw order, present or not
    pub fn level_slots(&self) -> Vec<(LevelKind, Option<f64>)> {
        let mut slots = vec![
            (LevelKind::Support, self.support_level),
            (LevelKind::Resistance, self.resistance_level),
        ];
        slots.extend(
            self.moving_averages()
                .into_iter()
                .map(|(period, price)| (LevelKind::MovingAverage(period), price)),
        );
        slots.extend([
            (LevelKind::CurrentPrice, Some(self.current_price)),
            (LevelKind::Entry, self.entry_price),
            (LevelKind::StopLoss, self.stop_loss),
            (LevelKind::TakeProfit1, self.take_profit1),
            (LevelKind::TakeProfit2, self.take_profit2),
        ]);
        slots
    }

    /// Present levels in draw order. Missing or non-finite prices are skipped.
    pub fn reference_levels(&self, theme: &ChartTheme) -> Vec<ReferenceLevel> {
        self.level_slots()
            .into_iter()
            .filter_map(|(kind, price)| present(price).map(|p| ReferenceLevel::new(kind, p, theme)))
            .collect()
    }

    pub fn price_range(&self) -> PriceRange {
        let levels: Vec<Option<f64>> = self.level_slots().into_iter().map(|(_, price)| price).collect();
        compute_price_range(&self.candles, &self.price_history, &levels, self.current_price)
    }
}

fn present(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite())
}

/// Price extent of everything visible: every candle open/high/low/close, every
/// close of the fallback series and every present level, padded by 0.5%.
/// Falls back to `fallback_center × (1 ± 1%)` when nothing is visible.
pub fn compute_price_range(
    candles: &[PriceCandle],
    history: &[PricePoint],
    levels: &[Option<f64>],
    fallback_center: f64,
) -> PriceRange {
    let prices = levels
        .iter()
        .filter_map(|level| present(*level))
        .chain(candles.iter().flat_map(|c| c.prices()))
        .chain(history.iter().map(|p| p.close));
    PriceRange::from_prices(prices, fallback_center)
}

/// Legend rows for the indicator overlays that are present, in draw order
pub fn legend_entries(inputs: &ChartInputs, theme: &ChartTheme) -> Vec<LegendEntry> {
    inputs
        .reference_levels(theme)
        .into_iter()
        .filter(|level| level.kind.is_indicator())
        .map(|level| LegendEntry {
            label: level.label,
            color: level.color,
            style: level.style,
        })
        .collect()
}
