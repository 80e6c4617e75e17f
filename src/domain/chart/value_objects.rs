use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Observed extremes are widened by this fraction of their magnitude.
pub const PRICE_PADDING_RATIO: f64 = 0.005;
/// Half-width, as a fraction of the reference price, used when nothing is visible.
pub const EMPTY_RANGE_RATIO: f64 = 0.01;
/// Absolute half-width floor for a collapsed range around zero.
pub const MIN_HALF_RANGE: f64 = 0.5;

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS color string accepted by the canvas 2D context.
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let digits = raw.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&raw).ok_or_else(|| format!("invalid color '{}', expected #rrggbb", raw))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

/// Stroke pattern of a reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum StrokeStyle {
    #[strum(serialize = "solid")]
    Solid,
    #[strum(serialize = "dashed")]
    Dashed,
}

impl StrokeStyle {
    pub fn is_dashed(&self) -> bool {
        matches!(self, StrokeStyle::Dashed)
    }
}

/// Kind of a user-placed marker. The string form is what hosts receive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    #[default]
    #[display(fmt = "entry")]
    #[strum(serialize = "entry")]
    Entry,
    #[display(fmt = "stop_loss")]
    #[strum(serialize = "stop_loss")]
    StopLoss,
    #[display(fmt = "take_profit")]
    #[strum(serialize = "take_profit")]
    TakeProfit,
}

/// Identifier of an annotated point, unique within one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize)]
pub struct PointId(u64);

impl PointId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Value Object - vertical price extent of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min_price: f64,
    pub max_price: f64,
}

impl PriceRange {
    /// Fit every finite price, padded by [`PRICE_PADDING_RATIO`] of its
    /// magnitude (or of the span, whichever is larger). With no finite price at all the range is `fallback_center × (1 ± 1%)`.
    pub fn from_prices<I>(prices: I, fallback_center: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (low, high) = prices
            .into_iter()
            .filter(|p| p.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)));

        let range = if low.is_finite() {
            // a zero extreme still moves by a share of the span
            let span_pad = (high - low) * PRICE_PADDING_RATIO;
            Self {
                min_price: low - (low.abs() * PRICE_PADDING_RATIO).max(span_pad),
                max_price: high + (high.abs() * PRICE_PADDING_RATIO).max(span_pad),
            }
        } else {
            let center = if fallback_center.is_finite() { fallback_center } else { 0.0 };
            Self {
                min_price: center - center.abs() * EMPTY_RANGE_RATIO,
                max_price: center + center.abs() * EMPTY_RANGE_RATIO,
            }
        };

        range.with_min_span()
    }

    /// Widen a collapsed range so the transform never divides by zero.
    pub fn with_min_span(self) -> Self {
        let span = self.max_price - self.min_price;
        if span > 0.0 && span.is_finite() {
            return self;
        }
        let center = (self.min_price + self.max_price) / 2.0;
        let center = if center.is_finite() { center } else { 0.0 };
        let half = (center.abs() * PRICE_PADDING_RATIO).max(MIN_HALF_RANGE);
        Self { min_price: center - half, max_price: center + half }
    }
}

/// Value Object - Viewport: price range mapped onto a padded pixel surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub min_price: f64,
    pub max_price: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: 100.0,
            width: 800.0,
            height: 400.0,
            padding: 40.0,
        }
    }
}

impl Viewport {
    pub fn new(range: PriceRange, width: f64, height: f64, padding: f64) -> Self {
        let range = range.with_min_span();
        Self {
            min_price: range.min_price,
            max_price: range.max_price,
            width,
            height,
            padding,
        }
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    pub fn plot_left(&self) -> f64 {
        self.padding
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.padding
    }

    pub fn plot_top(&self) -> f64 {
        self.padding
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.padding
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Convert a price to a surface Y coordinate (Y grows downward)
    pub fn price_to_y(&self, price: f64) -> f64 {
        self.plot_bottom() - ((price - self.min_price) / self.price_range()) * self.plot_height()
    }

    /// Convert a surface Y coordinate back to a price
    pub fn y_to_price(&self, y: f64) -> f64 {
        self.max_price - ((y - self.padding) / self.plot_height()) * self.price_range()
    }

    /// Whether a surface-local point lies inside the plotting rectangle (edges included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.plot_left() && x <= self.plot_right() && y >= self.plot_top() && y <= self.plot_bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn hex_round_trip() {
        let color = Color::from_hex(0x10b981);
        assert_eq!(color.to_hex(), 0x10b981);
        assert_eq!(color.to_css(), "#10b981");
        assert_eq!(Color::parse_hex("#10B981"), Some(color));
        assert_eq!(Color::parse_hex("10b98"), None);
    }

    #[test]
    fn point_kind_strings() {
        assert_eq!(PointKind::StopLoss.as_ref(), "stop_loss");
        assert_eq!(PointKind::from_str("take_profit"), Ok(PointKind::TakeProfit));
        assert_eq!(PointKind::default(), PointKind::Entry);
        assert_eq!(PointKind::Entry.to_string(), "entry");
    }

    #[test]
    fn collapsed_zero_range_gets_floor() {
        let range = PriceRange::from_prices([0.0, 0.0], 0.0);
        assert_eq!(range.min_price, -MIN_HALF_RANGE);
        assert_eq!(range.max_price, MIN_HALF_RANGE);
    }
}
