use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::domain::chart::Color;

/// Value Object - recommended trade direction.
///
/// The analytics service speaks Spanish on the wire (`compra`, `venta`,
/// `esperar`); English aliases are accepted too. Anything else reads as
/// [`TradeDirection::Wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, AsRefStr, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeDirection {
    #[strum(serialize = "compra")]
    Buy,
    #[strum(serialize = "venta")]
    Sell,
    #[default]
    #[strum(serialize = "esperar")]
    Wait,
}

impl TradeDirection {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compra" | "buy" => TradeDirection::Buy,
            "venta" | "sell" => TradeDirection::Sell,
            _ => TradeDirection::Wait,
        }
    }

    pub fn style(&self) -> DirectionStyle {
        match self {
            TradeDirection::Buy => DirectionStyle {
                label: "BUY",
                line_color: Color::from_hex(0x4ade80),
                fill_color: Color::from_hex(0xf0fdf4),
            },
            TradeDirection::Sell => DirectionStyle {
                label: "SELL",
                line_color: Color::from_hex(0xf87171),
                fill_color: Color::from_hex(0xfef2f2),
            },
            TradeDirection::Wait => DirectionStyle {
                label: "WAIT",
                line_color: Color::from_hex(0xfacc15),
                fill_color: Color::from_hex(0xfefce8),
            },
        }
    }
}

impl From<String> for TradeDirection {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<TradeDirection> for String {
    fn from(direction: TradeDirection) -> Self {
        direction.as_ref().to_string()
    }
}

/// Border and background colors used to frame a recommendation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionStyle {
    pub label: &'static str,
    pub line_color: Color,
    pub fill_color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_labels_and_aliases() {
        assert_eq!(TradeDirection::parse("compra"), TradeDirection::Buy);
        assert_eq!(TradeDirection::parse("SELL"), TradeDirection::Sell);
        assert_eq!(TradeDirection::parse("lateral"), TradeDirection::Wait);
        assert_eq!(String::from(TradeDirection::Sell), "venta");
    }

    #[test]
    fn every_direction_has_distinct_colors() {
        let styles: Vec<DirectionStyle> = TradeDirection::iter().map(|d| d.style()).collect();
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a.line_color, b.line_color);
                assert_ne!(a.fill_color, b.fill_color);
            }
        }
    }
}
