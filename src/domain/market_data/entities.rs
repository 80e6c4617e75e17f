use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parse the ISO-8601 forms the analytics service emits: RFC 3339 with an
/// offset, a naive date-time (read as UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Anything carrying a wire timestamp that the chart lays out in time order
pub trait Timestamped {
    fn raw_timestamp(&self) -> &str;

    fn time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.raw_timestamp())
    }
}

/// Stable ascending time order. Entries whose timestamp does not parse go
/// last, keeping their relative order.
pub fn sort_by_time<T: Timestamped>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_cached_key(|item| {
        let time = item.time();
        (time.is_none(), time)
    });
    sorted
}

/// Domain entity - one OHLC bar as delivered by the analytics service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCandle {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PriceCandle {
    pub fn new(timestamp: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Ties count as bullish.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    pub fn prices(&self) -> [f64; 4] {
        [self.open, self.high, self.low, self.close]
    }

    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    /// High/low enclose open/close and volume is non-negative
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.body_high()
            && self.low <= self.body_low()
            && self.high >= self.low
            && self.volume.is_none_or(|v| v >= 0.0)
    }
}

impl Timestamped for PriceCandle {
    fn raw_timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Close-only sample used when no candles are available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: impl Into<String>, close: f64) -> Self {
        Self { timestamp: timestamp.into(), close }
    }
}

impl Timestamped for PricePoint {
    fn raw_timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_supported_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-02"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T00:00:00.000"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T01:00:00+01:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn tie_is_bullish() {
        assert!(PriceCandle::new("2024-01-01", 100.0, 101.0, 99.0, 100.0).is_bullish());
        assert!(!PriceCandle::new("2024-01-01", 105.0, 106.0, 99.0, 100.0).is_bullish());
    }

    #[test]
    fn malformed_candle_detected() {
        assert!(PriceCandle::new("2024-01-01", 100.0, 110.0, 95.0, 105.0).is_well_formed());
        assert!(!PriceCandle::new("2024-01-01", 100.0, 101.0, 95.0, 105.0).is_well_formed());
        assert!(!PriceCandle::new("2024-01-01", 100.0, 110.0, 95.0, 105.0).with_volume(-1.0).is_well_formed());
    }

    #[test]
    fn volume_is_optional_on_the_wire() {
        let candle: PriceCandle = serde_json::from_str(
            r#"{"timestamp":"2024-01-01T00:00:00","open":1.0,"high":2.0,"low":0.5,"close":1.5}"#,
        )
        .unwrap();
        assert_eq!(candle.volume, None);
    }
}
