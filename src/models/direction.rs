use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }

    /// +1 for BUY, -1 for SELL. Multiplies a pip distance into a price delta.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }

    /// Case-insensitive match on `BUY` / `SELL`, surrounding whitespace ignored.
    pub fn from_str_loose(s: &str) -> Option<Direction> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Direction::Buy),
            "SELL" => Some(Direction::Sell),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Direction::from_str_loose("buy"), Some(Direction::Buy));
        assert_eq!(Direction::from_str_loose(" Sell "), Some(Direction::Sell));
        assert_eq!(Direction::from_str_loose("long"), None);
        assert_eq!(Direction::from_str_loose(""), None);
    }

    #[test]
    fn sign_follows_direction() {
        assert_eq!(Direction::Buy.sign(), 1.0);
        assert_eq!(Direction::Sell.sign(), -1.0);
        assert_eq!(Direction::Sell.to_string(), "SELL");
    }
}
