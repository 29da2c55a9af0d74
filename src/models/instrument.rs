use serde::{Deserialize, Serialize};
use std::fmt;

/// Pip size and display precision used when an instrument has no profile.
pub const DEFAULT_PROFILE: InstrumentProfile = InstrumentProfile {
    pip_size: 0.0001,
    decimals: 5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    #[serde(rename = "EURUSD")]
    EurUsd,
    #[serde(rename = "GBPUSD")]
    GbpUsd,
    #[serde(rename = "USDJPY")]
    UsdJpy,
    #[serde(rename = "AUDUSD")]
    AudUsd,
    #[serde(rename = "XAUUSD")]
    XauUsd,
    #[serde(rename = "XAGUSD")]
    XagUsd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentProfile {
    /// Price delta of one pip.
    pub pip_size: f64,
    /// Decimal places used when rendering prices.
    pub decimals: usize,
}

impl Instrument {
    pub const ALL: [Instrument; 6] = [
        Instrument::EurUsd,
        Instrument::GbpUsd,
        Instrument::UsdJpy,
        Instrument::AudUsd,
        Instrument::XauUsd,
        Instrument::XagUsd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::EurUsd => "EURUSD",
            Instrument::GbpUsd => "GBPUSD",
            Instrument::UsdJpy => "USDJPY",
            Instrument::AudUsd => "AUDUSD",
            Instrument::XauUsd => "XAUUSD",
            Instrument::XagUsd => "XAGUSD",
        }
    }

    pub fn profile(&self) -> InstrumentProfile {
        InstrumentProfile::for_symbol(self.as_str())
    }

    /// Gold trades in large absolute units and gets the cumulative-gap ladder.
    pub fn is_wide_pip(&self) -> bool {
        matches!(self, Instrument::XauUsd)
    }

    pub fn from_str_loose(s: &str) -> Option<Instrument> {
        let wanted = s.trim();
        Instrument::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl InstrumentProfile {
    /// Profile for a raw symbol, falling back to [`DEFAULT_PROFILE`].
    pub fn for_symbol(symbol: &str) -> InstrumentProfile {
        let (pip_size, decimals) = match symbol.trim().to_ascii_uppercase().as_str() {
            "EURUSD" | "GBPUSD" | "AUDUSD" => (0.0001, 5),
            "USDJPY" => (0.01, 3),
            "XAUUSD" => (0.1, 2),
            "XAGUSD" => (0.001, 3),
            _ => return DEFAULT_PROFILE,
        };
        InstrumentProfile { pip_size, decimals }
    }

    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.decimals, price)
    }

    /// Rounds to the display precision, for values leaving the process.
    pub fn round_price(&self, price: f64) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        (price * factor).round() / factor
    }

    /// Distance between two prices expressed in pips.
    pub fn pips_between(&self, a: f64, b: f64) -> f64 {
        (a - b).abs() / self.pip_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_match_case_insensitively() {
        assert_eq!(Instrument::from_str_loose("eurusd"), Some(Instrument::EurUsd));
        assert_eq!(Instrument::from_str_loose("XauUsd "), Some(Instrument::XauUsd));
        assert_eq!(Instrument::from_str_loose("BTCUSD"), None);
    }

    #[test]
    fn every_symbol_round_trips_through_its_name() {
        for inst in Instrument::ALL {
            assert_eq!(Instrument::from_str_loose(inst.as_str()), Some(inst));
        }
    }

    #[test]
    fn profiles_match_market_conventions() {
        assert_eq!(Instrument::EurUsd.profile().pip_size, 0.0001);
        assert_eq!(Instrument::UsdJpy.profile().decimals, 3);
        assert_eq!(Instrument::XauUsd.profile().pip_size, 0.1);
        assert_eq!(Instrument::XagUsd.profile().pip_size, 0.001);
        assert!(Instrument::XauUsd.is_wide_pip());
        assert!(!Instrument::XagUsd.is_wide_pip());
    }

    #[test]
    fn unknown_symbol_uses_default_profile() {
        assert_eq!(InstrumentProfile::for_symbol("BTCUSD"), DEFAULT_PROFILE);
        assert_eq!(
            InstrumentProfile::for_symbol("usdjpy"),
            Instrument::UsdJpy.profile()
        );
        for inst in Instrument::ALL {
            assert_ne!(inst.profile().pip_size, 0.0);
            assert_eq!(inst.profile(), InstrumentProfile::for_symbol(inst.as_str()));
        }
        assert_ne!(Instrument::XauUsd.profile(), DEFAULT_PROFILE);
    }

    #[test]
    fn formats_and_measures_prices() {
        let p = Instrument::EurUsd.profile();
        assert_eq!(p.format_price(1.1), "1.10000");
        assert_eq!(p.round_price(1.1049999999), 1.105);
        assert!((p.pips_between(1.1, 1.095) - 50.0).abs() < 1e-6);

        let gold = Instrument::XauUsd.profile();
        assert_eq!(gold.format_price(2000.0), "2000.00");
    }
}
