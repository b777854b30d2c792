use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// Currencies, commodities and exchange-traded tickers an amount can be held in.
///
/// Declaration order is the total order used to break ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    ARS,
    /// Gold, troy ounce.
    XAU,
    /// iShares Core S&P 500 (LSE, USD).
    CSPX,
    /// iShares Core S&P 500 (Xetra, EUR).
    SXR8,
    IWDA,
    /// Russell 2000 trackers.
    RTWO,
    XRSU,
    RTWOE,
    /// MSCI Europe trackers.
    XUSE,
    MEUD,
    MEUS,
    /// Emerging markets trackers.
    EIMI,
    EMIM,
    VWRA,
}

impl Currency {
    pub const ALL: [Currency; 17] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::ARS,
        Currency::XAU,
        Currency::CSPX,
        Currency::SXR8,
        Currency::IWDA,
        Currency::RTWO,
        Currency::XRSU,
        Currency::RTWOE,
        Currency::XUSE,
        Currency::MEUD,
        Currency::MEUS,
        Currency::EIMI,
        Currency::EMIM,
        Currency::VWRA,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::ARS => "ARS",
            Currency::XAU => "XAU",
            Currency::CSPX => "CSPX",
            Currency::SXR8 => "SXR8",
            Currency::IWDA => "IWDA",
            Currency::RTWO => "RTWO",
            Currency::XRSU => "XRSU",
            Currency::RTWOE => "RTWOE",
            Currency::XUSE => "XUSE",
            Currency::MEUD => "MEUD",
            Currency::MEUS => "MEUS",
            Currency::EIMI => "EIMI",
            Currency::EMIM => "EMIM",
            Currency::VWRA => "VWRA",
        }
    }

    /// True for currencies that are exchange-traded funds rather than money.
    pub fn is_etf(&self) -> bool {
        !matches!(
            self,
            Currency::USD | Currency::EUR | Currency::GBP | Currency::ARS | Currency::XAU
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| Error::UnsupportedCurrency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("cspx".parse::<Currency>().unwrap(), Currency::CSPX);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_unknown_code_is_unsupported() {
        let err = "DOGE".parse::<Currency>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedCurrency(code) if code == "DOGE"));
    }

    #[test]
    fn test_order_follows_declaration() {
        assert!(Currency::USD < Currency::EUR);
        assert!(Currency::CSPX < Currency::RTWO);
        let mut sorted = Currency::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Currency::ALL.to_vec());
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Currency::RTWOE).unwrap();
        assert_eq!(json, "\"RTWOE\"");
        let back: Currency = serde_json::from_str("\"MEUD\"").unwrap();
        assert_eq!(back, Currency::MEUD);
    }
}
