use crate::error::ShwaryError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries served by the payment API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    #[serde(rename = "DRC")]
    Drc,
    #[serde(rename = "KE")]
    Kenya,
    #[serde(rename = "UG")]
    Uganda,
}

impl CountryCode {
    pub const ALL: [CountryCode; 3] = [Self::Drc, Self::Kenya, Self::Uganda];

    /// Short code used in endpoint paths.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Drc => "DRC",
            Self::Kenya => "KE",
            Self::Uganda => "UG",
        }
    }

    /// International dialing prefix, `+` included.
    pub fn dialing_prefix(&self) -> &'static str {
        match self {
            Self::Drc => "+243",
            Self::Kenya => "+254",
            Self::Uganda => "+256",
        }
    }

    /// Smallest amount accepted for a payment, in local currency.
    pub fn minimum_amount(&self) -> Decimal {
        match self {
            Self::Drc => dec!(2900),
            Self::Kenya | Self::Uganda => dec!(1),
        }
    }

    /// Default region used to parse numbers written in local format.
    pub fn region(&self) -> phonenumber::country::Id {
        match self {
            Self::Drc => phonenumber::country::Id::CD,
            Self::Kenya => phonenumber::country::Id::KE,
            Self::Uganda => phonenumber::country::Id::UG,
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CountryCode {
    type Err = ShwaryError;

    /// Accepts `DRC`, `KE` and `UG` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|country| country.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ShwaryError::Validation(format!("unsupported country: {code:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup_is_case_insensitive() {
        assert_eq!("DRC".parse::<CountryCode>().unwrap(), CountryCode::Drc);
        assert_eq!("ke".parse::<CountryCode>().unwrap(), CountryCode::Kenya);
        assert_eq!(" Ug ".parse::<CountryCode>().unwrap(), CountryCode::Uganda);
    }

    #[test]
    fn test_unknown_country_rejected() {
        let err = "FR".parse::<CountryCode>().unwrap_err();
        assert!(matches!(err, ShwaryError::Validation(_)));
        assert!(err.to_string().contains("unsupported country"));

        // Long names are not codes.
        assert!("KENYA".parse::<CountryCode>().is_err());
    }

    #[test]
    fn test_country_rules() {
        assert_eq!(CountryCode::Drc.dialing_prefix(), "+243");
        assert_eq!(CountryCode::Kenya.dialing_prefix(), "+254");
        assert_eq!(CountryCode::Uganda.dialing_prefix(), "+256");
        assert_eq!(CountryCode::Drc.minimum_amount(), dec!(2900));
        assert_eq!(CountryCode::Kenya.minimum_amount(), dec!(1));
        assert_eq!(CountryCode::Uganda.minimum_amount(), dec!(1));
    }

    #[test]
    fn test_serde_uses_short_codes() {
        assert_eq!(serde_json::to_string(&CountryCode::Kenya).unwrap(), "\"KE\"");
        let parsed: CountryCode = serde_json::from_str("\"DRC\"").unwrap();
        assert_eq!(parsed, CountryCode::Drc);
    }
}
