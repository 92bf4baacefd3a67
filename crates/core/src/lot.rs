//! Lot (unit) and option status enumerations.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const LOT_DISPONIBLE: &str = "disponible";
pub const LOT_OPTION: &str = "option";
pub const LOT_RESERVE: &str = "reserve";
pub const LOT_VENDU: &str = "vendu";

pub const VALID_LOT_STATUSES: &[&str] = &[LOT_DISPONIBLE, LOT_OPTION, LOT_RESERVE, LOT_VENDU];

pub const OPTION_ACTIVE: &str = "active";
pub const OPTION_EXPIREE: &str = "expiree";
pub const OPTION_CONVERTIE: &str = "convertie";
pub const OPTION_ANNULEE: &str = "annulee";

pub const VALID_OPTION_STATUSES: &[&str] =
    &[OPTION_ACTIVE, OPTION_EXPIREE, OPTION_CONVERTIE, OPTION_ANNULEE];

/// Upper bound on a lot price: ten billion euros, in cents.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;

/// Default hold duration when placing an option.
pub const DEFAULT_OPTION_DAYS: i64 = 7;

/// Longest hold a partner may request.
pub const MAX_OPTION_DAYS: i64 = 30;

/// Commercial status of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    Disponible,
    Option,
    Reserve,
    Vendu,
}

impl LotStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            LOT_DISPONIBLE => Ok(Self::Disponible),
            LOT_OPTION => Ok(Self::Option),
            LOT_RESERVE => Ok(Self::Reserve),
            LOT_VENDU => Ok(Self::Vendu),
            _ => Err(format!(
                "Invalid lot status '{s}'. Must be one of: {}",
                VALID_LOT_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disponible => LOT_DISPONIBLE,
            Self::Option => LOT_OPTION,
            Self::Reserve => LOT_RESERVE,
            Self::Vendu => LOT_VENDU,
        }
    }

    /// Reserved and sold lots carry a buyer and count toward revenue.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Reserve | Self::Vendu)
    }
}

/// Validate an optional lot status filter or update value.
pub fn validate_lot_status(s: &str) -> Result<LotStatus, CoreError> {
    LotStatus::from_str_value(s).map_err(CoreError::Validation)
}

/// Reject negative or absurd prices.
pub fn validate_price_cents(price_cents: i64) -> Result<(), CoreError> {
    if !(0..=MAX_PRICE_CENTS).contains(&price_cents) {
        return Err(CoreError::Validation(format!(
            "prix_cents must be between 0 and {MAX_PRICE_CENTS}"
        )));
    }
    Ok(())
}

/// Resolve the hold duration of a new option, defaulting and bounding it.
pub fn option_duration_days(requested: Option<i64>) -> Result<i64, CoreError> {
    let days = requested.unwrap_or(DEFAULT_OPTION_DAYS);
    if !(1..=MAX_OPTION_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "Option duration must be between 1 and {MAX_OPTION_DAYS} days"
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn lot_status_round_trip() {
        for s in VALID_LOT_STATUSES {
            assert_eq!(LotStatus::from_str_value(s).unwrap().as_str(), *s);
        }
        assert_matches!(validate_lot_status("loue"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn committed_statuses() {
        assert!(LotStatus::Vendu.is_committed());
        assert!(LotStatus::Reserve.is_committed());
        assert!(!LotStatus::Option.is_committed());
        assert!(!LotStatus::Disponible.is_committed());
    }

    #[test]
    fn option_duration_defaults_and_bounds() {
        assert_eq!(option_duration_days(None).unwrap(), DEFAULT_OPTION_DAYS);
        assert_eq!(option_duration_days(Some(30)).unwrap(), 30);
        assert!(option_duration_days(Some(0)).is_err());
        assert!(option_duration_days(Some(31)).is_err());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert_matches!(validate_price_cents(-500_00), Err(CoreError::Validation(_)));
        assert_matches!(validate_price_cents(i64::MAX), Err(CoreError::Validation(_)));
    }
}
