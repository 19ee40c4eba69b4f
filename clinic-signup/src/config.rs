use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Maximum number of people assignable to a single date (always >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "usize")]
pub struct Capacity(usize);

impl Capacity {
    pub fn new(value: i64) -> Result<Self, ConfigurationError> {
        if value < 1 {
            return Err(ConfigurationError::NotPositive(value));
        }
        usize::try_from(value)
            .map(Capacity)
            .map_err(|_| ConfigurationError::NotPositive(value))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for Capacity {
    type Error = ConfigurationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Capacity::new(value)
    }
}

impl From<Capacity> for usize {
    fn from(capacity: Capacity) -> usize {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Capacity {
    type Err = ConfigurationError;

    /// Accepts integers and, like the sheet cell it replaces, floors fractional numbers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::MissingCapacity);
        }
        if let Ok(whole) = trimmed.parse::<i64>() {
            return Capacity::new(whole);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Capacity::new(value.floor() as i64),
            _ => Err(ConfigurationError::NotNumeric(trimmed.to_string())),
        }
    }
}

/// Picks the capacity for a run: an explicit value wins over the roster cell
///
/// A blank explicit value (an empty form field or `SIGNUP_CAPACITY=`) counts as absent.
pub fn resolve_capacity(
    explicit: Option<&str>,
    from_roster: Option<&str>,
) -> Result<Capacity, ConfigurationError> {
    let explicit = explicit.filter(|raw| !raw.trim().is_empty());
    match explicit.or(from_roster) {
        Some(raw) => raw.parse(),
        None => Err(ConfigurationError::MissingCapacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_integers() {
        assert_eq!("2".parse::<Capacity>().unwrap().get(), 2);
        assert_eq!(" 15 ".parse::<Capacity>().unwrap().get(), 15);
        assert_eq!(Capacity::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_fraction_is_floored() {
        assert_eq!("3.9".parse::<Capacity>().unwrap().get(), 3);
        assert_eq!(
            "0.5".parse::<Capacity>(),
            Err(ConfigurationError::NotPositive(0))
        );
    }

    #[test]
    fn test_rejects_zero_negative_and_text() {
        assert_eq!(Capacity::new(0), Err(ConfigurationError::NotPositive(0)));
        assert_eq!("-4".parse::<Capacity>(), Err(ConfigurationError::NotPositive(-4)));
        assert_eq!(
            "lots".parse::<Capacity>(),
            Err(ConfigurationError::NotNumeric("lots".to_string()))
        );
        assert_eq!(
            "NaN".parse::<Capacity>(),
            Err(ConfigurationError::NotNumeric("NaN".to_string()))
        );
        assert_eq!("".parse::<Capacity>(), Err(ConfigurationError::MissingCapacity));
    }

    #[test]
    fn test_resolve_prefers_explicit_value() {
        assert_eq!(resolve_capacity(Some("4"), Some("2")).unwrap().get(), 4);
        assert_eq!(resolve_capacity(None, Some("2")).unwrap().get(), 2);
        assert_eq!(resolve_capacity(None, None), Err(ConfigurationError::MissingCapacity));
    }

    #[test]
    fn test_resolve_ignores_blank_explicit_value() {
        assert_eq!(resolve_capacity(Some(""), Some("2")).unwrap().get(), 2);
        assert_eq!(resolve_capacity(Some("  "), Some("5")).unwrap().get(), 5);
        assert_eq!(
            resolve_capacity(Some(""), None),
            Err(ConfigurationError::MissingCapacity)
        );
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Capacity>("0").is_err());
        assert_eq!(serde_json::from_str::<Capacity>("3").unwrap().get(), 3);
        assert_eq!(serde_json::to_string(&Capacity::new(3).unwrap()).unwrap(), "3");
    }
}
