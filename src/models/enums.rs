use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Coarse risk level assigned to a symptom description.
    ///
    /// Ordering is meaningful (`Low < Medium < High`) and drives the y-axis of
    /// the trend chart. Storage uses the lower-case form, JSON uses the variant
    /// name.
    #[derive(Copy, PartialOrd, Ord, Hash)]
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

impl RiskLevel {
    /// All levels in ascending order.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Patient-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Position on the ordinal axis, `Low = 0`.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn risk_level_round_trip() {
        for (variant, s) in [
            (RiskLevel::Low, "low"),
            (RiskLevel::Medium, "medium"),
            (RiskLevel::High, "high"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RiskLevel::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        let mut levels = vec![RiskLevel::High, RiskLevel::Low, RiskLevel::Medium];
        levels.sort();
        assert_eq!(levels, RiskLevel::ALL.to_vec());
    }

    #[test]
    fn ordinal_follows_ordering() {
        let ordinals: Vec<u8> = RiskLevel::ALL.iter().map(|l| l.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(RiskLevel::from_str("High").is_err());
        assert!(RiskLevel::from_str("").is_err());
        assert!(RiskLevel::from_str("critical").is_err());
    }
}
