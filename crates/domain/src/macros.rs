//! Macro for implementing string conversions on wire enums
//!
//! Several domain enums travel as plain strings (transaction types, budget
//! periods, alert severities). This macro gives each of them a single source
//! of truth for the string form: `as_str`, `Display`, case-insensitive
//! `FromStr`, and an `ALL` slice listing every variant.
//!
//! # Example
//!
//! ```rust
//! use authconsole_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Inbound,
//!     Outbound,
//! }
//!
//! impl_wire_enum_conversions!(Direction {
//!     Inbound => "inbound",
//!     Outbound => "outbound",
//! });
//!
//! assert_eq!(Direction::Outbound.as_str(), "outbound");
//! assert_eq!("INBOUND".parse::<Direction>().unwrap(), Direction::Inbound);
//! assert_eq!(Direction::ALL.len(), 2);
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a fieldless enum
///
/// The string given for each variant must be lowercase; parsing lowercases
/// its input before matching.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation of this variant
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cadence {
        Daily,
        Weekly,
        Monthly,
    }

    impl_wire_enum_conversions!(Cadence {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    });

    #[test]
    fn display_uses_wire_string() {
        assert_eq!(Cadence::Daily.to_string(), "daily");
        assert_eq!(Cadence::Monthly.as_str(), "monthly");
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(Cadence::from_str("WEEKLY").unwrap(), Cadence::Weekly);
        assert_eq!(Cadence::from_str(" Monthly ").unwrap(), Cadence::Monthly);
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        let err = Cadence::from_str("hourly").unwrap_err();
        assert!(err.contains("Invalid Cadence: hourly"));
        assert!(Cadence::from_str("").is_err());
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(Cadence::ALL, &[Cadence::Daily, Cadence::Weekly, Cadence::Monthly]);
        for cadence in Cadence::ALL {
            assert_eq!(Cadence::from_str(cadence.as_str()).unwrap(), *cadence);
        }
    }
}
