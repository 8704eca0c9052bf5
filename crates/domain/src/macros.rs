//! Display / FromStr generation for string-backed enums
//!
//! Google APIs and the config file spell enum values as lowercase strings
//! (`"confirmed"`, `"json"`). The macro keeps the mapping in one place and
//! makes parsing case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use daybrief_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Private,
//! }
//!
//! impl_domain_status_conversions!(Visibility {
//!     Public => "public",
//!     Private => "private",
//! });
//!
//! assert_eq!("PUBLIC".parse::<Visibility>(), Ok(Visibility::Public));
//! ```

/// Implements `Display` and `FromStr` for a fieldless enum
///
/// * `Display` writes the mapped lowercase string
/// * `FromStr` lowercases its input before matching and returns
///   `Err("Invalid <Enum>: <input>")` for anything else
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
