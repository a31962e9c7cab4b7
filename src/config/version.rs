//! RingPlus API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// RingPlus API version.
///
/// The public API has a single stable version. `Custom` covers versions the
/// crate does not know about yet; it is rendered as `v{n}` in request paths.
///
/// # Example
///
/// ```rust
/// use ringplus::ApiVersion;
///
/// let version: ApiVersion = "1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(version.to_string(), "v1");
///
/// let future: ApiVersion = "v2".parse().unwrap();
/// assert_eq!(future, ApiVersion::Custom(2));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// API version 1.
    #[default]
    V1,
    /// Any other numeric version.
    Custom(u32),
}

impl ApiVersion {
    /// Returns the latest version known to this crate.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1
    }

    /// Returns the numeric version.
    #[must_use]
    pub const fn number(&self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::Custom(n) => *n,
        }
    }

    /// Returns `true` if this version is known to this crate.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::V1)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        match digits.parse::<u32>() {
            Ok(1) => Ok(Self::V1),
            Ok(n) if n > 0 => Ok(Self::Custom(n)),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}
