//! Language code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`LangCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum LangCodeError {
    /// The input string is empty.
    #[error("language code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("language code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters outside `a-z` / `A-Z` / `-`.
    #[error("language code contains invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// A lowercase language code such as `"tr"`, `"en"`, or `"en-gb"`.
///
/// Localized content is keyed on this type, and fallback chains are ordered
/// sequences of it. Parsing normalizes to lowercase so that `"TR"` and
/// `"tr"` compare equal.
///
/// ## Examples
///
/// ```
/// use carsi_core::LangCode;
///
/// let tr = LangCode::parse("TR").unwrap();
/// assert_eq!(tr.as_str(), "tr");
/// assert!(LangCode::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LangCode(String);

impl LangCode {
    /// Maximum length of a language code (BCP 47 primary tag plus region).
    pub const MAX_LENGTH: usize = 8;

    /// Parse a `LangCode` from a string, normalizing to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains characters other than ASCII
    /// letters and `-`.
    pub fn parse(s: &str) -> Result<Self, LangCodeError> {
        if s.is_empty() {
            return Err(LangCodeError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(LangCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s.chars().find(|c| !c.is_ascii_alphabetic() && *c != '-') {
            return Err(LangCodeError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the language code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `LangCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LangCode {
    type Err = LangCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LangCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for LangCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for LangCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for LangCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
