//! URL slug type and slug generation.
//!
//! Slugs identify products, categories, services, and pages in URLs. They
//! are generated from Turkish display names, so generation transliterates
//! the Turkish alphabet before applying the usual lowercase/hyphenate steps.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input produced an empty slug.
    #[error("slug cannot be empty")]
    Empty,
    /// The input contains characters outside `a-z0-9-`.
    #[error("slug contains invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// Generate a URL slug from a display name.
///
/// Transliterates Turkish characters (ç, ğ, ı, İ, ö, ş, ü and their
/// uppercase forms) to ASCII, lowercases, strips everything outside
/// `[a-z0-9\s-]`, converts whitespace runs to a single hyphen, and
/// collapses repeated hyphens.
///
/// This is a total function: empty or fully-stripped input yields an empty
/// string. Callers that need a usable slug should go through
/// [`Slug::from_display_name`], which rejects the empty result.
///
/// # Examples
///
/// ```
/// use carsi_core::slugify;
///
/// assert_eq!(slugify("İstanbul Çağrı"), "istanbul-cagri");
/// assert_eq!(slugify("  Multiple   Spaces "), "multiple-spaces");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    // Transliteration must happen before lowercasing: Rust lowercases 'İ'
    // to "i\u{307}" (combining dot above), which the strip step would
    // otherwise mangle.
    let transliterated: String = text.chars().map(transliterate).collect();
    let lowered = transliterated.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.trim().chars() {
        if c.is_whitespace() || c == '-' {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        }
        // Everything else is stripped.
    }

    slug
}

/// Map a single Turkish character to its ASCII equivalent.
const fn transliterate(c: char) -> char {
    match c {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'İ' => 'i',
        'ö' | 'Ö' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' => 'u',
        other => other,
    }
}

/// A non-empty URL slug.
///
/// ## Constraints
///
/// - Non-empty
/// - Only lowercase ASCII letters, digits, and hyphens
///
/// Uniqueness of slugs within a collection is enforced by the storage
/// layer, not by this type.
///
/// ## Examples
///
/// ```
/// use carsi_core::Slug;
///
/// assert!(Slug::parse("etiketler").is_ok());
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("Büyük").is_err());
///
/// let slug = Slug::from_display_name("Düğün Davetiyesi").unwrap();
/// assert_eq!(slug.as_str(), "dugun-davetiyesi");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a `Slug` from a string that is already in slug form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains characters
    /// outside `a-z0-9-`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(SlugError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a `Slug` from a display name via [`slugify`].
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if the name slugifies to nothing
    /// (e.g., it contains no transliterable characters at all).
    pub fn from_display_name(name: &str) -> Result<Self, SlugError> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(slug))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
