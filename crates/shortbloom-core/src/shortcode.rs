use crate::error::{CoreError, Result};
use std::fmt::Display;

/// Length of every short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// A validated short code identifier for a shortened URL.
///
/// Short codes are exactly [`SHORT_CODE_LENGTH`] characters drawn from
/// `[A-Za-z0-9]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Parses a short code from a request path.
    ///
    /// At most one leading `/` is stripped before validation, so both
    /// `"/abc123"` and `"abc123"` are accepted while `"//abc123"` is not.
    pub fn from_path(path: &str) -> Result<Self> {
        let code = path.strip_prefix('/').unwrap_or(path);
        Self::new(code)
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the raw bytes of the code, as fed to the membership filter.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn validate(code: &str) -> Result<()> {
        if code.len() != SHORT_CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be {}, got {}",
                SHORT_CODE_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abc123").is_ok());
        assert!(ShortCode::new("ABCxyz").is_ok());
        assert!(ShortCode::new("000000").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(ShortCode::new("").is_err());
        assert!(ShortCode::new("abc12").is_err());
        assert!(ShortCode::new("abc1234").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc-12").is_err());
        assert!(ShortCode::new("abc_12").is_err());
        assert!(ShortCode::new("abc 12").is_err());
        assert!(ShortCode::new("abc/12").is_err());
        // multi-byte characters must not sneak past the length check
        assert!(ShortCode::new("abcdé").is_err());
        assert!(ShortCode::new("abcdeé").is_err());
    }

    #[test]
    fn from_path_strips_single_separator() {
        assert_eq!(ShortCode::from_path("/abc123").unwrap().as_str(), "abc123");
        assert_eq!(ShortCode::from_path("abc123").unwrap().as_str(), "abc123");
        assert!(ShortCode::from_path("//abc123").is_err());
        assert!(ShortCode::from_path("/").is_err());
        assert!(ShortCode::from_path("/abc123/").is_err());
    }

    #[test]
    fn display_and_bytes() {
        let code = ShortCode::new("Zz9Aa0").unwrap();
        assert_eq!(code.to_string(), "Zz9Aa0");
        assert_eq!(code.as_bytes(), b"Zz9Aa0");
    }

    #[test]
    fn to_url_joins_with_single_slash() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("https://sb.link"), "https://sb.link/abc123");
        assert_eq!(code.to_url("https://sb.link/"), "https://sb.link/abc123");
    }
}
