//! Per-call conversion options.
//!
//! [`ConversionOptions`] carries the strftime patterns used for dates and date-times. A
//! pattern applies to every temporal value reached during one marshal or unmarshal call;
//! there are no per-field overrides.
//!
//! ## Examples
//!
//! ```rust
//! use recmarshal::ConversionOptions;
//!
//! let options = ConversionOptions::new()
//!     .with_datetime_pattern("%d %b %Y %H:%M")
//!     .with_date_pattern("%d/%m/%Y");
//! assert_eq!(options.datetime_pattern(), Some("%d %b %Y %H:%M"));
//! assert!(options.validate().is_ok());
//! ```

use crate::error::{Error, Result};
use crate::temporal;

/// Configuration threaded through one marshal or unmarshal call.
///
/// Without patterns, dates use `%Y-%m-%d` and date-times an ISO-8601 form such as
/// `2020-06-11T14:32:00`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    pub datetime_pattern: Option<String>,
    pub date_pattern: Option<String>,
}

impl ConversionOptions {
    /// Creates options that use the default temporal representations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recmarshal::ConversionOptions;
    ///
    /// let options = ConversionOptions::new();
    /// assert!(options.datetime_pattern().is_none());
    /// assert!(options.date_pattern().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strftime pattern for date-time values.
    #[must_use]
    pub fn with_datetime_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.datetime_pattern = Some(pattern.into());
        self
    }

    /// Sets the strftime pattern for date-only values.
    #[must_use]
    pub fn with_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn datetime_pattern(&self) -> Option<&str> {
        self.datetime_pattern.as_deref()
    }

    #[must_use]
    pub fn date_pattern(&self) -> Option<&str> {
        self.date_pattern.as_deref()
    }

    /// Checks that both patterns only use recognised strftime specifiers.
    ///
    /// Called at the start of every conversion, so a bad pattern fails the call before
    /// any value is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the offending pattern.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recmarshal::{ConversionOptions, ErrorKind};
    ///
    /// let err = ConversionOptions::new()
    ///     .with_date_pattern("%Y-%Q")
    ///     .validate()
    ///     .unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn validate(&self) -> Result<()> {
        let patterns = [
            ("datetime_pattern", self.datetime_pattern()),
            ("date_pattern", self.date_pattern()),
        ];
        for (name, pattern) in patterns {
            if let Some(pattern) = pattern {
                if !temporal::is_valid_pattern(pattern) {
                    return Err(Error::configuration(
                        "ConversionOptions",
                        format!("{} `{}` is not a valid strftime pattern", name, pattern),
                    ));
                }
            }
        }
        Ok(())
    }
}
