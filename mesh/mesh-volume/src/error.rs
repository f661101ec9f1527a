//! Error types for volume and surface estimation.
//!
//! Estimation itself never fails: missing or malformed geometry degrades to
//! zero estimates. Errors only surface when reading a stored report.

use thiserror::Error;

/// Result type alias for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur when reading or loading a report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// The report has no selected method yet and must be recomputed.
    #[error("volume/surface report has not been computed (best method is still `Best`)")]
    NotComputed,

    /// A record line could not be split into key and value.
    #[error("malformed record line: {line:?}")]
    MalformedRecord {
        /// The offending line, trimmed.
        line: String,
    },

    /// A record value could not be parsed for its key.
    #[error("invalid value {value:?} for key `{key}`")]
    InvalidValue {
        /// Record key.
        key: String,
        /// Raw value text.
        value: String,
    },
}

impl VolumeError {
    /// Create a malformed record error.
    #[must_use]
    pub fn malformed_record(line: impl Into<String>) -> Self {
        Self::MalformedRecord { line: line.into() }
    }

    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VolumeError::NotComputed;
        assert!(format!("{err}").contains("not been computed"));

        let err = VolumeError::malformed_record("meshVolume 12");
        assert!(format!("{err}").contains("meshVolume 12"));

        let err = VolumeError::invalid_value("boundsSurface", "abc");
        let text = format!("{err}");
        assert!(text.contains("boundsSurface"));
        assert!(text.contains("abc"));
    }
}
