//! Error handling for mixtips
//!
//! Every failure carries a stable code and recovery suggestions so callers
//! can surface it without matching on message text.

use thiserror::Error;

/// Result type alias for mixtips operations
pub type Result<T> = std::result::Result<T, MixError>;

/// Main error type for mixtips operations
#[derive(Error, Debug)]
pub enum MixError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // Decode Errors
    #[error("Could not decode audio: {reason}")]
    Decode {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Audio contains no samples")]
    EmptyAudio,

    // Invariant violations
    #[error("Metric '{metric}' is not finite ({value})")]
    NonFiniteMetric { metric: &'static str, value: f64 },

    // Submission Errors
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error("Self rating must be between 1 and 10, got {rating}")]
    InvalidRating { rating: u8 },

    #[error("No record for {email} with file hash '{file_hash}'")]
    RecordNotFound { email: String, file_hash: String },

    // Configuration Errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MixError {
    /// Wrap a decoder failure, keeping the original cause
    pub(crate) fn decode<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MixError::Decode {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MixError::FileNotFound { .. } => "FILE_NOT_FOUND",
            MixError::Decode { .. } => "DECODE_ERROR",
            MixError::EmptyAudio => "EMPTY_AUDIO",
            MixError::NonFiniteMetric { .. } => "NON_FINITE_METRIC",
            MixError::InvalidEmail { .. } => "INVALID_EMAIL",
            MixError::InvalidRating { .. } => "INVALID_RATING",
            MixError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            MixError::Config { .. } => "CONFIG_ERROR",
            MixError::Io(_) => "IO_ERROR",
            MixError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error is caused by the user's input rather than a defect
    ///
    /// Decode and empty-audio failures are reported the same way to users.
    /// A non-finite metric is never user-facing.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            MixError::FileNotFound { .. }
                | MixError::Decode { .. }
                | MixError::EmptyAudio
                | MixError::InvalidEmail { .. }
                | MixError::InvalidRating { .. }
                | MixError::RecordNotFound { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            MixError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            MixError::Decode { .. } => vec![
                "Upload a WAV or MP3 file",
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from your DAW",
            ],
            MixError::EmptyAudio => vec![
                "The file decoded to zero samples",
                "Re-export the mix and make sure the render range is not empty",
            ],
            MixError::InvalidEmail { .. } => vec!["Enter an address like name@example.com"],
            MixError::InvalidRating { .. } => vec!["Pick a rating from 1 to 10"],
            MixError::RecordNotFound { .. } => vec![
                "Submit the file for analysis before leaving feedback",
                "Use the file hash printed by the submit command",
            ],
            MixError::Config { .. } => vec![
                "Check the configuration file is valid JSON",
                "Remove the file to fall back to the defaults",
            ],
            _ => vec![],
        }
    }

    /// Get a user-friendly message for this error
    pub fn friendly_message(&self) -> String {
        match self {
            MixError::Decode { .. } | MixError::EmptyAudio => {
                format!("Unsupported or corrupted file ({})", self)
            }
            MixError::InvalidEmail { .. } => "Please enter a valid email address.".to_string(),
            MixError::NonFiniteMetric { metric, .. } => format!(
                "Something went wrong while measuring '{}'. This is a bug, please report it.",
                metric
            ),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = MixError::FileNotFound {
            path: "mix.wav".to_string(),
            source: None,
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert_eq!(MixError::EmptyAudio.error_code(), "EMPTY_AUDIO");
    }

    #[test]
    fn test_decode_and_empty_are_user_facing() {
        let decode = MixError::Decode {
            reason: "bad header".to_string(),
            source: None,
        };
        assert!(decode.is_user_facing());
        assert!(MixError::EmptyAudio.is_user_facing());
        assert!(decode.friendly_message().starts_with("Unsupported or corrupted file"));
        assert!(!decode.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_invariant_violation_is_a_defect() {
        let err = MixError::NonFiniteMetric {
            metric: "rms",
            value: f64::NAN,
        };
        assert!(!err.is_user_facing());
        assert!(err.friendly_message().contains("bug"));
    }

    #[test]
    fn test_decode_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated chunk");
        let err = MixError::decode("broken WAV", io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("broken WAV"));
    }
}
