//! Unified error handling for the trailmend library.
//!
//! The repair core itself is total: degenerate input yields a zero-length,
//! HIGH-quality result rather than an error, and a transform that cannot
//! apply is a normal skip. Errors exist only at the boundaries — hints
//! parsing, catalog serialization, geometry loading.

use std::fmt;

/// Unified error type for trailmend operations.
#[derive(Debug, Clone)]
pub enum TrailMendError {
    /// Trail has insufficient points for a boundary operation
    InsufficientPoints {
        trail_id: String,
        point_count: usize,
        minimum_required: usize,
    },
    /// Trail has invalid GPS coordinates
    InvalidCoordinates { trail_id: String, message: String },
    /// Reference distance is missing or non-positive
    InvalidReference { trail_id: String, reference_km: f64 },
    /// Hints table could not be parsed
    HintsError { message: String },
    /// Catalog/record serialization error
    CatalogError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Generic internal error
    Internal { message: String },
}

impl fmt::Display for TrailMendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailMendError::InsufficientPoints {
                trail_id,
                point_count,
                minimum_required,
            } => {
                write!(
                    f,
                    "Trail '{}' has {} points, minimum {} required",
                    trail_id, point_count, minimum_required
                )
            }
            TrailMendError::InvalidCoordinates { trail_id, message } => {
                write!(f, "Trail '{}' has invalid coordinates: {}", trail_id, message)
            }
            TrailMendError::InvalidReference {
                trail_id,
                reference_km,
            } => {
                write!(
                    f,
                    "Trail '{}' has invalid reference distance {:.3} km",
                    trail_id, reference_km
                )
            }
            TrailMendError::HintsError { message } => {
                write!(f, "Hints error: {}", message)
            }
            TrailMendError::CatalogError { message } => {
                write!(f, "Catalog error: {}", message)
            }
            TrailMendError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            TrailMendError::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for TrailMendError {}

/// Result type alias for trailmend operations.
pub type Result<T> = std::result::Result<T, TrailMendError>;

/// Extension trait for converting Option to TrailMendError.
pub trait OptionExt<T> {
    /// Convert Option to Result with insufficient points error.
    fn ok_or_insufficient_points(
        self,
        trail_id: &str,
        point_count: usize,
        minimum: usize,
    ) -> Result<T>;

    /// Convert Option to Result with generic internal error.
    fn ok_or_internal(self, message: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_insufficient_points(
        self,
        trail_id: &str,
        point_count: usize,
        minimum: usize,
    ) -> Result<T> {
        self.ok_or_else(|| TrailMendError::InsufficientPoints {
            trail_id: trail_id.to_string(),
            point_count,
            minimum_required: minimum,
        })
    }

    fn ok_or_internal(self, message: &str) -> Result<T> {
        self.ok_or_else(|| TrailMendError::Internal {
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrailMendError::InsufficientPoints {
            trail_id: "gr20".to_string(),
            point_count: 1,
            minimum_required: 2,
        };
        assert!(err.to_string().contains("gr20"));
        assert!(err.to_string().contains("1 points"));
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        let result = none.ok_or_insufficient_points("gr20", 0, 2);
        assert!(matches!(
            result,
            Err(TrailMendError::InsufficientPoints { .. })
        ));
    }
}
