//! Error types for carousel configuration.
//!
//! Only configuration can fail.  Everything on the scroll path degrades to
//! a sensible value instead.

/// Result type alias for carousel configuration.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Errors raised when applying options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CarouselError {
    /// Cell width must be a finite, strictly positive number.
    #[error("invalid cell extent {0}: must be finite and greater than zero")]
    InvalidCellExtent(f64),

    /// Viewport width must be finite and not negative.
    #[error("invalid viewport width {0}")]
    InvalidViewport(f64),

    /// A size or distance option was negative or not finite.
    #[error("invalid value for '{option}': {value}")]
    InvalidOption { option: &'static str, value: f64 },
}
