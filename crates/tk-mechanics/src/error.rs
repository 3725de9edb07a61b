//! Error types for the mechanics engine.

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// Errors that can occur during attack resolution.
///
/// These indicate malformed attack *definitions*, not malformed runtime
/// data; callers may treat them as programmer errors.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice count or die size of zero was requested.
    #[error("invalid dice spec: {count}d{sides}")]
    InvalidDiceSpec {
        /// The requested dice count.
        count: u32,
        /// The requested die size.
        sides: u32,
    },
}
