/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when constructing or parsing core types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A dice specification string could not be parsed.
    #[error("invalid dice spec: \"{0}\"")]
    InvalidDiceSpec(String),

    /// A dice expression string could not be parsed.
    #[error("invalid dice expression: \"{0}\"")]
    InvalidDiceExpression(String),

    /// A damage type name is not one of the known types.
    #[error("unknown damage type: \"{0}\"")]
    UnknownDamageType(String),
}
