/// Error returned when the input to a statistics builder is unusable.
///
/// These are usage errors: they are surfaced to the caller immediately and
/// never retried or suppressed inside the crate.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidInputError {
    /// The series contains no values.
    #[display("series must contain at least one value")]
    EmptySeries,
    /// An explicit class count smaller than 1 was supplied.
    #[display("class count must be at least 1 (got {class_count})")]
    InvalidClassCount { class_count: usize },
    /// The series contains NaN or an infinity.
    #[display("value at index {index} is not finite ({value})")]
    NonFiniteValue { index: usize, value: f64 },
}

/// Checks the preconditions shared by every builder in this crate.
pub(crate) fn validate_series(values: &[f64]) -> Result<(), InvalidInputError> {
    if values.is_empty() {
        return Err(InvalidInputError::EmptySeries);
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(InvalidInputError::NonFiniteValue { index, value });
    }
    Ok(())
}
