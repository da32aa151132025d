//! Error types for percentile computation

/// Error returned when no valid numeric data remains after cleaning
///
/// Both variants map to the same failure condition — the working sequence
/// is empty — but they are kept distinct for diagnostics: an empty input
/// and an input whose every element was filtered out are different caller
/// mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputError {
    /// The input sequence contained no elements
    EmptyInput,
    /// Every element was a missing marker or a non-finite value
    AllFiltered,
}

impl core::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidInputError::EmptyInput => {
                write!(f, "cannot calculate percentiles: input is empty")
            }
            InvalidInputError::AllFiltered => {
                write!(
                    f,
                    "cannot calculate percentiles: no valid numeric data after filtering"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidInputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let empty = InvalidInputError::EmptyInput;
        let filtered = InvalidInputError::AllFiltered;

        assert_eq!(
            empty.to_string(),
            "cannot calculate percentiles: input is empty"
        );
        assert_eq!(
            filtered.to_string(),
            "cannot calculate percentiles: no valid numeric data after filtering"
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_is_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(InvalidInputError::EmptyInput);
        assert!(err.to_string().contains("empty"));
    }
}
