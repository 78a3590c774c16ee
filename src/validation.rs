//! Label validation.

/// Why a label was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Nothing but whitespace was entered.
    #[error("label is empty")]
    Empty,

    /// The trimmed label is longer than allowed.
    #[error("label is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    /// The label contains a control character such as a tab.
    #[error("label contains control characters")]
    ControlCharacter,
}

/// Decides whether entered text may become a tag.
pub trait Validator {
    fn validate(&self, text: &str) -> Result<(), ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(&str) -> Result<(), ValidationError>,
{
    fn validate(&self, text: &str) -> Result<(), ValidationError> {
        self(text)
    }
}

/// Default rules: non-empty after trimming, bounded length, printable.
#[derive(Debug, Clone, Copy)]
pub struct LabelValidator {
    max_len: usize,
}

impl LabelValidator {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Validator for LabelValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        let len = trimmed.chars().count();
        if len > self.max_len {
            return Err(ValidationError::TooLong {
                len,
                max: self.max_len,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::ControlCharacter);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_validator() {
        let validator = LabelValidator::new(5);

        assert_eq!(validator.validate("cat"), Ok(()));
        assert_eq!(validator.validate("  cat  "), Ok(()));
        assert_eq!(validator.validate("héllo"), Ok(()));

        assert_eq!(validator.validate(""), Err(ValidationError::Empty));
        assert_eq!(validator.validate("   "), Err(ValidationError::Empty));
        assert_eq!(
            validator.validate("kitten"),
            Err(ValidationError::TooLong { len: 6, max: 5 })
        );
        assert_eq!(
            validator.validate("a\tb"),
            Err(ValidationError::ControlCharacter)
        );
    }

    #[test]
    fn test_closure_validator() {
        let only_caps = |text: &str| {
            if text.chars().all(|c| c.is_ascii_uppercase()) {
                Ok(())
            } else {
                Err(ValidationError::ControlCharacter)
            }
        };
        assert!(only_caps.validate("ABC").is_ok());
        assert!(only_caps.validate("abc").is_err());
    }
}
