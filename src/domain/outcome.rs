use serde::{Deserialize, Serialize};

/// Aggregated verdict of one or more validations.
///
/// `combine` is associative and `ValidationOutcome::valid()` is its identity,
/// so rule results can be folded in any grouping without changing the final
/// verdict or the order of accumulated messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self::invalid_many(vec![error.into()])
    }

    pub fn invalid_many(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn combine(mut self, other: ValidationOutcome) -> ValidationOutcome {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    /// Errors joined for log lines and refusal messages.
    pub fn summary(&self) -> String {
        if self.valid {
            "valid".to_string()
        } else {
            self.errors.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_associative() {
        let a = ValidationOutcome::invalid("first");
        let b = ValidationOutcome::valid().with_warning("heads up");
        let c = ValidationOutcome::invalid("second");

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));

        assert_eq!(left, right);
        assert_eq!(left.errors(), ["first", "second"]);
        assert_eq!(left.warnings(), ["heads up"]);
    }

    #[test]
    fn all_valid_is_the_identity() {
        let outcome = ValidationOutcome::invalid("broken").with_warning("note");

        assert_eq!(
            ValidationOutcome::valid().combine(outcome.clone()),
            outcome.clone()
        );
        assert_eq!(outcome.clone().combine(ValidationOutcome::valid()), outcome);
    }

    #[test]
    fn valid_combined_with_invalid_is_invalid() {
        let combined = ValidationOutcome::valid().combine(ValidationOutcome::invalid("nope"));
        assert!(!combined.is_valid());
        assert_eq!(combined.errors(), ["nope"]);
    }
}
