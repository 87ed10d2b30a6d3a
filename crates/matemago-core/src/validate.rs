use crate::{ExplanationRequest, FormError};

pub const MIN_AGE: u8 = 5;
pub const MAX_AGE: u8 = 15;

pub(crate) const MISSING_CONCEPT: &str = "el tema que quieres aprender";
pub(crate) const MISSING_AGE: &str = "tu edad";

/// Turns raw form input into a request, or explains what is missing.
///
/// Both fields are checked before reporting so the message can name every missing piece at once.
pub fn validate_form(concept: &str, age: &str) -> Result<ExplanationRequest, FormError> {
    let concept = concept.trim();
    let age = age.trim();

    let mut missing = Vec::new();
    if concept.is_empty() {
        missing.push(MISSING_CONCEPT);
    }
    if age.is_empty() {
        missing.push(MISSING_AGE);
    }
    if !missing.is_empty() {
        return Err(FormError::Missing {
            fields: missing.join(" y "),
        });
    }

    let parsed = age.parse::<i64>().map_err(|_| FormError::InvalidAge {
        value: age.to_string(),
    })?;
    let out_of_range = || FormError::AgeOutOfRange {
        age: parsed,
        min: MIN_AGE,
        max: MAX_AGE,
    };
    let age = u8::try_from(parsed).map_err(|_| out_of_range())?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(out_of_range());
    }

    ExplanationRequest::new(concept, age)
}
