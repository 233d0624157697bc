//! HTML form inputs and their conversion into validated payloads.

use validator::ValidationErrors;

pub mod applications;
pub mod auth;
pub mod campaigns;
pub mod profiles;

/// Names of the fields that failed validation, sorted.
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        title: String,
        #[validate(range(min = 0))]
        budget: i64,
    }

    #[test]
    fn lists_failing_fields_in_order() {
        let sample = Sample {
            title: String::new(),
            budget: -1,
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["budget", "title"]);
    }
}
