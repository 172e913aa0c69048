//! Save-payload validation
//!
//! Runs the `validator` derives and collapses failures into the fixed
//! validation-failed envelope: the first offending field (sorted by name so
//! the choice is deterministic) and its message.

use shared::error::AppError;
use validator::Validate;

/// Validate a payload, returning the single-field validation error the
/// console expects.
pub fn validate<T: Validate>(payload: &T) -> Result<(), AppError> {
    let errors = match payload.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    fields.sort();

    // field_errors() is non-empty whenever validate() fails
    let (field, message) = fields
        .into_iter()
        .next()
        .unwrap_or_else(|| ("unknown".to_string(), "invalid value".to_string()));

    Err(
        AppError::validation(format!("field: {field}; message: {message}"))
            .with_detail("field", field),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "must not be empty"))]
        title: String,
        #[validate(length(min = 1, message = "must not be empty"))]
        label: String,
    }

    #[test]
    fn test_valid_payload_passes() {
        let form = Form {
            title: "hello".into(),
            label: "x".into(),
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_first_field_reported_alphabetically() {
        let form = Form {
            title: String::new(),
            label: String::new(),
        };
        let err = validate(&form).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "field: label; message: must not be empty");
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            &serde_json::json!("label")
        );
    }

    #[test]
    fn test_single_invalid_field() {
        let form = Form {
            title: String::new(),
            label: "ok".into(),
        };
        let err = validate(&form).unwrap_err();
        assert_eq!(err.message, "field: title; message: must not be empty");
    }
}
