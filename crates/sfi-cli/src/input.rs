//! Parsing of JSON attribute objects passed on the command line.

use serde_json::Value;
use sfi::{Attributes, SfiError};

/// Parses `text` as a JSON object whose values are all strings.
///
/// `what` names the argument in error messages.
pub fn parse_attribute_object(text: &str, what: &str) -> Result<Attributes, SfiError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SfiError::validation(format!("{what} is not valid JSON: {e}")))?;

    let Value::Object(object) = value else {
        return Err(SfiError::validation(format!(
            "{what} must be a JSON object of group to value"
        )));
    };

    object
        .into_iter()
        .map(|(group, value)| match value {
            Value::String(value) => Ok((group, value)),
            other => Err(SfiError::validation(format!(
                "{what} value for {group:?} must be a string, got {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfi::ErrorKind;

    #[test]
    fn parses_string_object() {
        let attrs = parse_attribute_object(r#"{"origin": "Chicago", "status": "Delayed"}"#, "criteria")
            .unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["origin"], "Chicago");
    }

    #[test]
    fn empty_object_is_accepted() {
        assert!(parse_attribute_object("{}", "criteria").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_shapes() {
        for text in ["not json", "[1, 2]", "\"origin\"", r#"{"origin": 5}"#, r#"{"origin": null}"#] {
            let err = parse_attribute_object(text, "criteria").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{text}");
            assert!(err.to_string().contains("criteria"), "{text}");
        }
    }
}
