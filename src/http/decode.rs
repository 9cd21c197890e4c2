//! Decode-or-fail step for HTTP request bodies.
//!
//! Bodies are parsed into a generic JSON value first so that every failure
//! can be reported with the location of the offending field, in the
//! `{"detail": [...]}` shape HTTP clients of echo fixtures already expect.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::EchoRequest;

/// Why a request body could not be turned into an [`EchoRequest`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body is required")]
    MissingBody,

    #[error("JSON decode error at byte {offset}: {reason}")]
    InvalidJson { offset: usize, reason: String },

    #[error("request body must be a JSON object")]
    NotAnObject { input: Value },

    #[error("field `{field}` is required")]
    Missing {
        field: &'static str,
        input: Map<String, Value>,
    },

    #[error("field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        input: Value,
    },
}

/// One entry of the `detail` array in a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<Value>,
    pub msg: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl ValidationError {
    pub fn detail(&self) -> ErrorDetail {
        match self {
            ValidationError::MissingBody => ErrorDetail {
                kind: "missing",
                loc: vec![json!("body")],
                msg: "Field required".to_string(),
                input: Value::Null,
                ctx: None,
            },
            ValidationError::InvalidJson { offset, reason } => ErrorDetail {
                kind: "json_invalid",
                loc: vec![json!("body"), json!(offset)],
                msg: "JSON decode error".to_string(),
                input: json!({}),
                ctx: Some(json!({ "error": reason })),
            },
            ValidationError::NotAnObject { input } => ErrorDetail {
                kind: "model_attributes_type",
                loc: vec![json!("body")],
                msg: "Input should be a valid dictionary or object to extract fields from"
                    .to_string(),
                input: input.clone(),
                ctx: None,
            },
            ValidationError::Missing { field, input } => ErrorDetail {
                kind: "missing",
                loc: vec![json!("body"), json!(field)],
                msg: "Field required".to_string(),
                input: Value::Object(input.clone()),
                ctx: None,
            },
            ValidationError::WrongType {
                field,
                expected,
                input,
            } => ErrorDetail {
                kind: "string_type",
                loc: vec![json!("body"), json!(field)],
                msg: format!("Input should be a valid {}", expected),
                input: input.clone(),
                ctx: None,
            },
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let body = json!({ "detail": [self.detail()] });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

/// Decode a raw body into an [`EchoRequest`].
///
/// Unknown fields are ignored.
pub fn decode_echo_request(body: &[u8]) -> Result<EchoRequest, ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::MissingBody);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::InvalidJson {
            offset: byte_offset(body, e.line(), e.column()),
            reason: e.to_string(),
        })?;

    let mut fields = match value {
        Value::Object(fields) => fields,
        other => return Err(ValidationError::NotAnObject { input: other }),
    };

    match fields.remove("message") {
        Some(Value::String(message)) => Ok(EchoRequest { message }),
        Some(other) => Err(ValidationError::WrongType {
            field: "message",
            expected: "string",
            input: other,
        }),
        None => Err(ValidationError::Missing {
            field: "message",
            input: fields,
        }),
    }
}

/// serde_json reports 1-based lines and columns; callers want a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (preceding + column.saturating_sub(1)).min(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_body() {
        let request = decode_echo_request(br#"{"message":"hi"}"#).unwrap();
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let request = decode_echo_request(br#"{"message":"hi","extra":1}"#).unwrap();
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn test_decode_missing_message() {
        let err = decode_echo_request(b"{}").unwrap_err();
        assert!(matches!(err, ValidationError::Missing { field: "message", .. }));

        let detail = err.detail();
        assert_eq!(detail.kind, "missing");
        assert_eq!(detail.loc, vec![json!("body"), json!("message")]);
        assert_eq!(detail.msg, "Field required");
        assert_eq!(detail.input, json!({}));
    }

    #[test]
    fn test_decode_wrong_type() {
        let err = decode_echo_request(br#"{"message": 42}"#).unwrap_err();
        let detail = err.detail();
        assert_eq!(detail.kind, "string_type");
        assert_eq!(detail.loc, vec![json!("body"), json!("message")]);
        assert_eq!(detail.input, json!(42));
    }

    #[test]
    fn test_decode_null_message_is_wrong_type() {
        let err = decode_echo_request(br#"{"message": null}"#).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
    }

    #[test]
    fn test_decode_not_an_object() {
        let err = decode_echo_request(br#"["hi"]"#).unwrap_err();
        assert_eq!(err.detail().kind, "model_attributes_type");
        assert_eq!(err.detail().loc, vec![json!("body")]);
    }

    #[test]
    fn test_decode_empty_body() {
        let err = decode_echo_request(b"").unwrap_err();
        assert_eq!(err, ValidationError::MissingBody);

        let detail = err.detail();
        assert_eq!(detail.kind, "missing");
        assert_eq!(detail.loc, vec![json!("body")]);
        assert_eq!(detail.input, Value::Null);
    }

    #[test]
    fn test_decode_whitespace_body_is_invalid_json() {
        let err = decode_echo_request(b"  ").unwrap_err();
        assert_eq!(err.detail().kind, "json_invalid");
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode_echo_request(b"{\"message\": }").unwrap_err();
        match &err {
            ValidationError::InvalidJson { offset, .. } => assert_eq!(*offset, 12),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.detail().kind, "json_invalid");
    }

    #[test]
    fn test_byte_offset_multiline() {
        let body = b"{\n  \"message\": x\n}";
        // line 2, column 14 points at the `x`
        assert_eq!(byte_offset(body, 2, 14), 15);
        assert_eq!(body[15], b'x');
    }
}
