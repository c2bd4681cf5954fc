//! Response payload classification and envelope normalization.

use serde_json::{json, Value};

/// Payload returned by a response producer, classified at the handler
/// boundary.
///
/// Producers may return either a bare payload or a complete response
/// envelope. An object carrying a `code` field is treated as an envelope and
/// passed through untouched; everything else (including null) is wrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Enveloped(Value),
    Raw(Value),
}

impl ResponseBody {
    pub fn classify(value: Value) -> Self {
        let is_envelope = value
            .as_object()
            .is_some_and(|object| object.contains_key("code"));
        if is_envelope {
            ResponseBody::Enveloped(value)
        } else {
            ResponseBody::Raw(value)
        }
    }

    /// The final response value.
    ///
    /// An enveloped value passes through untouched; a raw payload is wrapped
    /// as `{"code": 200, "data": payload, "message": "success"}`.
    pub fn into_envelope(self) -> Value {
        match self {
            ResponseBody::Enveloped(value) => value,
            ResponseBody::Raw(value) => success_envelope(value),
        }
    }
}

/// Standard success envelope around a raw payload.
pub fn success_envelope(data: Value) -> Value {
    json!({
        "code": 200,
        "data": data,
        "message": "success",
    })
}

/// Error envelope with an empty data field.
pub fn error_envelope(code: i64, message: &str) -> Value {
    json!({
        "code": code,
        "data": null,
        "message": message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(json!({"code": 404, "data": null, "message": "not found"}), true)]
    #[case(json!({"code": 200}), true)]
    #[case(json!({"foo": 1}), false)]
    #[case(json!([1, 2, 3]), false)]
    #[case(json!("payload"), false)]
    #[case(json!(null), false)]
    fn test_classify(#[case] value: Value, #[case] enveloped: bool) {
        let body = ResponseBody::classify(value.clone());
        match body {
            ResponseBody::Enveloped(inner) => {
                assert!(enveloped);
                assert_eq!(inner, value);
            }
            ResponseBody::Raw(inner) => {
                assert!(!enveloped);
                assert_eq!(inner, value);
            }
        }
    }

    #[rstest]
    fn test_raw_payload_is_wrapped() {
        let envelope = ResponseBody::classify(json!({"foo": 1})).into_envelope();
        assert_eq!(
            envelope,
            json!({"code": 200, "data": {"foo": 1}, "message": "success"})
        );
    }

    #[rstest]
    fn test_existing_envelope_passes_through_untouched() {
        let original = json!({"code": 404, "data": null, "message": "not found"});
        let envelope = ResponseBody::classify(original.clone()).into_envelope();
        assert_eq!(envelope, original);
    }

    #[rstest]
    fn test_envelope_with_extra_fields_is_preserved() {
        let original = json!({"code": 401, "data": null, "message": "denied", "success": false});
        let envelope = ResponseBody::classify(original.clone()).into_envelope();
        assert_eq!(envelope, original);
    }

    #[rstest]
    fn test_null_payload_is_wrapped() {
        let envelope = ResponseBody::classify(json!(null)).into_envelope();
        assert_eq!(
            envelope,
            json!({"code": 200, "data": null, "message": "success"})
        );
    }
}
