use asnv_core::error::SCHEMA_REJECTION_FALLBACK;
use asnv_core::models::ValidationOutcome;
use asnv_core::ClassifiedError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error body shape shared by all non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// One entry of a 422 `detail` list
#[derive(Debug, Deserialize)]
struct RejectionEntry {
    #[serde(default)]
    loc: Vec<Value>,
    msg: String,
}

/// Classifies a completed HTTP exchange.
///
/// Any 2xx is decoded verbatim as a [`ValidationOutcome`], whatever its
/// `valid` flag says.
pub fn classify_response(
    status: StatusCode,
    body: &[u8],
) -> Result<ValidationOutcome, ClassifiedError> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(|err| {
            ClassifiedError::transport(format!(
                "Malformed response body from validation service: {}",
                err
            ))
        });
    }

    let error = if status == StatusCode::UNPROCESSABLE_ENTITY {
        ClassifiedError::schema_rejection(schema_rejection_message(body))
    } else if status.is_server_error() {
        ClassifiedError::server(detail_message(body))
    } else {
        ClassifiedError::unknown(detail_message(body))
    };

    Err(error)
}

/// Joins a 422 `loc` list into a dotted path, dropping the leading
/// wrapper segment ("body")
pub fn field_path(loc: &[Value]) -> String {
    loc.iter()
        .skip(1)
        .map(|segment| match segment {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn detail_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

fn schema_rejection_message(body: &[u8]) -> String {
    let first = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|detail| match detail {
            Value::Array(entries) => entries.into_iter().next(),
            _ => None,
        })
        .and_then(|entry| serde_json::from_value::<RejectionEntry>(entry).ok());

    match first {
        Some(entry) => {
            let path = field_path(&entry.loc);
            if path.is_empty() {
                entry.msg
            } else {
                format!("{}: {}", path, entry.msg)
            }
        }
        None => SCHEMA_REJECTION_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asnv_core::ErrorKind;
    use serde_json::json;

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn success_with_findings_is_an_outcome() {
        let body = bytes(json!({
            "valid": false,
            "errors": [
                {"field": "warehouse_code", "message": "Unknown DC", "rule": "data_integrity", "impact": "Misrouted freight"}
            ],
            "warnings": [],
            "timestamp": "2025-12-20T10:00:00"
        }));

        let outcome = classify_response(StatusCode::OK, &body).unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn undecodable_success_body_is_transport_error() {
        let err = classify_response(StatusCode::OK, b"<html>proxy</html>").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TransportError);
        assert!(err.message.starts_with("Malformed response body"));
    }

    #[test]
    fn rejection_strips_wrapper_segment() {
        let body = bytes(json!({
            "detail": [
                {"loc": ["body", "cartons", 0, "weight"], "msg": "exceeds max", "type": "value_error"},
                {"loc": ["body", "vendor_id"], "msg": "field required"}
            ]
        }));

        let err = classify_response(StatusCode::UNPROCESSABLE_ENTITY, &body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SchemaRejection);
        assert_eq!(err.message, "cartons.0.weight: exceeds max");
    }

    #[test]
    fn rejection_without_usable_detail_falls_back() {
        for body in [
            bytes(json!({"detail": []})),
            bytes(json!({"detail": "bad shape"})),
            bytes(json!({})),
            b"not json".to_vec(),
            Vec::new(),
        ] {
            let err = classify_response(StatusCode::UNPROCESSABLE_ENTITY, &body).unwrap_err();
            assert_eq!(err.kind, ErrorKind::SchemaRejection);
            assert_eq!(err.message, "Data validation failed");
        }
    }

    #[test]
    fn rejection_at_body_root_uses_bare_message() {
        let body = bytes(json!({"detail": [{"loc": ["body"], "msg": "Input should be an object"}]}));
        let err = classify_response(StatusCode::UNPROCESSABLE_ENTITY, &body).unwrap_err();
        assert_eq!(err.message, "Input should be an object");
    }

    #[test]
    fn server_errors_use_detail_or_fallback() {
        let err = classify_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &bytes(json!({"detail": "rules engine crashed"})),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.message, "rules engine crashed");

        let err = classify_response(StatusCode::BAD_GATEWAY, b"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.message, "Server error occurred");
    }

    #[test]
    fn other_statuses_are_unknown() {
        let err =
            classify_response(StatusCode::NOT_FOUND, &bytes(json!({"detail": "Not Found"})))
                .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.message, "Not Found");

        let err = classify_response(StatusCode::BAD_REQUEST, &bytes(json!({"detail": {"code": 7}})))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.message, "Validation failed");
    }

    #[test]
    fn field_path_handles_mixed_segments() {
        let loc = vec![json!("body"), json!("cartons"), json!(1), json!("items"), json!(0)];
        assert_eq!(field_path(&loc), "cartons.1.items.0");
        assert_eq!(field_path(&[json!("body")]), "");
        assert_eq!(field_path(&[]), "");
    }
}
