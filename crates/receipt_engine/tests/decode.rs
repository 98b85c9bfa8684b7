use pretty_assertions::assert_eq;
use receipt_engine::{decode_json, is_json_content_type, DecodeError, Decoded, PaymentRecord};

#[test]
fn json_media_type_ignores_parameters_and_case() {
    assert!(is_json_content_type(Some("application/json")));
    assert!(is_json_content_type(Some("Application/JSON; charset=utf-8")));
    assert!(!is_json_content_type(Some("text/html; charset=utf-8")));
    assert!(!is_json_content_type(Some("application/jsonp")));
    assert!(!is_json_content_type(None));
}

#[test]
fn decodes_complete_record() {
    let body = br#"{"amount":"250.00","upi_id":"alice@bank","date":"2024-01-01"}"#;
    let decoded = decode_json::<PaymentRecord>(body, Some("application/json")).unwrap();

    assert_eq!(
        decoded,
        Decoded::Json(PaymentRecord {
            amount: "250.00".to_string(),
            upi_id: "alice@bank".to_string(),
            date: "2024-01-01".to_string(),
        })
    );
}

#[test]
fn html_body_is_not_json() {
    let body = b"<html><body>Internal Server Error</body></html>";
    let decoded = decode_json::<PaymentRecord>(body, Some("text/html")).unwrap();

    assert_eq!(
        decoded,
        Decoded::NotJson {
            content_type: Some("text/html".to_string())
        }
    );
}

#[test]
fn partial_record_is_malformed() {
    let body = br#"{"amount":"250.00","date":"2024-01-01"}"#;
    let err = decode_json::<PaymentRecord>(body, Some("application/json")).unwrap_err();

    assert!(matches!(err, DecodeError::Malformed { .. }));
}

#[test]
fn invalid_json_is_malformed() {
    let err = decode_json::<PaymentRecord>(b"{not json", Some("application/json")).unwrap_err();

    assert!(err.to_string().contains("expected structure"));
}
