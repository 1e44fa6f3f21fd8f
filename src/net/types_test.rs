use super::*;

fn session() -> SessionId {
    serde_json::from_value(serde_json::json!("session_1_abcdefghi")).unwrap()
}

// =============================================================
// extract_reply
// =============================================================

#[test]
fn extract_reply_reads_output_field() {
    assert_eq!(extract_reply(r#"{"output":"Hello"}"#).as_deref(), Some("Hello"));
}

#[test]
fn extract_reply_reads_alternate_out_field() {
    assert_eq!(extract_reply(r#"{"out":"Hi"}"#).as_deref(), Some("Hi"));
}

#[test]
fn extract_reply_prefers_output_over_out() {
    assert_eq!(extract_reply(r#"{"out":"second","output":"first"}"#).as_deref(), Some("first"));
}

#[test]
fn extract_reply_skips_empty_output() {
    assert_eq!(extract_reply(r#"{"output":"","out":"fallback"}"#).as_deref(), Some("fallback"));
}

#[test]
fn extract_reply_ignores_non_string_fields() {
    assert_eq!(extract_reply(r#"{"output":42,"out":"text"}"#).as_deref(), Some("text"));
    assert_eq!(extract_reply(r#"{"output":null}"#), None);
}

#[test]
fn extract_reply_reads_first_array_item() {
    assert_eq!(extract_reply(r#"[{"output":"from array"},{"output":"ignored"}]"#).as_deref(), Some("from array"));
    assert_eq!(extract_reply("[]"), None);
}

#[test]
fn extract_reply_rejects_missing_field_and_plain_text() {
    assert_eq!(extract_reply(r#"{"message":"nope"}"#), None);
    assert_eq!(extract_reply("Workflow was started"), None);
    assert_eq!(extract_reply(""), None);
}

// =============================================================
// WebhookResponse
// =============================================================

#[test]
fn success_range_is_2xx_only() {
    assert!(WebhookResponse::new(200, "").is_success());
    assert!(WebhookResponse::new(204, "").is_success());
    assert!(!WebhookResponse::new(199, "").is_success());
    assert!(!WebhookResponse::new(302, "").is_success());
    assert!(!WebhookResponse::new(500, "").is_success());
}

#[test]
fn ensure_success_maps_status_error() {
    let err = WebhookResponse::new(503, "down").ensure_success().unwrap_err();
    assert!(matches!(err, DispatchError::Status { status: 503 }));
    assert_eq!(err.to_string(), "webhook responded with status 503");
}

// =============================================================
// Outbound payloads
// =============================================================

#[test]
fn text_payload_serializes_wire_fields() {
    let payload = TextPayload::new(session(), "hello", "2026-01-01T00:00:00Z");
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "session_id": "session_1_abcdefghi",
            "message": "hello",
            "type": "text",
            "timestamp": "2026-01-01T00:00:00Z"
        })
    );
}

#[test]
fn upload_form_carries_session_fields_and_count() {
    let files = vec![Attachment::new("a.pdf", vec![1, 2]), Attachment::new("b.txt", vec![3])];
    let form = upload_form(&session(), "2026-01-01T00:00:00Z", &files);
    assert_eq!(form.get_text("session_id"), Some("session_1_abcdefghi"));
    assert_eq!(form.get_text("type"), Some("file"));
    assert_eq!(form.get_text("timestamp"), Some("2026-01-01T00:00:00Z"));
    assert_eq!(form.get_text("file_count"), Some("2"));
}

#[test]
fn upload_form_keys_files_by_index() {
    let files = vec![
        Attachment::new("a.pdf", vec![1, 2]).with_mime("application/pdf"),
        Attachment::new("b.txt", vec![3]),
    ];
    let form = upload_form(&session(), "ts", &files);
    assert_eq!(form.get_file("file_0"), Some(&files[0]));
    assert_eq!(form.get_text("file_name_0"), Some("a.pdf"));
    assert_eq!(form.get_file("file_1"), Some(&files[1]));
    assert_eq!(form.get_text("file_name_1"), Some("b.txt"));
    assert_eq!(form.get_file("file_2"), None);
    assert_eq!(form.get_text("file_0"), None);
}

#[test]
fn file_names_joins_in_input_order() {
    let files = vec![Attachment::new("z.csv", vec![]), Attachment::new("a.md", vec![])];
    assert_eq!(file_names(&files), "z.csv, a.md");
    assert_eq!(file_names(&[]), "");
}

#[test]
fn with_mime_ignores_empty_type() {
    assert_eq!(Attachment::new("x", vec![]).with_mime("").mime, None);
    assert_eq!(Attachment::new("x", vec![]).with_mime("text/plain").mime.as_deref(), Some("text/plain"));
}

#[test]
fn timestamp_now_is_rfc3339() {
    let ts = timestamp_now().unwrap();
    assert!(OffsetDateTime::parse(&ts, &Rfc3339).is_ok());
}

#[test]
fn timestamp_outside_rfc3339_years_is_error() {
    let date = time::Date::from_calendar_date(-1, time::Month::January, 1).unwrap();
    let at = time::PrimitiveDateTime::new(date, time::Time::MIDNIGHT).assume_utc();
    let err = format_timestamp(at).unwrap_err();
    assert!(matches!(err, DispatchError::Timestamp(_)));
    assert!(err.to_string().starts_with("timestamp format failed"));
}

#[test]
fn file_read_error_names_the_file() {
    let err = FileReadError::new("scan.pdf", "NotReadableError");
    assert_eq!(err.to_string(), "could not read scan.pdf: NotReadableError");
}
