//! Unit tests for bridge request encoding and envelope line decoding.

use bytes::BytesMut;
use serde_json::json;
use tokio_util::codec::{Decoder, Encoder};
use worth_client::bridge::codec::{BridgeCodec, BridgeRequest};
use worth_client::{ApiError, AppError, Envelope};

#[test]
fn encodes_request_as_one_json_line() {
    let args = json!({ "accountId": 7 });
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::new();

    codec
        .encode(
            &BridgeRequest {
                command: "accounts_get",
                args: &args,
                auth_token: None,
            },
            &mut buf,
        )
        .unwrap();

    assert_eq!(
        &buf[..],
        br#"{"command":"accounts_get","args":{"accountId":7}}
"#
    );
}

#[test]
fn encodes_auth_token_when_present() {
    let args = json!({});
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::new();

    codec
        .encode(
            &BridgeRequest {
                command: "dashboard_get",
                args: &args,
                auth_token: Some("s3cret"),
            },
            &mut buf,
        )
        .unwrap();

    let line: serde_json::Value = serde_json::from_slice(buf.trim_ascii_end()).unwrap();
    assert_eq!(line["auth_token"], "s3cret");
}

#[test]
fn decodes_envelope_lines() {
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::from(
        "{\"status\":\"ok\",\"data\":42}\n{\"status\":\"error\",\"error\":\"Db\"}\n",
    );

    assert_eq!(
        codec.decode(&mut buf).unwrap(),
        Some(Envelope::ok(json!(42)))
    );
    assert_eq!(
        codec.decode(&mut buf).unwrap(),
        Some(Envelope::error(ApiError::Db))
    );
    assert_eq!(codec.decode(&mut buf).unwrap(), None);
}

#[test]
fn waits_for_a_complete_line() {
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::from("{\"status\":\"ok\",");

    assert_eq!(codec.decode(&mut buf).unwrap(), None);

    buf.extend_from_slice(b"\"data\":null}\n");
    assert_eq!(
        codec.decode(&mut buf).unwrap(),
        Some(Envelope::ok(serde_json::Value::Null))
    );
}

#[test]
fn skips_blank_lines() {
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::from("\n  \n{\"status\":\"ok\",\"data\":1}\n");

    assert_eq!(codec.decode(&mut buf).unwrap(), Some(Envelope::ok(json!(1))));
}

#[test]
fn unterminated_final_line_decodes_at_eof() {
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::from("{\"status\":\"ok\",\"data\":\"tail\"}");

    assert_eq!(codec.decode(&mut buf).unwrap(), None);
    assert_eq!(
        codec.decode_eof(&mut buf).unwrap(),
        Some(Envelope::ok(json!("tail")))
    );
}

#[test]
fn json_without_status_is_unknown() {
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::from("[1,2]\n");

    assert_eq!(
        codec.decode(&mut buf).unwrap(),
        Some(Envelope::error(ApiError::Unknown(json!([1, 2]))))
    );
}

#[test]
fn non_json_line_is_malformed() {
    let mut codec = BridgeCodec::new();
    let mut buf = BytesMut::from("not json\n");

    let err = codec.decode(&mut buf).unwrap_err();
    assert!(matches!(err, AppError::Ipc(msg) if msg.starts_with("malformed response")));
}

#[test]
fn over_long_response_line_is_rejected() {
    let mut codec = BridgeCodec::with_max_response_bytes(16);
    let mut buf = BytesMut::from("{\"status\":\"ok\",\"data\":\"far too long\"}\n");

    let err = codec.decode(&mut buf).unwrap_err();
    assert!(
        matches!(err, AppError::Ipc(ref msg) if msg == "response line exceeds 16 bytes"),
        "unexpected error: {err}"
    );
}
