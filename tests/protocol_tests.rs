//! Tests for the wire protocol
//!
//! These tests verify:
//! - Command and response encoding round-trips
//! - Exact frame layout: tag byte, big-endian length, payload
//! - Malformed frame rejection (short, oversized, wrong payload)
//! - Stream helpers over an in-memory reader/writer

use std::io::Cursor;

use rateshelf::protocol::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, Command, Response, Status, HEADER_SIZE,
};
use rateshelf::ShelfError;

// =============================================================================
// Command Round-Trip Tests
// =============================================================================

#[test]
fn test_find_command_round_trip() {
    let bytes = encode_command(&Command::Find { id: 101 });

    match decode_command(&bytes).unwrap() {
        Command::Find { id } => assert_eq!(id, 101),
        other => panic!("expected find, got {:?}", other),
    }
}

#[test]
fn test_review_command_round_trip() {
    let command = Command::Review {
        id: 101,
        rating: 5,
        comment: "Très bon ☕".to_string(),
    };
    let bytes = encode_command(&command);

    match decode_command(&bytes).unwrap() {
        Command::Review {
            id,
            rating,
            comment,
        } => {
            assert_eq!(id, 101);
            assert_eq!(rating, 5);
            assert_eq!(comment, "Très bon ☕");
        }
        other => panic!("expected review, got {:?}", other),
    }
}

#[test]
fn test_empty_payload_commands_round_trip() {
    let bytes = encode_command(&Command::Discounts);
    assert!(matches!(decode_command(&bytes).unwrap(), Command::Discounts));

    let bytes = encode_command(&Command::Ping);
    assert!(matches!(decode_command(&bytes).unwrap(), Command::Ping));
}

#[test]
fn test_encoded_find_frame_layout() {
    let bytes = encode_command(&Command::Find { id: 0x0102 });

    assert_eq!(bytes.len(), HEADER_SIZE + 8);
    assert_eq!(bytes[0], 0x01);
    // Payload length, big-endian
    assert_eq!(&bytes[1..5], &[0, 0, 0, 8]);
    // Product id, big-endian
    assert_eq!(&bytes[5..13], &[0, 0, 0, 0, 0, 0, 0x01, 0x02]);
}

#[test]
fn test_encoded_review_frame_layout() {
    let bytes = encode_command(&Command::Review {
        id: 101,
        rating: 4,
        comment: "ok".to_string(),
    });

    // id (8) + rating (1) + comment (2)
    assert_eq!(&bytes[1..5], &[0, 0, 0, 11]);
    assert_eq!(bytes[13], 4);
    assert_eq!(&bytes[14..], b"ok");
}

// =============================================================================
// Malformed Command Tests
// =============================================================================

#[test]
fn test_decode_rejects_short_header() {
    let err = decode_command(&[0x01, 0x00]).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_decode_rejects_unknown_command_type() {
    let err = decode_command(&[0x7F, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_decode_rejects_oversized_payload_length() {
    // Header claims 2 MB, twice the allowed maximum
    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&(2 * 1024 * 1024u32).to_be_bytes());

    let err = decode_command(&bytes).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_decode_rejects_truncated_payload() {
    // Header claims 8 payload bytes but only 4 follow
    let mut bytes = vec![0x01, 0, 0, 0, 8];
    bytes.extend_from_slice(&[0, 0, 0, 101]);

    let err = decode_command(&bytes).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_find_payload_must_be_exactly_eight_bytes() {
    let mut bytes = vec![0x01, 0, 0, 0, 4];
    bytes.extend_from_slice(&[0, 0, 0, 101]);

    let err = decode_command(&bytes).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_review_payload_must_hold_id_and_rating() {
    // One byte short of the fixed id + rating part
    let mut bytes = vec![0x02, 0, 0, 0, 8];
    bytes.extend_from_slice(&101u64.to_be_bytes());

    let err = decode_command(&bytes).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_review_rejects_non_utf8_comment() {
    let mut bytes = vec![0x02, 0, 0, 0, 11];
    bytes.extend_from_slice(&101u64.to_be_bytes());
    bytes.push(5);
    bytes.extend_from_slice(&[0xFF, 0xFE]);

    let err = decode_command(&bytes).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

#[test]
fn test_empty_payload_commands_reject_payload() {
    let err = decode_command(&[0x03, 0, 0, 0, 1, 0xAA]).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));

    let err = decode_command(&[0x04, 0, 0, 0, 1, 0xAA]).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_response_round_trip_all_statuses() {
    let ok = decode_response(&encode_response(&Response::ok(Some(
        b"D,101,Tea,1.99,0".to_vec(),
    ))))
    .unwrap();
    assert_eq!(ok.status, Status::Ok);
    assert_eq!(ok.payload.as_deref(), Some(b"D,101,Tea,1.99,0".as_ref()));

    let not_found = decode_response(&encode_response(&Response::not_found())).unwrap();
    assert_eq!(not_found.status, Status::NotFound);
    assert!(not_found.payload.is_none());

    let error = decode_response(&encode_response(&Response::error("boom"))).unwrap();
    assert_eq!(error.status, Status::Error);
    assert_eq!(error.payload.as_deref(), Some(b"boom".as_ref()));
}

#[test]
fn test_decode_rejects_unknown_status() {
    let err = decode_response(&[0x99, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, ShelfError::Protocol(_)));
}

// =============================================================================
// Stream Helper Tests
// =============================================================================

#[test]
fn test_stream_command_round_trip() {
    let mut buffer = Vec::new();
    write_command(
        &mut buffer,
        &Command::Review {
            id: 7,
            rating: 3,
            comment: "fine".to_string(),
        },
    )
    .unwrap();

    let mut cursor = Cursor::new(buffer);
    match read_command(&mut cursor).unwrap() {
        Command::Review { id, rating, comment } => {
            assert_eq!(id, 7);
            assert_eq!(rating, 3);
            assert_eq!(comment, "fine");
        }
        other => panic!("expected review, got {:?}", other),
    }
}

#[test]
fn test_stream_response_round_trip() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::ok(Some(b"PONG".to_vec()))).unwrap();

    let response = read_response(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.payload.as_deref(), Some(b"PONG".as_ref()));
}

#[test]
fn test_stream_read_on_closed_source_is_io_error() {
    let err = read_command(&mut Cursor::new(Vec::new())).unwrap_err();
    assert!(matches!(err, ShelfError::Io(_)));
}

#[test]
fn test_stream_back_to_back_commands() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::Find { id: 1 }).unwrap();
    write_command(&mut buffer, &Command::Ping).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert!(matches!(
        read_command(&mut cursor).unwrap(),
        Command::Find { id: 1 }
    ));
    assert!(matches!(read_command(&mut cursor).unwrap(), Command::Ping));
}
