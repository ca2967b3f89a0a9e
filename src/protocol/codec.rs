//! Protocol codec
//!
//! Encoding and decoding for the wire protocol. Commands and
//! responses share one frame shape, so the header handling lives in
//! a pair of helpers (`split_frame` for byte slices, `read_frame` for
//! streams) that both directions go through.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Tag (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! The tag byte is the command type on the request side and the
//! status code on the response side. `Len` is big-endian and capped
//! at [`MAX_PAYLOAD_SIZE`].
//!
//! ### Payload by Command Type
//! - FIND:      product id (8 bytes, big-endian)
//! - REVIEW:    product id (8) + rating (1) + comment (utf8, rest)
//! - DISCOUNTS: empty
//! - PING:      empty

use std::io::{Read, Write};

use crate::error::{Result, ShelfError};

use super::{Command, Response, Status};

/// Header size: 1 tag byte + 4 length bytes
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (1 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 1024 * 1024;

/// Fixed part of a REVIEW payload: id (8) + rating (1)
const REVIEW_FIXED_LEN: usize = 9;

// =============================================================================
// Frame Helpers
// =============================================================================

/// Frame a tag and payload for the wire
fn encode_frame(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.push(tag);
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Split a raw frame into its tag byte and payload slice
///
/// Validates the header length, the payload cap, and that the buffer
/// holds as many payload bytes as the header claims.
fn split_frame(bytes: &[u8]) -> Result<(u8, &[u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(ShelfError::Protocol(format!(
            "incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
    check_payload_len(payload_len)?;

    let total = HEADER_SIZE + payload_len as usize;
    if bytes.len() < total {
        return Err(ShelfError::Protocol(format!(
            "incomplete payload: expected {} bytes, got {}",
            total,
            bytes.len()
        )));
    }

    Ok((bytes[0], &bytes[HEADER_SIZE..total]))
}

/// Read one whole frame off a stream (blocking)
///
/// The length is validated against the cap before the payload buffer
/// is allocated.
fn read_frame<R: Read>(reader: &mut R) -> Result<(u8, Vec<u8>)> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    check_payload_len(payload_len)?;

    let mut payload = vec![0u8; payload_len as usize];
    if !payload.is_empty() {
        reader.read_exact(&mut payload)?;
    }

    Ok((header[0], payload))
}

fn check_payload_len(len: u32) -> Result<()> {
    if len > MAX_PAYLOAD_SIZE {
        return Err(ShelfError::Protocol(format!(
            "payload of {} bytes exceeds the {} byte cap",
            len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(())
}

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to bytes
pub fn encode_command(command: &Command) -> Vec<u8> {
    let payload = match command {
        Command::Find { id } => id.to_be_bytes().to_vec(),
        Command::Review {
            id,
            rating,
            comment,
        } => {
            let comment = comment.as_bytes();
            let mut payload = Vec::with_capacity(REVIEW_FIXED_LEN + comment.len());
            payload.extend_from_slice(&id.to_be_bytes());
            payload.push(*rating);
            payload.extend_from_slice(comment);
            payload
        }
        Command::Discounts | Command::Ping => Vec::new(),
    };

    encode_frame(command.command_type() as u8, &payload)
}

/// Decode a command from bytes
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    let (tag, payload) = split_frame(bytes)?;
    decode_command_parts(tag, payload)
}

/// Dispatch a split frame to the per-command payload decoders
fn decode_command_parts(tag: u8, payload: &[u8]) -> Result<Command> {
    match tag {
        0x01 => decode_find(payload),
        0x02 => decode_review(payload),
        0x03 => expect_empty(payload, "DISCOUNTS").map(|_| Command::Discounts),
        0x04 => expect_empty(payload, "PING").map(|_| Command::Ping),
        other => Err(ShelfError::Protocol(format!(
            "unknown command type 0x{:02x}",
            other
        ))),
    }
}

fn decode_find(payload: &[u8]) -> Result<Command> {
    let id: [u8; 8] = payload.try_into().map_err(|_| {
        ShelfError::Protocol(format!(
            "FIND: expected an 8-byte id, got {} bytes",
            payload.len()
        ))
    })?;

    Ok(Command::Find {
        id: u64::from_be_bytes(id),
    })
}

fn decode_review(payload: &[u8]) -> Result<Command> {
    if payload.len() < REVIEW_FIXED_LEN {
        return Err(ShelfError::Protocol(format!(
            "REVIEW: expected at least {} bytes, got {}",
            REVIEW_FIXED_LEN,
            payload.len()
        )));
    }

    let id = u64::from_be_bytes(payload[..8].try_into().unwrap());
    let rating = payload[8];
    let comment = String::from_utf8(payload[REVIEW_FIXED_LEN..].to_vec())
        .map_err(|_| ShelfError::Protocol("REVIEW: comment is not UTF-8".to_string()))?;

    Ok(Command::Review {
        id,
        rating,
        comment,
    })
}

fn expect_empty(payload: &[u8], name: &str) -> Result<()> {
    if payload.is_empty() {
        Ok(())
    } else {
        Err(ShelfError::Protocol(format!(
            "{}: unexpected payload of {} bytes",
            name,
            payload.len()
        )))
    }
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
pub fn encode_response(response: &Response) -> Vec<u8> {
    encode_frame(
        response.status as u8,
        response.payload.as_deref().unwrap_or(&[]),
    )
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let (tag, payload) = split_frame(bytes)?;
    decode_response_parts(tag, payload)
}

fn decode_response_parts(tag: u8, payload: &[u8]) -> Result<Response> {
    let status = match tag {
        0x00 => Status::Ok,
        0x01 => Status::NotFound,
        0x02 => Status::Error,
        other => {
            return Err(ShelfError::Protocol(format!(
                "unknown response status 0x{:02x}",
                other
            )))
        }
    };

    let payload = if payload.is_empty() {
        None
    } else {
        Some(payload.to_vec())
    };

    Ok(Response { status, payload })
}

// =============================================================================
// Stream Helpers
// =============================================================================

/// Read a complete command from a stream
///
/// Blocks until a whole frame arrives or the stream fails.
pub fn read_command<R: Read>(reader: &mut R) -> Result<Command> {
    let (tag, payload) = read_frame(reader)?;
    decode_command_parts(tag, &payload)
}

/// Write a command to a stream and flush it
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    writer.write_all(&encode_command(command))?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let (tag, payload) = read_frame(reader)?;
    decode_response_parts(tag, &payload)
}

/// Write a response to a stream and flush it
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}
