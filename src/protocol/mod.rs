//! Protocol Module
//!
//! The binary wire protocol spoken between shop clients and the
//! catalog server. Both directions use the same five-byte-header
//! frame (tag byte, big-endian payload length, payload); the codec
//! documents the exact layout.
//!
//! Requests:
//! - `0x01 FIND`      — product id (8 bytes)
//! - `0x02 REVIEW`    — product id (8) + rating (1) + comment (utf8)
//! - `0x03 DISCOUNTS` — empty
//! - `0x04 PING`      — empty
//!
//! Responses carry a status (`0x00 OK`, `0x01 NOT_FOUND`,
//! `0x02 ERROR`) and an optional payload of record-format text:
//! FIND and REVIEW answer with the product's record line, DISCOUNTS
//! with one `<rating>,<amount>` line per non-empty bucket, PING with
//! `PONG`.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
