//! Response definitions
//!
//! The status-plus-payload answer sent back for every command.

/// Status byte of a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// The command succeeded
    Ok = 0x00,
    /// The product id is not in the catalog
    NotFound = 0x01,
    /// The command failed; the payload carries the message
    Error = 0x02,
}

/// One answer frame
///
/// The payload holds record-format text for FIND/REVIEW/DISCOUNTS,
/// the literal `PONG` for PING, and the failure message under
/// [`Status::Error`].
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// A success answer carrying whatever the command produced
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// The answer for a product id the catalog does not hold
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: None,
        }
    }

    /// A failure answer carrying the error message
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(message.as_bytes().to_vec()),
        }
    }
}
