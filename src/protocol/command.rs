//! Command definitions
//!
//! The parsed form of each request a client can send.

use crate::model::ProductId;

/// Wire tag identifying each command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Find = 0x01,
    Review = 0x02,
    Discounts = 0x03,
    Ping = 0x04,
}

/// A decoded client request
#[derive(Debug, Clone)]
pub enum Command {
    /// Look up a product by id
    Find { id: ProductId },

    /// Submit a review for a product
    Review {
        id: ProductId,
        rating: u8,
        comment: String,
    },

    /// Total discount per rating group
    Discounts,

    /// Liveness probe
    Ping,
}

impl Command {
    /// The wire tag for this command
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Find { .. } => CommandType::Find,
            Command::Review { .. } => CommandType::Review,
            Command::Discounts => CommandType::Discounts,
            Command::Ping => CommandType::Ping,
        }
    }
}
