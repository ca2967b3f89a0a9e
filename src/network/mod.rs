//! Network Module
//!
//! The TCP front end for the catalog: one acceptor thread feeding a
//! fixed pool of connection workers, every command routed through the
//! shared `Catalog`.

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;
