//! Connection Handler
//!
//! The per-client serve loop: read a command, execute it against the
//! shared catalog, answer, repeat until the client goes away.

use std::io::{self, BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::catalog::Catalog;
use crate::error::{Result, ShelfError};
use crate::protocol::{read_command, write_response, Command, Response};

/// Serves one client connection
pub struct Connection {
    /// Buffered read half
    reader: BufReader<TcpStream>,

    /// Buffered write half
    writer: BufWriter<TcpStream>,

    /// The catalog commands execute against
    catalog: Arc<Catalog>,

    /// Peer address for logging
    peer_addr: String,
}

/// Error kinds that mean the peer is gone, or idle past its timeout,
/// rather than that something failed on our side
fn is_disconnect(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}

impl Connection {
    /// Wrap an accepted stream
    ///
    /// Splits the stream into buffered halves and disables Nagle so
    /// small response frames leave promptly.
    pub fn new(stream: TcpStream, catalog: Arc<Catalog>) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);

        Ok(Self {
            reader,
            writer,
            catalog,
            peer_addr,
        })
    }

    /// Apply socket timeouts; a zero disables that side
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Serve the connection until the client disconnects
    ///
    /// A disconnect or idle timeout ends the loop cleanly. Any other
    /// read fault is answered with an error frame where possible and
    /// then propagated.
    pub fn handle(&mut self) -> Result<()> {
        debug!("Connection established from {}", self.peer_addr);

        loop {
            let command = match read_command(&mut self.reader) {
                Ok(command) => command,
                Err(ShelfError::Io(ref e)) if is_disconnect(e.kind()) => {
                    debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Bad frame from {}: {}", self.peer_addr, e);
                    let _ = self.send(Response::error(&e.to_string()));
                    return Err(e);
                }
            };

            trace!("Command from {}: {:?}", self.peer_addr, command);

            let response = self.execute(command);

            match self.send(response) {
                Ok(()) => {}
                Err(ShelfError::Io(ref e)) if is_disconnect(e.kind()) => {
                    debug!("Client {} went away mid-response", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Failed to answer {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            }
        }
    }

    /// Run one command against the catalog and shape the answer
    fn execute(&self, command: Command) -> Response {
        match self.catalog.execute(command) {
            Ok(payload) => Response::ok(payload),
            Err(ShelfError::ProductNotFound(_)) => Response::not_found(),
            Err(e) => Response::error(&e.to_string()),
        }
    }

    fn send(&mut self, response: Response) -> Result<()> {
        write_response(&mut self.writer, &response)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
