//! TCP Server
//!
//! Accepts connections and dispatches to worker threads.
//!
//! ## Responsibilities
//! - Bind the listener (port 0 supported for tests)
//! - Accept connections without blocking shutdown
//! - Feed accepted streams to a fixed worker pool over a channel
//! - Drain workers on shutdown

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;

use super::Connection;

/// Poll interval for the non-blocking accept loop
const ACCEPT_POLL_MS: u64 = 50;

/// TCP server for the catalog
///
/// The accept loop runs on the calling thread; accepted streams are
/// handed to `worker_threads` workers over a crossbeam channel. All
/// workers share one `Catalog`, which enforces its own locking.
pub struct Server {
    /// Server configuration
    config: Config,

    /// The shared catalog commands execute against
    catalog: Arc<Catalog>,

    /// Bound listener (bound in `bind`, consumed by `run`)
    listener: TcpListener,

    /// Flag observed by the accept loop; set by `shutdown`
    shutdown: AtomicBool,
}

impl Server {
    /// Bind the listener for the configured address
    ///
    /// Binding and running are split so tests can bind port 0 and
    /// read back the assigned port before starting the loop.
    pub fn bind(config: Config, catalog: Arc<Catalog>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            catalog,
            listener,
            shutdown: AtomicBool::new(false),
        })
    }

    /// The address the listener actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the accept loop (blocking until shutdown)
    ///
    /// Steps:
    /// 1. Spawn the worker pool
    /// 2. Accept in non-blocking mode, checking the shutdown flag
    ///    between polls
    /// 3. On shutdown, close the channel and join the workers
    pub fn run(&self) -> Result<()> {
        // Step 1: Spawn workers fed over a channel
        let (sender, receiver) = unbounded::<TcpStream>();

        let mut workers = Vec::with_capacity(self.config.worker_threads);
        for worker_id in 0..self.config.worker_threads {
            let receiver = receiver.clone();
            let catalog = Arc::clone(&self.catalog);
            let config = self.config.clone();

            workers.push(thread::spawn(move || {
                worker_loop(worker_id, receiver, catalog, config);
            }));
        }

        // Step 2: Non-blocking accept so the flag is observed promptly
        self.listener.set_nonblocking(true)?;

        info!("Server running with {} workers", self.config.worker_threads);

        while !self.shutdown.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    debug!("Accepted connection from {}", addr);
                    if sender.send(stream).is_err() {
                        // Every worker is gone; nothing left to serve with
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(ACCEPT_POLL_MS));
                }
                Err(e) => {
                    warn!("Accept failed: {}", e);
                }
            }
        }

        // Step 3: Closing the channel lets idle workers drain and exit
        drop(sender);
        for handle in workers {
            let _ = handle.join();
        }

        info!("Server stopped");
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    ///
    /// Callable from any thread holding a reference; the accept loop
    /// notices within one poll interval.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Worker: serve connections from the channel until it closes
fn worker_loop(
    worker_id: usize,
    receiver: Receiver<TcpStream>,
    catalog: Arc<Catalog>,
    config: Config,
) {
    while let Ok(stream) = receiver.recv() {
        match Connection::new(stream, Arc::clone(&catalog)) {
            Ok(mut connection) => {
                if let Err(e) =
                    connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)
                {
                    warn!("Worker {}: failed to set timeouts: {}", worker_id, e);
                    continue;
                }
                if let Err(e) = connection.handle() {
                    warn!("Worker {}: connection error: {}", worker_id, e);
                }
            }
            Err(e) => {
                warn!("Worker {}: failed to set up connection: {}", worker_id, e);
            }
        }
    }

    debug!("Worker {} exiting", worker_id);
}
