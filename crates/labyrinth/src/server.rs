//! `LabyrinthServer` builder and server loop.
//!
//! This is the entry point for running a Labyrinth server. It ties together
//! all the layers: transport → protocol → session → maze.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use labyrinth_maze::Grid;
use labyrinth_protocol::Codec;
use labyrinth_session::SessionConfig;
use labyrinth_transport::{Connection, TcpTransport, Transport};
use tracing::Instrument;

use crate::handler::handle_connection;
use crate::LabyrinthError;

/// Read-only state shared by every connection handler task.
///
/// Handlers clone `grid` into their own session; nothing here is ever
/// mutated after the server is built.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) grid: Grid,
    pub(crate) codec: C,
    pub(crate) session_config: SessionConfig,
}

/// Builder for configuring and starting a Labyrinth server.
///
/// # Example
///
/// ```rust,no_run
/// use labyrinth::prelude::*;
///
/// # async fn run(grid: Grid) -> Result<(), LabyrinthError> {
/// let server = LabyrinthServerBuilder::new()
///     .bind("0.0.0.0:51511".parse().unwrap())
///     .build(grid, FixedCodec::default())
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct LabyrinthServerBuilder {
    bind_addr: SocketAddr,
    session_config: SessionConfig,
}

impl LabyrinthServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Binds the listener and builds the server around `grid`.
    ///
    /// The codec also decides how frames are delimited on the socket.
    ///
    /// # Errors
    /// Fails with [`LabyrinthError::SideMismatch`] if the codec carries
    /// boards of a different side than `grid`, before anything is bound.
    pub async fn build<C: Codec>(
        self,
        grid: Grid,
        codec: C,
    ) -> Result<LabyrinthServer<C>, LabyrinthError> {
        if let Some(side) = codec.board_side() {
            if side != grid.side() {
                return Err(LabyrinthError::SideMismatch {
                    codec: side,
                    maze: grid.side(),
                });
            }
        }

        let transport = TcpTransport::bind(self.bind_addr, codec.framing()).await?;

        let state = Arc::new(ServerState {
            grid,
            codec,
            session_config: self.session_config,
        });

        Ok(LabyrinthServer { transport, state })
    }
}

impl Default for LabyrinthServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A Labyrinth server bound to a listening socket.
///
/// Call [`run()`](Self::run) or [`run_until()`](Self::run_until) to start
/// accepting connections.
pub struct LabyrinthServer<C: Codec> {
    transport: TcpTransport,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> LabyrinthServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), LabyrinthError> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the accept loop until `shutdown` resolves.
    ///
    /// Every accepted connection is served on its own task, so one slow
    /// player never holds up another. Sessions already running when
    /// `shutdown` fires are left to finish on their own.
    pub async fn run_until(
        mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), LabyrinthError> {
        tracing::info!(
            addr = ?self.local_addr().ok(),
            framing = ?self.transport.framing(),
            "Labyrinth server running"
        );
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested, no longer accepting");
                    break;
                }
                accepted = self.transport.accept() => match accepted {
                    Ok(conn) => {
                        let state = Arc::clone(&self.state);
                        let span = tracing::info_span!("connection", id = %conn.id());
                        tokio::spawn(
                            async move {
                                if let Err(e) = handle_connection(conn, state).await {
                                    tracing::debug!(error = %e, "connection ended with error");
                                }
                            }
                            .instrument(span),
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
            }
        }

        self.transport.shutdown().await?;
        Ok(())
    }
}
