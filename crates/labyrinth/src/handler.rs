//! Per-connection handler: read a request, run it through the session,
//! write the response.
//!
//! Each accepted connection gets its own Tokio task running this handler
//! and its own [`GameSession`] on a private copy of the maze. The loop ends
//! when the client sends `Exit`, closes the socket, goes quiet for longer
//! than the idle timeout, or sends a frame that does not decode.

use std::sync::Arc;

use labyrinth_protocol::{Codec, Response};
use labyrinth_session::{GameSession, Outcome};
use labyrinth_transport::{Connection, TcpConnection};

use crate::server::ServerState;
use crate::LabyrinthError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: TcpConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), LabyrinthError> {
    tracing::info!("client connected");
    let mut session = GameSession::new(state.grid.clone());

    let result = serve(&conn, &state, &mut session).await;

    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "close failed");
    }
    tracing::info!(phase = ?session.phase(), "client disconnected");
    result
}

async fn serve<C: Codec>(
    conn: &TcpConnection,
    state: &ServerState<C>,
    session: &mut GameSession,
) -> Result<(), LabyrinthError> {
    let idle_timeout = state.session_config.idle_timeout;
    loop {
        let data = match tokio::time::timeout(idle_timeout, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!("connection closed cleanly");
                return Ok(());
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "recv error");
                return Ok(());
            }
            Err(_) => {
                tracing::info!(timeout = ?idle_timeout, "connection timed out");
                return Ok(());
            }
        };

        let request = match state.codec.decode_request(&data) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "malformed frame, closing");
                return Ok(());
            }
        };

        match session.handle(request) {
            Outcome::Reply(response) => send(conn, &state.codec, &response).await?,
            Outcome::Terminate => {
                tracing::debug!("client requested exit");
                return Ok(());
            }
        }
    }
}

async fn send<C: Codec>(
    conn: &TcpConnection,
    codec: &C,
    response: &Response,
) -> Result<(), LabyrinthError> {
    let bytes = codec.encode_response(response)?;
    conn.send(&bytes).await?;
    tracing::debug!(kind = %response.kind(), "response sent");
    Ok(())
}
