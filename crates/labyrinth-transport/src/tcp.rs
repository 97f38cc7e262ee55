//! Framed TCP transport built on `tokio::net`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, Framing, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A TCP [`Transport`] that listens for incoming connections.
///
/// Every accepted connection inherits the transport's [`Framing`].
pub struct TcpTransport {
    listener: TcpListener,
    framing: Framing,
}

impl TcpTransport {
    /// Binds a new transport to the given address.
    pub async fn bind(addr: SocketAddr, framing: Framing) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::BindFailed { addr, source })?;
        tracing::info!(%addr, ?framing, "TCP transport listening");
        Ok(Self { listener, framing })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Returns the framing every accepted connection uses.
    pub fn framing(&self) -> Framing {
        self.framing
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let conn = TcpConnection::new(stream, self.framing);
        tracing::debug!(id = %conn.id, %addr, "accepted TCP connection");
        Ok(conn)
    }

    async fn shutdown(self) -> Result<(), Self::Error> {
        let addr = self.listener.local_addr().ok();
        // Dropping the listener closes the socket; later connects are refused.
        drop(self.listener);
        tracing::info!(?addr, "TCP transport closed");
        Ok(())
    }
}

/// A single framed TCP connection.
///
/// The read and write halves sit behind separate locks so a pending
/// `recv` never blocks a `send`.
pub struct TcpConnection {
    id: ConnectionId,
    framing: Framing,
    reader: Mutex<OwnedReadHalf>,
    writer: Mutex<OwnedWriteHalf>,
}

impl TcpConnection {
    /// Opens a client connection to `addr`.
    pub async fn connect(addr: SocketAddr, framing: Framing) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(TransportError::ConnectFailed)?;
        Ok(Self::new(stream, framing))
    }

    fn new(stream: TcpStream, framing: Framing) -> Self {
        // Frames are small and strictly request/response.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(error = %e, "failed to set TCP_NODELAY");
        }
        let (reader, writer) = stream.into_split();
        Self {
            id: ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed)),
            framing,
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let mut writer = self.writer.lock().await;
        match self.framing {
            Framing::Fixed(expected) => {
                if data.len() != expected {
                    return Err(TransportError::FrameLength { len: data.len(), expected });
                }
            }
            Framing::LengthPrefixed { max_len } => {
                let len = data.len();
                let header = u32::try_from(len)
                    .ok()
                    .filter(|_| len <= max_len)
                    .ok_or(TransportError::FrameTooLarge { len, max: max_len })?;
                writer
                    .write_all(&header.to_be_bytes())
                    .await
                    .map_err(TransportError::SendFailed)?;
            }
        }
        writer
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut reader = self.reader.lock().await;
        let len = match self.framing {
            Framing::Fixed(len) => len,
            Framing::LengthPrefixed { max_len } => {
                let mut header = [0u8; 4];
                if !fill(&mut reader, &mut header).await? {
                    return Ok(None);
                }
                let len = u32::from_be_bytes(header) as usize;
                if len > max_len {
                    return Err(TransportError::FrameTooLarge { len, max: max_len });
                }
                if len == 0 {
                    return Ok(Some(Vec::new()));
                }
                let mut body = vec![0u8; len];
                if !fill(&mut reader, &mut body).await? {
                    return Err(TransportError::ConnectionClosed(
                        "peer closed after frame header".into(),
                    ));
                }
                return Ok(Some(body));
            }
        };

        let mut frame = vec![0u8; len];
        if !fill(&mut reader, &mut frame).await? {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

/// Reads exactly `buf.len()` bytes.
///
/// Returns `Ok(false)` if the stream ended before the first byte, and an
/// error if it ended part-way through.
async fn fill(reader: &mut OwnedReadHalf, buf: &mut [u8]) -> Result<bool, TransportError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader
            .read(&mut buf[filled..])
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if n == 0 {
            if filled == 0 {
                return Ok(false);
            }
            return Err(TransportError::ConnectionClosed(format!(
                "peer closed after {filled} of {} bytes",
                buf.len()
            )));
        }
        filled += n;
    }
    Ok(true)
}
