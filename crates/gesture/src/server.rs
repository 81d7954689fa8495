//! TCP server for the gesture feed
//!
//! Accepts detector connections and forwards classified frames to the game
//! loop. Each connection must say hello first; after that it streams gesture
//! messages with strictly increasing `seq`. Successful frames get no reply.

use std::net::SocketAddr;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::GestureError;
use crate::protocol::*;
use crate::types::Command;

/// One reading handed from the server to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundGesture {
    pub client_id: usize,
    pub seq: u64,
    pub command: Command,
    pub hands: u8,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    /// Readings queued for the game loop before new ones are dropped
    pub max_pending_frames: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_frames: 64,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables; unparseable values keep the defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("MOTION_TETRIS_GESTURE_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("MOTION_TETRIS_GESTURE_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_frames = env::var("MOTION_TETRIS_GESTURE_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_frames);

        Self {
            host,
            port,
            protocol_version: defaults.protocol_version,
            max_pending_frames,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, GestureError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| GestureError::InvalidAddress { addr, source })
    }

    /// Check if the gesture feed is disabled via environment
    pub fn is_disabled() -> bool {
        std::env::var("MOTION_TETRIS_GESTURE_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Start the TCP server and accept detectors until the task is dropped
pub async fn run_server(
    config: ServerConfig,
    frame_tx: mpsc::Sender<InboundGesture>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "gesture feed listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %peer, "detector connected");

        let frame_tx = frame_tx.clone();
        let protocol_version = config.protocol_version.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, &protocol_version, frame_tx).await {
                warn!(client_id, error = %e, "detector connection failed");
            }
            info!(client_id, "detector disconnected");
        });
    }
}

/// Per-connection handshake and ordering state
#[derive(Debug, Default)]
struct Connection {
    handshaken: bool,
    last_seq: Option<u64>,
}

impl Connection {
    /// Accept `seq` only if it is newer than the last one seen
    fn advance(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    protocol_version: &str,
    frame_tx: mpsc::Sender<InboundGesture>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Replies go through a channel so a slow detector never stalls parsing.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err()
                || writer.write_all(b"\n").await.is_err()
                || writer.flush().await.is_err()
            {
                break;
            }
        }
    });

    let mut conn = Connection::default();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if conn.handshaken && !conn.advance(hello.seq) {
                    send_error(&tx, hello.seq, ErrorCode::OutOfOrder, "seq must be strictly increasing");
                    continue;
                }
                if !is_compatible(&hello.protocol_version) {
                    send_error(
                        &tx,
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                conn.handshaken = true;
                conn.last_seq = Some(hello.seq);
                info!(
                    client_id,
                    name = %hello.client.name,
                    version = %hello.client.version,
                    "detector handshake"
                );
                send_line(&tx, &create_welcome(hello.seq, protocol_version));
            }

            Ok(ParsedMessage::Gesture(msg)) => {
                if !conn.handshaken {
                    send_error(&tx, msg.seq, ErrorCode::HandshakeRequired, "Send hello before gestures");
                    continue;
                }
                if !conn.advance(msg.seq) {
                    send_error(&tx, msg.seq, ErrorCode::OutOfOrder, "seq must be strictly increasing");
                    continue;
                }

                let reading = InboundGesture {
                    client_id,
                    seq: msg.seq,
                    command: msg.command(),
                    hands: msg.hands,
                };
                match frame_tx.try_send(reading) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        debug!(client_id, seq = msg.seq, "game loop behind, gesture dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }

            Ok(ParsedMessage::Unknown(u)) => {
                send_error(&tx, u.seq, ErrorCode::InvalidMessage, "Unknown message type");
            }

            Err(e) => {
                send_error(
                    &tx,
                    extract_seq(trimmed),
                    ErrorCode::InvalidMessage,
                    &format!("Malformed message: {e}"),
                );
            }
        }
    }

    drop(tx);
    let _ = write_task.await;
    Ok(())
}

fn send_line<T: Serialize>(tx: &mpsc::UnboundedSender<String>, msg: &T) {
    if let Ok(line) = serde_json::to_string(msg) {
        let _ = tx.send(line);
    }
}

fn send_error(tx: &mpsc::UnboundedSender<String>, seq: u64, code: ErrorCode, message: &str) {
    send_line(tx, &create_error(seq, code, message));
}
