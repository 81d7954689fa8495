//! Gesture feed runtime integration.
//!
//! Bridges the sync game loop with the async TCP server.

use std::net::SocketAddr;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::GestureError;
use crate::server::{run_server, InboundGesture, ServerConfig};
use crate::source::GestureFrame;

/// Running gesture feed instance.
pub struct GestureFeed {
    _rt: Runtime,
    frame_rx: mpsc::Receiver<InboundGesture>,
    addr: SocketAddr,
}

impl GestureFeed {
    /// Start the server on its own runtime.
    ///
    /// The address is validated up front; bind failures surface as a warning
    /// in the log since they happen on the runtime.
    pub fn start(config: ServerConfig) -> Result<Self, GestureError> {
        let addr = config.socket_addr()?;
        let (frame_tx, frame_rx) = mpsc::channel::<InboundGesture>(config.max_pending_frames.max(1));

        let rt = Runtime::new()?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, frame_tx, None).await {
                warn!(error = %e, "gesture feed stopped");
            }
        });

        Ok(Self {
            _rt: rt,
            frame_rx,
            addr,
        })
    }

    /// Configured listen address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Next pending reading, stamped with the game clock
    pub fn try_recv(&mut self, now_ms: u64) -> Option<GestureFrame> {
        self.frame_rx.try_recv().ok().map(|g| GestureFrame {
            command: g.command,
            hands: g.hands,
            received_ms: now_ms,
        })
    }

    /// Drain everything pending and keep only the newest reading
    pub fn latest(&mut self, now_ms: u64) -> Option<GestureFrame> {
        let mut latest = None;
        while let Some(frame) = self.try_recv(now_ms) {
            latest = Some(frame);
        }
        latest
    }
}
