//! TCP Ingest Transport Implementation
//!
//! Single-connection TCP listener for actuator delta records. One client is
//! served at a time; further clients wait in the listen backlog until the
//! current session ends. A session ends when the peer closes the stream or a
//! read/write fails, after which the listener goes back to accepting.

use super::framing::{Frame, RecordFramer};
use super::stats::IngestStats;
use super::DeltaSink;
use crate::{Result, TransportError};
use actuator_types::protocol::{DEFAULT_BACKLOG, DEFAULT_PORT, LIMIT_ACK, MAX_RECORD_LEN};
use actuator_types::DeltaRecord;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, error, info, trace, warn};

/// Pause after a failed accept before trying again
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Bytes requested per socket read; unrelated to the record length limit
const READ_CHUNK_SIZE: usize = 1024;

/// TCP ingest listener configuration
#[derive(Debug, Clone)]
pub struct TcpIngestConfig {
    /// Local address to bind to
    pub bind_address: SocketAddr,
    /// Pending-connection queue length
    pub backlog: u32,
    /// Longest accepted record, delimiter excluded
    pub max_record_len: usize,
}

impl Default for TcpIngestConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            backlog: DEFAULT_BACKLOG,
            max_record_len: MAX_RECORD_LEN,
        }
    }
}

/// Bound TCP listener serving one ingest client at a time
pub struct TcpIngestListener {
    config: TcpIngestConfig,
    listener: TcpListener,
    local_addr: SocketAddr,
    stats: Arc<IngestStats>,
}

impl TcpIngestListener {
    /// Open, bind and listen. Must be called from within a tokio runtime.
    pub fn bind(config: TcpIngestConfig, stats: Arc<IngestStats>) -> Result<Self> {
        if config.backlog == 0 {
            return Err(TransportError::configuration(
                "Listen backlog must be at least 1",
                Some("backlog"),
            ));
        }
        if config.max_record_len == 0 {
            return Err(TransportError::configuration(
                "Maximum record length must be at least 1",
                Some("max_record_len"),
            ));
        }

        let socket = if config.bind_address.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(|e| TransportError::network_with_source("Failed to open TCP socket", e))?;

        socket
            .bind(config.bind_address)
            .map_err(|e| TransportError::network_with_source("Failed to bind TCP listener", e))?;

        let listener = socket
            .listen(config.backlog)
            .map_err(|e| TransportError::network_with_source("Failed to listen on TCP socket", e))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| TransportError::network_with_source("Failed to get local address", e))?;

        info!(
            "📡 Ingest listener on {} (backlog {})",
            local_addr, config.backlog
        );

        Ok(Self {
            config,
            listener,
            local_addr,
            stats,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn stats(&self) -> Arc<IngestStats> {
        self.stats.clone()
    }

    /// Wait for the next client
    pub async fn accept(&self) -> Result<IngestSession> {
        let (stream, peer_addr) = self
            .listener
            .accept()
            .await
            .map_err(|e| TransportError::network_with_source("Failed to accept TCP connection", e))?;

        // Configure TCP socket
        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY: {}", e);
        }

        self.stats.record_connection();
        info!("🔌 Accepted ingest connection from {}", peer_addr);

        Ok(IngestSession::new(
            stream,
            peer_addr,
            self.config.max_record_len,
            self.stats.clone(),
        ))
    }

    /// Accept and serve clients one after another.
    ///
    /// Only returns on an error the loop cannot move past; accept failures
    /// and broken sessions are logged and the listener keeps going.
    pub async fn run<S: DeltaSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        loop {
            let mut session = match self.accept().await {
                Ok(session) => session,
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Ingest accept failed");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "Ingest listener stopping");
                    return Err(e);
                }
            };

            match session.serve(sink).await {
                Ok(summary) => info!(
                    peer = %summary.peer_addr,
                    records = summary.records_applied,
                    discarded = summary.records_discarded,
                    limit_hits = summary.limit_hits,
                    duration_ms = summary.duration.as_millis() as u64,
                    "🔌 Ingest client disconnected"
                ),
                Err(e) => warn!(error = %e, "Ingest session ended"),
            }
        }
    }
}

/// Per-connection totals reported when a session ends
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub peer_addr: SocketAddr,
    pub records_applied: u64,
    pub records_discarded: u64,
    pub limit_hits: u64,
    pub bytes_received: u64,
    pub duration: Duration,
}

/// One connected ingest client
pub struct IngestSession {
    stream: TcpStream,
    peer_addr: SocketAddr,
    connected_at: Instant,
    framer: RecordFramer,
    max_record_len: usize,
    /// Reusable read buffer
    read_buffer: Vec<u8>,
    stats: Arc<IngestStats>,
    summary: SessionSummary,
}

impl IngestSession {
    pub(crate) fn new(
        stream: TcpStream,
        peer_addr: SocketAddr,
        max_record_len: usize,
        stats: Arc<IngestStats>,
    ) -> Self {
        Self {
            stream,
            peer_addr,
            connected_at: Instant::now(),
            framer: RecordFramer::new(max_record_len),
            max_record_len,
            read_buffer: vec![0u8; READ_CHUNK_SIZE],
            stats,
            summary: SessionSummary {
                peer_addr,
                records_applied: 0,
                records_discarded: 0,
                limit_hits: 0,
                bytes_received: 0,
                duration: Duration::ZERO,
            },
        }
    }

    /// Read, frame and apply records until the peer closes the stream
    pub async fn serve<S: DeltaSink + ?Sized>(&mut self, sink: &mut S) -> Result<SessionSummary> {
        loop {
            let n = match self.stream.read(&mut self.read_buffer).await {
                Ok(0) => {
                    if let Some(frame) = self.framer.finish() {
                        self.handle_frame(frame, sink).await?;
                    }
                    break;
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(TransportError::connection_with_source(
                        "Failed to read from ingest client",
                        Some(self.peer_addr),
                        e,
                    ));
                }
            };

            self.stats.record_bytes(n);
            self.summary.bytes_received += n as u64;
            self.framer.extend(&self.read_buffer[..n]);

            while let Some(frame) = self.framer.next_frame() {
                self.handle_frame(frame, sink).await?;
            }
        }

        self.summary.duration = self.connected_at.elapsed();
        Ok(self.summary.clone())
    }

    async fn handle_frame<S: DeltaSink + ?Sized>(&mut self, frame: Frame, sink: &mut S) -> Result<()> {
        let bytes = match frame {
            Frame::Record(bytes) => bytes,
            Frame::Oversized { len } => {
                warn!(
                    peer = %self.peer_addr,
                    len,
                    max = self.max_record_len,
                    "Discarding oversized ingest record"
                );
                self.record_discarded();
                return Ok(());
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            trace!(peer = %self.peer_addr, "Skipping blank line");
            return Ok(());
        }

        let record = match DeltaRecord::from_bytes(&bytes) {
            Ok(record) => record,
            Err(e) => {
                debug!(peer = %self.peer_addr, error = %e, "Discarding ingest record");
                self.record_discarded();
                return Ok(());
            }
        };

        let outcome = sink.apply(record);
        let limit_hit = outcome.limit_hit();

        self.stats.record_applied(limit_hit);
        self.summary.records_applied += 1;

        if limit_hit {
            self.summary.limit_hits += 1;
            self.send_limit_ack().await?;
        }

        Ok(())
    }

    fn record_discarded(&mut self) {
        self.stats.record_discarded();
        self.summary.records_discarded += 1;
    }

    async fn send_limit_ack(&mut self) -> Result<()> {
        self.stream.write_all(LIMIT_ACK).await.map_err(|e| {
            TransportError::connection_with_source(
                "Failed to write limit acknowledgment",
                Some(self.peer_addr),
                e,
            )
        })?;

        // Flush to ensure immediate transmission
        self.stream.flush().await.map_err(|e| {
            TransportError::connection_with_source(
                "Failed to flush TCP stream",
                Some(self.peer_addr),
                e,
            )
        })?;

        self.stats.record_ack();
        debug!(peer = %self.peer_addr, "Sent limit acknowledgment");
        Ok(())
    }
}
