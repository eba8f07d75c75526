//! Ingest counters
//!
//! Lock-free counters shared between the ingest task (writer) and the render
//! loop (periodic reader).

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct IngestStats {
    connections_accepted: AtomicU64,
    records_applied: AtomicU64,
    records_discarded: AtomicU64,
    limit_hits: AtomicU64,
    acks_sent: AtomicU64,
    bytes_received: AtomicU64,
}

/// Point-in-time copy of [`IngestStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStatsSnapshot {
    pub connections_accepted: u64,
    pub records_applied: u64,
    pub records_discarded: u64,
    pub limit_hits: u64,
    pub acks_sent: u64,
    pub bytes_received: u64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_connection(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_bytes(&self, bytes: usize) {
        self.bytes_received.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_applied(&self, limit_hit: bool) {
        self.records_applied.fetch_add(1, Ordering::Relaxed);
        if limit_hit {
            self.limit_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_discarded(&self) {
        self.records_discarded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_ack(&self) {
        self.acks_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IngestStatsSnapshot {
        IngestStatsSnapshot {
            connections_accepted: self.connections_accepted.load(Ordering::Relaxed),
            records_applied: self.records_applied.load(Ordering::Relaxed),
            records_discarded: self.records_discarded.load(Ordering::Relaxed),
            limit_hits: self.limit_hits.load(Ordering::Relaxed),
            acks_sent: self.acks_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let stats = IngestStats::new();
        stats.record_connection();
        stats.record_bytes(12);
        stats.record_applied(false);
        stats.record_applied(true);
        stats.record_ack();
        stats.record_discarded();

        assert_eq!(
            stats.snapshot(),
            IngestStatsSnapshot {
                connections_accepted: 1,
                records_applied: 2,
                records_discarded: 1,
                limit_hits: 1,
                acks_sent: 1,
                bytes_received: 12,
            }
        );
    }
}
