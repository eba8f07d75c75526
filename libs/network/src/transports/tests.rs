//! Ingest transport tests
//!
//! Real loopback sockets, no mocks.

use super::*;
use crate::TransportError;
use actuator_types::{ActuatorPose, HopPhase};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Records everything it is given; reports a limit hit for |dx| above a bound
struct RecordingSink {
    records: Vec<DeltaRecord>,
    limit_above: f64,
}

impl RecordingSink {
    fn new(limit_above: f64) -> Self {
        Self {
            records: Vec::new(),
            limit_above,
        }
    }
}

impl DeltaSink for RecordingSink {
    fn apply(&mut self, record: DeltaRecord) -> ApplyOutcome {
        self.records.push(record);
        ApplyOutcome {
            pose: ActuatorPose::ORIGIN,
            limit_x: record.dx.abs() > self.limit_above,
            limit_y: false,
            hop_started: false,
            hop: HopPhase::Idle,
        }
    }
}

fn loopback_config(max_record_len: usize) -> TcpIngestConfig {
    TcpIngestConfig {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        backlog: 5,
        max_record_len,
    }
}

async fn listener(max_record_len: usize) -> (TcpIngestListener, SocketAddr) {
    let listener =
        TcpIngestListener::bind(loopback_config(max_record_len), Arc::new(IngestStats::new()))
            .unwrap();
    let addr = listener.local_addr();
    (listener, addr)
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn test_records_applied_in_order() {
        let (listener, addr) = listener(256).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"1,2,3\n4,5,6\n").await.unwrap();
            stream.write_all(b"7,8,9\n").await.unwrap();
            stream.shutdown().await.unwrap();
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(f64::MAX);
        let summary = session.serve(&mut sink).await.unwrap();
        client.await.unwrap();

        assert_eq!(
            sink.records,
            vec![
                DeltaRecord::new(1.0, 2.0, 3.0),
                DeltaRecord::new(4.0, 5.0, 6.0),
                DeltaRecord::new(7.0, 8.0, 9.0),
            ]
        );
        assert_eq!(summary.records_applied, 3);
        assert_eq!(summary.records_discarded, 0);
        assert_eq!(summary.bytes_received, 18);
    }

    #[tokio::test]
    async fn test_record_split_across_writes() {
        let (listener, addr) = listener(256).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"10,2").await.unwrap();
            stream.flush().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            stream.write_all(b"0,30\n").await.unwrap();
            stream.shutdown().await.unwrap();
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(f64::MAX);
        session.serve(&mut sink).await.unwrap();
        client.await.unwrap();

        assert_eq!(sink.records, vec![DeltaRecord::new(10.0, 20.0, 30.0)]);
    }

    #[tokio::test]
    async fn test_malformed_records_discarded() {
        let (listener, addr) = listener(256).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"1,2\nabc,1,1\n\n7,8,9\n")
                .await
                .unwrap();
            stream.shutdown().await.unwrap();
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(f64::MAX);
        let summary = session.serve(&mut sink).await.unwrap();
        client.await.unwrap();

        assert_eq!(sink.records, vec![DeltaRecord::new(7.0, 8.0, 9.0)]);
        assert_eq!(summary.records_applied, 1);
        // The blank line is skipped, not counted
        assert_eq!(summary.records_discarded, 2);
    }

    #[tokio::test]
    async fn test_unterminated_record_applied_on_close() {
        let (listener, addr) = listener(256).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"100,0,0").await.unwrap();
            stream.shutdown().await.unwrap();
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(f64::MAX);
        session.serve(&mut sink).await.unwrap();
        client.await.unwrap();

        assert_eq!(sink.records, vec![DeltaRecord::new(100.0, 0.0, 0.0)]);
    }

    #[tokio::test]
    async fn test_oversized_record_discarded() {
        let (listener, addr) = listener(16).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let long = format!("{},0,0\n", "1".repeat(40));
            stream.write_all(long.as_bytes()).await.unwrap();
            stream.write_all(b"1,1,1\n").await.unwrap();
            stream.shutdown().await.unwrap();
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(f64::MAX);
        let summary = session.serve(&mut sink).await.unwrap();
        client.await.unwrap();

        assert_eq!(sink.records, vec![DeltaRecord::new(1.0, 1.0, 1.0)]);
        assert_eq!(summary.records_discarded, 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_oversized_warning_reports_record_limit() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (listener, addr) = listener(16).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(format!("{}\n", "9".repeat(40)).as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(f64::MAX);
        let summary = session.serve(&mut sink).await.unwrap();
        client.await.unwrap();

        assert_eq!(summary.records_discarded, 1);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Discarding oversized ingest record"), "{}", output);
        assert!(output.contains("max=16"), "{}", output);
        assert!(output.contains("len=40"), "{}", output);
    }
}

mod acknowledgments {
    use super::*;

    #[tokio::test]
    async fn test_limit_hit_writes_exact_ack() {
        let (listener, addr) = listener(256).await;

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"5000,0,0\n").await.unwrap();

            let mut ack = [0u8; 8];
            stream.read_exact(&mut ack).await.unwrap();
            assert_eq!(&ack, b"hitlimit");

            // An in-bounds record produces no reply
            stream.write_all(b"1,0,0\n").await.unwrap();
            stream.shutdown().await.unwrap();

            let mut rest = Vec::new();
            stream.read_to_end(&mut rest).await.unwrap();
            assert!(rest.is_empty(), "unexpected bytes: {:?}", rest);
        });

        let mut session = listener.accept().await.unwrap();
        let mut sink = RecordingSink::new(1000.0);
        let summary = session.serve(&mut sink).await.unwrap();
        drop(session);
        client.await.unwrap();

        assert_eq!(summary.records_applied, 2);
        assert_eq!(summary.limit_hits, 1);
        assert_eq!(listener.stats().snapshot().acks_sent, 1);
    }
}

mod setup {
    use super::*;

    #[tokio::test]
    async fn test_bind_conflict_is_an_error() {
        let (_first, addr) = listener(256).await;

        let config = TcpIngestConfig {
            bind_address: addr,
            ..loopback_config(256)
        };
        let result = TcpIngestListener::bind(config, Arc::new(IngestStats::new()));
        assert!(matches!(result, Err(TransportError::Network { .. })));
    }

    #[tokio::test]
    async fn test_zero_backlog_rejected() {
        let config = TcpIngestConfig {
            backlog: 0,
            ..loopback_config(256)
        };
        let result = TcpIngestListener::bind(config, Arc::new(IngestStats::new()));
        assert!(matches!(result, Err(TransportError::Configuration { .. })));
    }

    #[test]
    fn test_default_config_matches_demo() {
        let config = TcpIngestConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:9999".parse::<SocketAddr>().unwrap());
        assert_eq!(config.backlog, 5);
        assert_eq!(config.max_record_len, 256);
    }
}
