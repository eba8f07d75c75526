//! Newline record framing
//!
//! TCP delivers a byte stream, so records are delimited explicitly with
//! [`RECORD_DELIMITER`]. A trailing `\r` is dropped. Lines longer than the
//! configured maximum are discarded whole, including when the delimiter only
//! shows up several reads later.

use actuator_types::protocol::RECORD_DELIMITER;
use bytes::{Bytes, BytesMut};

/// One unit produced by the framer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Record payload without its delimiter
    Record(Bytes),
    /// A line that exceeded the maximum record length and was dropped
    Oversized { len: usize },
}

/// Incremental splitter from raw reads to records
#[derive(Debug)]
pub struct RecordFramer {
    buffer: BytesMut,
    max_record_len: usize,
    /// Skipping an oversized line until its delimiter arrives
    discarding: bool,
    discarded_len: usize,
}

impl RecordFramer {
    pub fn new(max_record_len: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(max_record_len + 1),
            max_record_len,
            discarding: false,
            discarded_len: 0,
        }
    }

    /// Append bytes from a read
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Bytes held back waiting for a delimiter
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Next complete frame, if the buffer holds one
    pub fn next_frame(&mut self) -> Option<Frame> {
        if let Some(pos) = self.buffer.iter().position(|&b| b == RECORD_DELIMITER) {
            let mut line = self.buffer.split_to(pos + 1);
            line.truncate(pos);

            if self.discarding {
                let len = self.discarded_len + pos;
                self.discarding = false;
                self.discarded_len = 0;
                return Some(Frame::Oversized { len });
            }

            return Some(self.make_frame(line));
        }

        // A trailing `\r` may belong to a CRLF whose `\n` is still in flight
        let held_cr = usize::from(self.buffer.last() == Some(&b'\r'));
        if self.buffer.len() - held_cr > self.max_record_len {
            self.discarded_len += self.buffer.len();
            self.discarding = true;
            self.buffer.clear();
        }

        None
    }

    /// Flush whatever is left once the peer has closed the stream
    pub fn finish(&mut self) -> Option<Frame> {
        if self.discarding {
            let len = self.discarded_len + self.buffer.len();
            self.discarding = false;
            self.discarded_len = 0;
            self.buffer.clear();
            return Some(Frame::Oversized { len });
        }

        if self.buffer.is_empty() {
            return None;
        }

        let rest = self.buffer.split();
        Some(self.make_frame(rest))
    }

    fn make_frame(&self, mut line: BytesMut) -> Frame {
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        if line.len() > self.max_record_len {
            Frame::Oversized { len: line.len() }
        } else {
            Frame::Record(line.freeze())
        }
    }
}
