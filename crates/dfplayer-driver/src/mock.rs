//! Recording transport and delay for tests and dry runs.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::transport::{Delay, FrameFormat, SerialTransport};

/// In-memory transport that records every write and replays queued replies.
///
/// Each call to `read_available` pops one queued reply; with nothing queued it
/// returns no bytes, the same as a silent module.
#[derive(Debug, Default)]
pub struct MockTransport {
    writes: Vec<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
    format: Option<FrameFormat>,
    write_limit: Option<usize>,
    fail_io: bool,
}

impl MockTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next read.
    pub fn queue_reply(&mut self, reply: impl Into<Vec<u8>>) {
        self.replies.push_back(reply.into());
    }

    /// Builder form of [`MockTransport::queue_reply`].
    pub fn with_reply(mut self, reply: impl Into<Vec<u8>>) -> Self {
        self.queue_reply(reply);
        self
    }

    /// Accept at most `limit` bytes per write.
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Fail every write and read with a broken-pipe error.
    pub fn failing(mut self) -> Self {
        self.fail_io = true;
        self
    }

    /// Frames written so far, oldest first.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// The most recent frame as text.
    pub fn last_write(&self) -> Option<String> {
        self.writes
            .last()
            .map(|frame| String::from_utf8_lossy(frame).to_string())
    }

    /// Framing applied by `configure`, if any.
    pub fn format(&self) -> Option<FrameFormat> {
        self.format
    }

    /// Number of replies not yet read.
    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    fn broken_pipe() -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "mock transport failure")
    }
}

impl SerialTransport for MockTransport {
    fn configure(&mut self, format: FrameFormat) -> io::Result<()> {
        self.format = Some(format);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.fail_io {
            return Err(Self::broken_pipe());
        }
        let accepted = self.write_limit.map_or(data.len(), |limit| limit.min(data.len()));
        self.writes.push(data[..accepted].to_vec());
        Ok(accepted)
    }

    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        if self.fail_io {
            return Err(Self::broken_pipe());
        }
        Ok(self.replies.pop_front().unwrap_or_default())
    }
}

/// [`Delay`] that records requested waits instead of sleeping.
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    waits: Vec<Duration>,
}

impl MockDelay {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far, oldest first.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Sum of all requested waits.
    pub fn total(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl Delay for MockDelay {
    fn delay(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}
