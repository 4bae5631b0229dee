//! Transport and timing seams.
//!
//! The controller never touches a serial port or a clock directly. It talks to
//! a [`SerialTransport`] and waits through a [`Delay`], so the same code runs
//! against a host serial port, a board UART, or the recording mocks in
//! [`crate::mock`].

use std::io;
use std::time::Duration;

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    /// 5 bits.
    Five,
    /// 6 bits.
    Six,
    /// 7 bits.
    Seven,
    /// 8 bits.
    Eight,
}

/// Parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// No parity bit.
    None,
    /// Odd parity.
    Odd,
    /// Even parity.
    Even,
}

/// Number of stop bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    /// One stop bit.
    One,
    /// Two stop bits.
    Two,
}

/// Character framing of a serial line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameFormat {
    /// Data bits per character.
    pub data_bits: DataBits,
    /// Parity mode.
    pub parity: Parity,
    /// Stop bits per character.
    pub stop_bits: StopBits,
}

impl FrameFormat {
    /// 8 data bits, no parity, 1 stop bit: the only format the module speaks.
    pub const EIGHT_N_ONE: FrameFormat = FrameFormat {
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };
}

impl Default for FrameFormat {
    fn default() -> Self {
        FrameFormat::EIGHT_N_ONE
    }
}

/// A byte-oriented serial channel that is already open.
///
/// Opening is left to the implementing type's constructor; the handle is
/// released when the value is dropped.
pub trait SerialTransport {
    /// Apply character framing to the open channel.
    fn configure(&mut self, format: FrameFormat) -> io::Result<()>;

    /// Write bytes, returning how many were accepted.
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Return whatever is currently buffered, without waiting.
    ///
    /// An empty vector means nothing has arrived.
    fn read_available(&mut self) -> io::Result<Vec<u8>>;
}

impl<T: SerialTransport + ?Sized> SerialTransport for Box<T> {
    fn configure(&mut self, format: FrameFormat) -> io::Result<()> {
        (**self).configure(format)
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        (**self).write(data)
    }

    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        (**self).read_available()
    }
}

/// A blocking wait.
pub trait Delay {
    /// Block the calling thread for `duration`.
    fn delay(&mut self, duration: Duration);
}

/// [`Delay`] backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_default_format_is_8n1() {
        let format = FrameFormat::default();
        assert_eq!(format.data_bits, DataBits::Eight);
        assert_eq!(format.parity, Parity::None);
        assert_eq!(format.stop_bits, StopBits::One);
    }

    #[test]
    fn test_std_delay_blocks() {
        let start = Instant::now();
        StdDelay.delay(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
