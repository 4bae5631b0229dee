//! Host serial port transport backed by the `serialport` crate.

use std::io::{self, Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::debug;

use crate::config::UartConfig;
use crate::error::DriverResult;
use crate::transport::{DataBits, FrameFormat, Parity, SerialTransport, StopBits};

/// Internal read timeout; reads only ever ask for bytes already buffered.
const PORT_TIMEOUT: Duration = Duration::from_millis(10);

/// An open OS serial port.
///
/// On hosts the port is selected by `device`; the UART id and pin numbers in
/// [`UartConfig`] are only recorded for diagnostics.
pub struct UartTransport {
    port: Box<dyn SerialPort>,
    device: String,
}

impl UartTransport {
    /// Open the port named in `config` at its baud rate.
    pub fn open(config: &UartConfig) -> DriverResult<Self> {
        let port = serialport::new(&config.device, config.baud_rate)
            .timeout(PORT_TIMEOUT)
            .open()
            .map_err(io::Error::from)?;

        debug!(
            device = %config.device,
            baud_rate = config.baud_rate,
            uart_id = config.uart_id,
            tx_pin = config.tx_pin,
            rx_pin = config.rx_pin,
            "serial port opened"
        );

        Ok(UartTransport {
            port,
            device: config.device.clone(),
        })
    }
}

impl std::fmt::Debug for UartTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UartTransport")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl SerialTransport for UartTransport {
    fn configure(&mut self, format: FrameFormat) -> io::Result<()> {
        self.port
            .set_data_bits(match format.data_bits {
                DataBits::Five => serialport::DataBits::Five,
                DataBits::Six => serialport::DataBits::Six,
                DataBits::Seven => serialport::DataBits::Seven,
                DataBits::Eight => serialport::DataBits::Eight,
            })
            .map_err(io::Error::from)?;
        self.port
            .set_parity(match format.parity {
                Parity::None => serialport::Parity::None,
                Parity::Odd => serialport::Parity::Odd,
                Parity::Even => serialport::Parity::Even,
            })
            .map_err(io::Error::from)?;
        self.port
            .set_stop_bits(match format.stop_bits {
                StopBits::One => serialport::StopBits::One,
                StopBits::Two => serialport::StopBits::Two,
            })
            .map_err(io::Error::from)?;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let written = Write::write(&mut self.port, data)?;
        self.port.flush()?;
        Ok(written)
    }

    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        let pending = self.port.bytes_to_read().map_err(io::Error::from)? as usize;
        if pending == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0u8; pending];
        match Read::read(&mut self.port, &mut buffer) {
            Ok(n) => {
                buffer.truncate(n);
                Ok(buffer)
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
