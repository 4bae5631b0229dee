//! Controller configuration.
//!
//! Loaded from YAML or built in code. Every field has a default, so a file only
//! needs to name what differs:
//!
//! ```yaml
//! uart:
//!   device: /dev/ttyUSB0
//!   tx_pin: 17
//!   rx_pin: 16
//! timing:
//!   connection_test_delay_ms: 800
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, DriverResult};

/// Default UART speed of the module.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default UART peripheral id.
pub const DEFAULT_UART_ID: u8 = 1;

/// Default TX GPIO.
pub const DEFAULT_TX_PIN: u32 = 17;

/// Default RX GPIO.
pub const DEFAULT_RX_PIN: u32 = 16;

/// Default serial device on hosts.
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";

/// Settle delay after an ordinary command (milliseconds).
pub const DEFAULT_COMMAND_DELAY_MS: u64 = 100;

/// Settle delay after the connection test (milliseconds).
pub const DEFAULT_CONNECTION_TEST_DELAY_MS: u64 = 500;

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    /// Serial channel settings.
    pub uart: UartConfig,
    /// Settle delays.
    pub timing: TimingConfig,
}

/// Serial channel settings.
///
/// `uart_id`, `tx_pin` and `rx_pin` select the peripheral on boards that route
/// UARTs to GPIOs; `device` names the port on hosts with an OS serial driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UartConfig {
    /// Serial device path (e.g. `/dev/ttyUSB0`, `COM3`).
    pub device: String,
    /// UART peripheral id.
    pub uart_id: u8,
    /// TX GPIO number.
    pub tx_pin: u32,
    /// RX GPIO number.
    pub rx_pin: u32,
    /// Local line speed.
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        UartConfig {
            device: DEFAULT_DEVICE.to_string(),
            uart_id: DEFAULT_UART_ID,
            tx_pin: DEFAULT_TX_PIN,
            rx_pin: DEFAULT_RX_PIN,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Settle delays between writing a frame and reading the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay after ordinary commands.
    pub command_delay_ms: u64,
    /// Delay after the `AT` connection test.
    pub connection_test_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            command_delay_ms: DEFAULT_COMMAND_DELAY_MS,
            connection_test_delay_ms: DEFAULT_CONNECTION_TEST_DELAY_MS,
        }
    }
}

impl TimingConfig {
    /// Delay after ordinary commands.
    pub fn command_delay(&self) -> Duration {
        Duration::from_millis(self.command_delay_ms)
    }

    /// Delay after the connection test.
    pub fn connection_test_delay(&self) -> Duration {
        Duration::from_millis(self.connection_test_delay_ms)
    }
}

impl ControllerConfig {
    /// Create a configuration for the given pins with default speed and UART id.
    pub fn new(tx_pin: u32, rx_pin: u32) -> Self {
        ControllerConfig {
            uart: UartConfig {
                tx_pin,
                rx_pin,
                ..UartConfig::default()
            },
            timing: TimingConfig::default(),
        }
    }

    /// Set the local line speed.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.uart.baud_rate = baud_rate;
        self
    }

    /// Set the UART peripheral id.
    pub fn with_uart_id(mut self, uart_id: u8) -> Self {
        self.uart.uart_id = uart_id;
        self
    }

    /// Set the serial device path.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.uart.device = device.into();
        self
    }

    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> DriverResult<Self> {
        let config: ControllerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> DriverResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Check for values that cannot open a channel.
    pub fn validate(&self) -> DriverResult<()> {
        if self.uart.baud_rate == 0 {
            return Err(DriverError::Config("baud_rate must be non-zero".to_string()));
        }
        if self.uart.device.trim().is_empty() {
            return Err(DriverError::Config("device must not be empty".to_string()));
        }
        Ok(())
    }
}
