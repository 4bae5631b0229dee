//! Blocking serial driver for the DFRobot DFPlayer Pro.
//!
//! [`DeviceController`] owns a serial channel and exposes one method per module
//! operation. Each call validates its argument, writes an `AT+...` frame, waits a
//! fixed settle delay and reads back whatever the module sent.
//!
//! ```rust,ignore
//! use dfplayer_driver::{ControllerConfig, DeviceController};
//!
//! let config = ControllerConfig::new(17, 16).with_device("/dev/ttyUSB0");
//! let mut player = DeviceController::open(&config)?;
//!
//! if player.test_connection()?.is_some() {
//!     player.set_volume(15)?;
//!     player.play_next()?;
//! }
//! ```
//!
//! Results are `Ok(Some(text))` when the module answered, `Ok(None)` when it
//! stayed silent, and `Err(_)` when the request was invalid or the port failed.

mod config;
mod controller;
mod error;
pub mod mock;
#[cfg(feature = "serial")]
mod serial;
mod transport;

pub use config::*;
pub use controller::DeviceController;
pub use error::*;
#[cfg(feature = "serial")]
pub use serial::UartTransport;
pub use transport::*;

pub use dfplayer_protocol as protocol;
