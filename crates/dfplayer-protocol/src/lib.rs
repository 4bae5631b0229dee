//! DFPlayer Pro AT Command Protocol
//!
//! This crate provides types and utilities for talking to the DFRobot DFPlayer Pro
//! audio module over its UART AT-command interface. The protocol is a simple
//! line-based text exchange; this crate only builds and interprets the text; it
//! performs no I/O.
//!
//! # Protocol Overview
//!
//! - **Commands** (host → module): `AT+<NAME>[=<ARG>]` terminated with `\r\n`
//! - **Connection test**: the bare `AT\r\n` frame
//! - **Responses** (module → host): free-form text such as `OK` or `VOL=15`,
//!   read back as whatever bytes arrived after a settle delay
//!
//! # Command Types
//!
//! - **Setters**: `VOL=<n>`, `PLAYMODE=<n>`, `BAUDRATE=<n>` with validated arguments
//! - **Queries**: `VOL=?`, `PLAYMODE=?`, `QUERY=1` through `QUERY=5`
//! - **Toggles**: `AMP`, `PROMPT` and `LED` with `ON`/`OFF`
//! - **Playback**: `PLAY=NEXT`, `PLAY=LAST`, `PLAY=PP`, `TIME=...`, `PLAYNUM=...`, `PLAYFILE=...`
//! - **Recording and storage**: `REC=RP`, `REC=SAVE`, `DEL`
//!
//! # Example
//!
//! ```rust
//! use dfplayer_protocol::{Command, Response, Volume};
//!
//! let cmd = Command::SetVolume(Volume::new(15).unwrap());
//! assert_eq!(cmd.encode().unwrap(), b"AT+VOL=15\r\n");
//!
//! let response = Response::parse("OK");
//! assert!(response.is_ok());
//! ```

mod codec;
mod commands;
mod error;
mod responses;

pub use codec::*;
pub use commands::*;
pub use error::*;
pub use responses::*;
