//! The DFPlayer Pro controller.
//!
//! Every operation goes through the same path: validate, encode, write, wait
//! the settle delay, read once, decode. A module that stays silent yields
//! `Ok(None)`; an argument outside its domain yields an error before anything
//! is written.

use dfplayer_protocol::{
    BaudRate, Command, FrameCodec, PlayMode, ProtocolResult, QueryKind, Switch, Volume,
};
use tracing::{debug, warn};

use crate::config::TimingConfig;
use crate::error::{DriverError, DriverResult};
use crate::transport::{Delay, FrameFormat, SerialTransport, StdDelay};

#[cfg(feature = "serial")]
use crate::config::ControllerConfig;
#[cfg(feature = "serial")]
use crate::serial::UartTransport;

/// Command/response driver for one DFPlayer Pro.
///
/// Owns its transport for its whole lifetime. Methods take `&mut self`, so at
/// most one request is outstanding per controller.
#[derive(Debug)]
pub struct DeviceController<T: SerialTransport, D: Delay = StdDelay> {
    transport: T,
    delay: D,
    timing: TimingConfig,
}

#[cfg(feature = "serial")]
impl DeviceController<UartTransport, StdDelay> {
    /// Open the configured serial port and set it up for the module.
    pub fn open(config: &ControllerConfig) -> DriverResult<Self> {
        config.validate()?;
        let transport = UartTransport::open(&config.uart)?;
        Self::new(transport, StdDelay, config.timing.clone())
    }
}

impl<T: SerialTransport, D: Delay> DeviceController<T, D> {
    /// Wrap an open transport, configuring it for 8 data bits, no parity, 1 stop bit.
    pub fn new(mut transport: T, delay: D, timing: TimingConfig) -> DriverResult<Self> {
        transport.configure(FrameFormat::EIGHT_N_ONE)?;
        Ok(DeviceController {
            transport,
            delay,
            timing,
        })
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the delay source.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Get the settle delays in use.
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Take the controller apart, returning the transport and delay.
    pub fn into_parts(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Send a command and collect whatever the module answers.
    pub fn execute(&mut self, command: &Command) -> DriverResult<Option<String>> {
        let frame = checked(command.encode())?;
        let settle = if command.is_connection_test() {
            self.timing.connection_test_delay()
        } else {
            self.timing.command_delay()
        };
        self.transact(&frame, settle, command.is_query())
    }

    fn transact(
        &mut self,
        frame: &[u8],
        settle: std::time::Duration,
        query: bool,
    ) -> DriverResult<Option<String>> {
        let request = String::from_utf8_lossy(frame);
        debug!(request = %request.escape_debug(), query, "sending frame");

        let written = self.transport.write(frame)?;
        if written != frame.len() {
            return Err(DriverError::ShortWrite {
                expected: frame.len(),
                written,
            });
        }

        self.delay.delay(settle);

        let data = self.transport.read_available()?;
        match FrameCodec::decode_response(&data) {
            Ok(Some(text)) => {
                debug!(response = %text.escape_debug(), "received response");
                Ok(Some(text))
            }
            Ok(None) if query => {
                warn!(request = %request.trim_end(), "no answer to query");
                Ok(None)
            }
            Ok(None) => {
                debug!(request = %request.trim_end(), "no response");
                Ok(None)
            }
            Err(e) => {
                warn!(len = e.bytes.len(), "response is not valid UTF-8");
                Err(e.into())
            }
        }
    }

    /// Send `AT+<body>`.
    ///
    /// `body` is the full command text after the prefix, e.g. `VOL=15`.
    pub fn send_command(&mut self, body: &str) -> DriverResult<Option<String>> {
        self.execute(&Command::Raw {
            body: body.to_string(),
        })
    }

    /// Send the bare `AT` frame and wait the longer connection-test delay.
    pub fn test_connection(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Test)
    }

    // ========== Setters ==========

    /// Set the volume (0-30).
    pub fn set_volume(&mut self, volume: i64) -> DriverResult<Option<String>> {
        let volume = checked(Volume::new(volume))?;
        self.execute(&Command::SetVolume(volume))
    }

    /// Set the play mode by code.
    ///
    /// 1: repeat one, 2: repeat all, 3: play one then pause, 4: shuffle,
    /// 5: repeat folder.
    pub fn set_play_mode(&mut self, mode: i64) -> DriverResult<Option<String>> {
        let mode = checked(PlayMode::from_code(mode))?;
        self.execute(&Command::SetPlayMode(mode))
    }

    /// Tell the module to change its UART speed.
    ///
    /// The local port keeps its current speed. After a successful change the
    /// caller must reopen the controller at the new rate; until then the two
    /// sides cannot understand each other.
    pub fn set_baudrate(&mut self, baud_rate: u32) -> DriverResult<Option<String>> {
        let rate = checked(BaudRate::from_bps(baud_rate))?;
        self.execute(&Command::SetBaudRate(rate))
    }

    // ========== Queries ==========

    /// Read the volume.
    pub fn query_volume(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::QueryVolume)
    }

    /// Read the play mode.
    pub fn query_play_mode(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::QueryPlayMode)
    }

    /// Read the number of the file being played.
    pub fn query_playing_file_number(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Query(QueryKind::PlayingFileNumber))
    }

    /// Read the total number of files.
    pub fn query_total_file_count(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Query(QueryKind::TotalFileCount))
    }

    /// Read the elapsed time of the current track.
    pub fn query_played_time(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Query(QueryKind::PlayedTime))
    }

    /// Read the total time of the current track.
    pub fn query_total_time(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Query(QueryKind::TotalTime))
    }

    /// Read the name of the file being played.
    pub fn query_playing_file_name(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Query(QueryKind::PlayingFileName))
    }

    // ========== Toggles ==========

    /// Turn the amplifier on.
    pub fn amplifier_on(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Amplifier(Switch::On))
    }

    /// Turn the amplifier off.
    pub fn amplifier_off(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Amplifier(Switch::Off))
    }

    /// Turn the voice prompt on.
    pub fn prompt_on(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Prompt(Switch::On))
    }

    /// Turn the voice prompt off.
    pub fn prompt_off(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Prompt(Switch::Off))
    }

    /// Turn the LED on.
    pub fn led_on(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Led(Switch::On))
    }

    /// Turn the LED off.
    pub fn led_off(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::Led(Switch::Off))
    }

    // ========== Playback ==========

    /// Play the next track.
    pub fn play_next(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::PlayNext)
    }

    /// Play the previous track.
    pub fn play_last(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::PlayLast)
    }

    /// Toggle play/pause.
    pub fn play_pause(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::PlayPause)
    }

    /// Rewind by `seconds`.
    ///
    /// `seconds` is unsigned, so negative values cannot be expressed.
    pub fn fast_rewind(&mut self, seconds: u32) -> DriverResult<Option<String>> {
        self.execute(&Command::FastRewind { seconds })
    }

    /// Fast forward by `seconds`.
    ///
    /// `seconds` is unsigned, so negative values cannot be expressed.
    pub fn fast_forward(&mut self, seconds: u32) -> DriverResult<Option<String>> {
        self.execute(&Command::FastForward { seconds })
    }

    /// Restart the current track at `second`.
    ///
    /// `second` is unsigned, so negative values cannot be expressed.
    pub fn start_from_second(&mut self, second: u32) -> DriverResult<Option<String>> {
        self.execute(&Command::StartFrom { second })
    }

    /// Play a file by number.
    ///
    /// `number` is unsigned, so negative values cannot be expressed.
    pub fn play_file_by_number(&mut self, number: u32) -> DriverResult<Option<String>> {
        self.execute(&Command::PlayNumber { number })
    }

    /// Play a file by path, e.g. `/song.mp3`.
    pub fn play_file_by_path(&mut self, path: &str) -> DriverResult<Option<String>> {
        self.execute(&Command::PlayFile {
            path: path.to_string(),
        })
    }

    // ========== Storage & Recording ==========

    /// Delete the file being played.
    pub fn delete_playing_file(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::DeletePlaying)
    }

    /// Start or pause recording.
    pub fn record_and_pause(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::RecordPause)
    }

    /// Save the recording.
    pub fn save_recording(&mut self) -> DriverResult<Option<String>> {
        self.execute(&Command::SaveRecording)
    }
}

/// Log and convert a validation failure.
fn checked<V>(result: ProtocolResult<V>) -> DriverResult<V> {
    result.map_err(|e| {
        warn!("rejected request: {}", e);
        DriverError::Protocol(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockTransport};
    use std::time::Duration;

    fn controller(transport: MockTransport) -> DeviceController<MockTransport, MockDelay> {
        DeviceController::new(transport, MockDelay::new(), TimingConfig::default()).unwrap()
    }

    #[test]
    fn test_new_configures_8n1() {
        let ctrl = controller(MockTransport::new());
        assert_eq!(ctrl.transport().format(), Some(FrameFormat::EIGHT_N_ONE));
        assert!(ctrl.transport().writes().is_empty());
    }

    #[test]
    fn test_send_command_frame_and_reply() {
        let mut ctrl = controller(MockTransport::new().with_reply("OK\r\n"));
        let reply = ctrl.send_command("VOL=15").unwrap();
        assert_eq!(reply, Some("OK\r\n".to_string()));
        assert_eq!(ctrl.transport().writes(), &[b"AT+VOL=15\r\n".to_vec()]);
        assert_eq!(ctrl.delay().waits(), &[Duration::from_millis(100)]);
    }

    #[test]
    fn test_silence_is_none() {
        let mut ctrl = controller(MockTransport::new());
        assert_eq!(ctrl.play_next().unwrap(), None);
    }

    #[test]
    fn test_short_write() {
        let mut ctrl = controller(MockTransport::new().with_write_limit(4));
        let err = ctrl.play_pause().unwrap_err();
        assert!(matches!(
            err,
            DriverError::ShortWrite {
                expected: 12,
                written: 4
            }
        ));
        assert!(ctrl.delay().waits().is_empty());
    }

    #[test]
    fn test_io_failure_is_not_domain_error() {
        let mut ctrl = controller(MockTransport::new().failing());
        let err = ctrl.query_volume().unwrap_err();
        assert!(matches!(err, DriverError::Io(_)));
        assert!(!err.is_domain_error());
    }

    #[test]
    fn test_invalid_utf8_surfaces_bytes() {
        let mut ctrl = controller(MockTransport::new().with_reply(vec![0xC3, 0x28]));
        let err = ctrl.query_playing_file_name().unwrap_err();
        match err {
            DriverError::InvalidUtf8 { bytes } => assert_eq!(bytes, vec![0xC3, 0x28]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_timing() {
        let timing = TimingConfig {
            command_delay_ms: 20,
            connection_test_delay_ms: 900,
        };
        let mut ctrl =
            DeviceController::new(MockTransport::new(), MockDelay::new(), timing).unwrap();
        ctrl.test_connection().unwrap();
        ctrl.led_off().unwrap();
        assert_eq!(
            ctrl.delay().waits(),
            &[Duration::from_millis(900), Duration::from_millis(20)]
        );
    }
}
