//! Commands that can be sent to the DFPlayer Pro.
//!
//! The module understands a fixed vocabulary:
//! - Validated setters (volume, play mode, baud rate)
//! - Queries (`VOL=?`, `PLAYMODE=?`, `QUERY=<n>`)
//! - ON/OFF toggles for the amplifier, voice prompt and LED
//! - Playback, seeking and recording actions

use crate::codec::FrameCodec;
use crate::error::{ProtocolError, ProtocolResult};

/// Volume level accepted by the module (0-30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    /// Lowest volume.
    pub const MIN: u8 = 0;
    /// Highest volume.
    pub const MAX: u8 = 30;

    /// Create a volume, rejecting values outside 0-30.
    pub fn new(level: i64) -> ProtocolResult<Volume> {
        if level < Self::MIN as i64 || level > Self::MAX as i64 {
            return Err(ProtocolError::VolumeOutOfRange {
                value: level,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Volume(level as u8))
    }

    /// Get the level.
    pub fn level(&self) -> u8 {
        self.0
    }
}

/// Playback mode (`PLAYMODE=<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Repeat the current track (1).
    RepeatOne,
    /// Repeat all tracks (2).
    RepeatAll,
    /// Play the current track once then pause (3).
    PlayOneThenPause,
    /// Play randomly (4).
    Shuffle,
    /// Repeat all tracks in the current folder (5).
    RepeatFolder,
}

impl PlayMode {
    /// Get the wire code for this mode.
    pub fn code(&self) -> u8 {
        match self {
            PlayMode::RepeatOne => 1,
            PlayMode::RepeatAll => 2,
            PlayMode::PlayOneThenPause => 3,
            PlayMode::Shuffle => 4,
            PlayMode::RepeatFolder => 5,
        }
    }

    /// Parse a mode from its wire code.
    pub fn from_code(code: i64) -> ProtocolResult<PlayMode> {
        match code {
            1 => Ok(PlayMode::RepeatOne),
            2 => Ok(PlayMode::RepeatAll),
            3 => Ok(PlayMode::PlayOneThenPause),
            4 => Ok(PlayMode::Shuffle),
            5 => Ok(PlayMode::RepeatFolder),
            _ => Err(ProtocolError::InvalidPlayMode(code)),
        }
    }
}

/// Baud rates the module can be told to switch to (`BAUDRATE=<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudRate {
    /// 9600 baud.
    B9600,
    /// 19200 baud.
    B19200,
    /// 38400 baud.
    B38400,
    /// 57600 baud.
    B57600,
    /// 115200 baud (factory default).
    B115200,
}

impl BaudRate {
    /// All supported rates, slowest first.
    pub const ALL: [BaudRate; 5] = [
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
    ];

    /// Get the rate in bits per second.
    pub fn bps(&self) -> u32 {
        match self {
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115200,
        }
    }

    /// Look up a supported rate.
    pub fn from_bps(bps: u32) -> ProtocolResult<BaudRate> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.bps() == bps)
            .ok_or(ProtocolError::UnsupportedBaudRate(bps))
    }
}

/// ON/OFF argument for toggle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// `ON`
    On,
    /// `OFF`
    Off,
}

impl Switch {
    /// Get the argument string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Switch::On => "ON",
            Switch::Off => "OFF",
        }
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

/// Status values readable with `QUERY=<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Number of the file being played (`QUERY=1`).
    PlayingFileNumber,
    /// Total number of files (`QUERY=2`).
    TotalFileCount,
    /// Elapsed time of the current track (`QUERY=3`).
    PlayedTime,
    /// Total time of the current track (`QUERY=4`).
    TotalTime,
    /// Name of the file being played (`QUERY=5`).
    PlayingFileName,
}

impl QueryKind {
    /// Get the query selector.
    pub fn code(&self) -> u8 {
        match self {
            QueryKind::PlayingFileNumber => 1,
            QueryKind::TotalFileCount => 2,
            QueryKind::PlayedTime => 3,
            QueryKind::TotalTime => 4,
            QueryKind::PlayingFileName => 5,
        }
    }
}

/// Commands that can be sent to the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ========== Link ==========
    /// Bare `AT` connection test.
    Test,

    // ========== Setters ==========
    /// Set the output volume.
    SetVolume(Volume),

    /// Set the playback mode.
    SetPlayMode(PlayMode),

    /// Tell the module to switch its UART speed.
    ///
    /// Only the module changes speed; the host side keeps its current rate
    /// until it is reopened.
    SetBaudRate(BaudRate),

    // ========== Queries ==========
    /// Read the current volume.
    QueryVolume,

    /// Read the current playback mode.
    QueryPlayMode,

    /// Read one of the `QUERY=<n>` status values.
    Query(QueryKind),

    // ========== Toggles ==========
    /// Switch the built-in amplifier.
    Amplifier(Switch),

    /// Switch the voice prompt.
    Prompt(Switch),

    /// Switch the status LED.
    Led(Switch),

    // ========== Playback ==========
    /// Skip to the next track.
    PlayNext,

    /// Go back to the previous track.
    PlayLast,

    /// Toggle between playing and paused.
    PlayPause,

    /// Rewind by a number of seconds.
    FastRewind {
        /// Seconds to go back.
        seconds: u32,
    },

    /// Fast forward by a number of seconds.
    FastForward {
        /// Seconds to skip.
        seconds: u32,
    },

    /// Restart playback at an absolute position.
    StartFrom {
        /// Position in seconds.
        second: u32,
    },

    /// Play a file by its index.
    PlayNumber {
        /// File number.
        number: u32,
    },

    /// Play a file by path.
    PlayFile {
        /// Path on the module's storage, e.g. `/song.mp3`.
        path: String,
    },

    // ========== Storage & Recording ==========
    /// Delete the file being played.
    DeletePlaying,

    /// Start or pause recording.
    RecordPause,

    /// Save the current recording.
    SaveRecording,

    // ========== Raw ==========
    /// Send an arbitrary body (`AT+<body>`).
    Raw {
        /// The text between `AT+` and the terminator.
        body: String,
    },
}

impl Command {
    /// Encode the command as the bytes to put on the wire, terminator included.
    ///
    /// Fails only for string-carrying commands whose text would break the frame.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        match self {
            Command::Test => Ok(FrameCodec::encode_test()),
            Command::PlayFile { path } => {
                FrameCodec::check_value(path)?;
                Ok(FrameCodec::encode_command(&self.to_command_string()))
            }
            Command::Raw { body } => {
                FrameCodec::check_body(body)?;
                Ok(FrameCodec::encode_command(body))
            }
            _ => Ok(FrameCodec::encode_command(&self.to_command_string())),
        }
    }

    /// Get the command body without the `AT+` prefix and terminator.
    ///
    /// Empty for [`Command::Test`], which has no body.
    pub fn to_command_string(&self) -> String {
        match self {
            Command::Test => String::new(),

            // Setters
            Command::SetVolume(volume) => format!("VOL={}", volume.level()),
            Command::SetPlayMode(mode) => format!("PLAYMODE={}", mode.code()),
            Command::SetBaudRate(rate) => format!("BAUDRATE={}", rate.bps()),

            // Queries
            Command::QueryVolume => "VOL=?".to_string(),
            Command::QueryPlayMode => "PLAYMODE=?".to_string(),
            Command::Query(kind) => format!("QUERY={}", kind.code()),

            // Toggles
            Command::Amplifier(switch) => format!("AMP={}", switch.as_str()),
            Command::Prompt(switch) => format!("PROMPT={}", switch.as_str()),
            Command::Led(switch) => format!("LED={}", switch.as_str()),

            // Playback
            Command::PlayNext => "PLAY=NEXT".to_string(),
            Command::PlayLast => "PLAY=LAST".to_string(),
            Command::PlayPause => "PLAY=PP".to_string(),
            Command::FastRewind { seconds } => format!("TIME=-{}", seconds),
            Command::FastForward { seconds } => format!("TIME=+{}", seconds),
            Command::StartFrom { second } => format!("TIME={}", second),
            Command::PlayNumber { number } => format!("PLAYNUM={}", number),
            Command::PlayFile { path } => format!("PLAYFILE={}", path),

            // Storage & recording
            Command::DeletePlaying => "DEL".to_string(),
            Command::RecordPause => "REC=RP".to_string(),
            Command::SaveRecording => "REC=SAVE".to_string(),

            Command::Raw { body } => body.clone(),
        }
    }

    /// Whether this is the connection test, which needs a longer settle delay.
    pub fn is_connection_test(&self) -> bool {
        matches!(self, Command::Test)
    }

    /// Whether this command only reads state from the module.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::QueryVolume | Command::QueryPlayMode | Command::Query(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_bounds() {
        assert_eq!(Volume::new(0).unwrap().level(), 0);
        assert_eq!(Volume::new(30).unwrap().level(), 30);
        assert_eq!(
            Volume::new(31),
            Err(ProtocolError::VolumeOutOfRange {
                value: 31,
                min: 0,
                max: 30
            })
        );
        assert!(Volume::new(-1).is_err());
    }

    #[test]
    fn test_play_mode_codes() {
        for code in 1..=5 {
            assert_eq!(PlayMode::from_code(code).unwrap().code() as i64, code);
        }
        assert_eq!(PlayMode::from_code(0), Err(ProtocolError::InvalidPlayMode(0)));
        assert_eq!(PlayMode::from_code(6), Err(ProtocolError::InvalidPlayMode(6)));
    }

    #[test]
    fn test_baud_rates() {
        assert_eq!(BaudRate::from_bps(57600).unwrap(), BaudRate::B57600);
        assert_eq!(
            BaudRate::from_bps(4800),
            Err(ProtocolError::UnsupportedBaudRate(4800))
        );
    }

    #[test]
    fn test_encode_set_volume() {
        let cmd = Command::SetVolume(Volume::new(15).unwrap());
        assert_eq!(cmd.encode().unwrap(), b"AT+VOL=15\r\n");
    }

    #[test]
    fn test_encode_set_play_mode() {
        let cmd = Command::SetPlayMode(PlayMode::Shuffle);
        assert_eq!(cmd.encode().unwrap(), b"AT+PLAYMODE=4\r\n");
    }

    #[test]
    fn test_encode_set_baud_rate() {
        let cmd = Command::SetBaudRate(BaudRate::B9600);
        assert_eq!(cmd.encode().unwrap(), b"AT+BAUDRATE=9600\r\n");
    }

    #[test]
    fn test_encode_queries() {
        assert_eq!(Command::QueryVolume.encode().unwrap(), b"AT+VOL=?\r\n");
        assert_eq!(Command::QueryPlayMode.encode().unwrap(), b"AT+PLAYMODE=?\r\n");
        assert_eq!(
            Command::Query(QueryKind::PlayingFileName).encode().unwrap(),
            b"AT+QUERY=5\r\n"
        );
    }

    #[test]
    fn test_encode_toggles() {
        assert_eq!(Command::Amplifier(Switch::On).encode().unwrap(), b"AT+AMP=ON\r\n");
        assert_eq!(Command::Prompt(Switch::Off).encode().unwrap(), b"AT+PROMPT=OFF\r\n");
        assert_eq!(Command::Led(true.into()).encode().unwrap(), b"AT+LED=ON\r\n");
    }

    #[test]
    fn test_encode_time_commands() {
        assert_eq!(
            Command::FastRewind { seconds: 5 }.encode().unwrap(),
            b"AT+TIME=-5\r\n"
        );
        assert_eq!(
            Command::FastForward { seconds: 5 }.encode().unwrap(),
            b"AT+TIME=+5\r\n"
        );
        assert_eq!(
            Command::StartFrom { second: 90 }.encode().unwrap(),
            b"AT+TIME=90\r\n"
        );
    }

    #[test]
    fn test_encode_play_file() {
        let cmd = Command::PlayFile {
            path: "/song.mp3".to_string(),
        };
        assert_eq!(cmd.encode().unwrap(), b"AT+PLAYFILE=/song.mp3\r\n");
    }

    #[test]
    fn test_encode_play_file_rejects_line_break() {
        let cmd = Command::PlayFile {
            path: "/a.mp3\r\nAT+DEL".to_string(),
        };
        assert!(matches!(cmd.encode(), Err(ProtocolError::InvalidArgument(_))));
    }

    #[test]
    fn test_encode_bare_commands() {
        assert_eq!(Command::DeletePlaying.encode().unwrap(), b"AT+DEL\r\n");
        assert_eq!(Command::RecordPause.encode().unwrap(), b"AT+REC=RP\r\n");
        assert_eq!(Command::SaveRecording.encode().unwrap(), b"AT+REC=SAVE\r\n");
        assert_eq!(Command::PlayPause.encode().unwrap(), b"AT+PLAY=PP\r\n");
    }

    #[test]
    fn test_encode_test_and_raw() {
        assert_eq!(Command::Test.encode().unwrap(), b"AT\r\n");
        assert!(Command::Test.is_connection_test());
        let raw = Command::Raw {
            body: "PLAYNUM=3".to_string(),
        };
        assert_eq!(raw.encode().unwrap(), b"AT+PLAYNUM=3\r\n");
        assert!(!raw.is_connection_test());
    }

    #[test]
    fn test_is_query() {
        assert!(Command::QueryVolume.is_query());
        assert!(Command::QueryPlayMode.is_query());
        assert!(Command::Query(QueryKind::TotalTime).is_query());
        assert!(!Command::SetVolume(Volume::new(3).unwrap()).is_query());
        assert!(!Command::Test.is_query());
    }
}
