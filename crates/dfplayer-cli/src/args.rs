//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dfplayer_driver::{ControllerConfig, DriverResult};
use dfplayer_protocol::{BaudRate, Command, PlayMode, ProtocolResult, QueryKind, Switch, Volume};

/// Control a DFPlayer Pro audio module over its UART.
#[derive(Debug, Parser)]
#[command(name = "dfplayer", version, about)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serial device (overrides the config file).
    #[arg(long)]
    pub device: Option<String>,

    /// Local line speed (overrides the config file).
    #[arg(long)]
    pub baud: Option<u32>,

    /// TX GPIO (overrides the config file).
    #[arg(long)]
    pub tx_pin: Option<u32>,

    /// RX GPIO (overrides the config file).
    #[arg(long)]
    pub rx_pin: Option<u32>,

    /// UART peripheral id (overrides the config file).
    #[arg(long)]
    pub uart_id: Option<u8>,

    /// Log every frame.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub action: Action,
}

impl Cli {
    /// Build the controller configuration from the file (if any) and flag overrides.
    pub fn controller_config(&self) -> DriverResult<ControllerConfig> {
        let mut config = match &self.config {
            Some(path) => ControllerConfig::from_file(path)?,
            None => ControllerConfig::default(),
        };

        if let Some(device) = &self.device {
            config.uart.device = device.clone();
        }
        if let Some(baud) = self.baud {
            config.uart.baud_rate = baud;
        }
        if let Some(tx_pin) = self.tx_pin {
            config.uart.tx_pin = tx_pin;
        }
        if let Some(rx_pin) = self.rx_pin {
            config.uart.rx_pin = rx_pin;
        }
        if let Some(uart_id) = self.uart_id {
            config.uart.uart_id = uart_id;
        }

        config.validate()?;
        Ok(config)
    }
}

/// ON/OFF argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwitchArg {
    /// Turn on.
    On,
    /// Turn off.
    Off,
}

impl From<SwitchArg> for Switch {
    fn from(arg: SwitchArg) -> Self {
        match arg {
            SwitchArg::On => Switch::On,
            SwitchArg::Off => Switch::Off,
        }
    }
}

/// Readable module state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryTarget {
    /// Current volume.
    Volume,
    /// Current play mode.
    Mode,
    /// Number of the file being played.
    FileNumber,
    /// Total number of files.
    FileCount,
    /// Elapsed time of the current track.
    PlayedTime,
    /// Total time of the current track.
    TotalTime,
    /// Name of the file being played.
    FileName,
}

/// Operation to perform.
#[derive(Debug, Subcommand)]
pub enum Action {
    /// Send the bare AT connection test.
    Test,
    /// Set the volume (0-30).
    Volume {
        #[arg(allow_negative_numbers = true)]
        level: i64,
    },
    /// Set the play mode (1 repeat one, 2 repeat all, 3 play one, 4 shuffle, 5 repeat folder).
    Mode {
        #[arg(allow_negative_numbers = true)]
        mode: i64,
    },
    /// Tell the module to switch UART speed. Reopen at the new rate afterwards.
    Baud { rate: u32 },
    /// Read module state.
    Query {
        #[arg(value_enum)]
        what: QueryTarget,
    },
    /// Switch the amplifier.
    Amp {
        #[arg(value_enum)]
        state: SwitchArg,
    },
    /// Switch the voice prompt.
    Prompt {
        #[arg(value_enum)]
        state: SwitchArg,
    },
    /// Switch the LED.
    Led {
        #[arg(value_enum)]
        state: SwitchArg,
    },
    /// Next track.
    Next,
    /// Previous track.
    Prev,
    /// Toggle play/pause.
    Pause,
    /// Rewind by seconds.
    Rewind { seconds: u32 },
    /// Fast forward by seconds.
    Forward { seconds: u32 },
    /// Restart the track at an absolute second.
    Seek { second: u32 },
    /// Play a file by number.
    PlayNum { number: u32 },
    /// Play a file by path.
    PlayFile { path: String },
    /// Delete the file being played.
    Delete,
    /// Start or pause recording.
    Record,
    /// Save the recording.
    Save,
    /// Send `AT+<BODY>` as given.
    Raw { body: String },
    /// Power-up check: test the link, set volume 15, shuffle, next track.
    Demo,
}

/// Volume used by the demo sequence.
pub const DEMO_VOLUME: i64 = 15;

impl Action {
    /// Translate into the commands to send, validating arguments.
    ///
    /// Every command is encoded once here, so a free-form body or path that
    /// cannot be framed is rejected before any port is opened.
    pub fn to_commands(&self) -> ProtocolResult<Vec<Command>> {
        let commands = self.build_commands()?;
        for command in &commands {
            command.encode()?;
        }
        Ok(commands)
    }

    fn build_commands(&self) -> ProtocolResult<Vec<Command>> {
        let command = match self {
            Action::Test => Command::Test,
            Action::Volume { level } => Command::SetVolume(Volume::new(*level)?),
            Action::Mode { mode } => Command::SetPlayMode(PlayMode::from_code(*mode)?),
            Action::Baud { rate } => Command::SetBaudRate(BaudRate::from_bps(*rate)?),
            Action::Query { what } => match what {
                QueryTarget::Volume => Command::QueryVolume,
                QueryTarget::Mode => Command::QueryPlayMode,
                QueryTarget::FileNumber => Command::Query(QueryKind::PlayingFileNumber),
                QueryTarget::FileCount => Command::Query(QueryKind::TotalFileCount),
                QueryTarget::PlayedTime => Command::Query(QueryKind::PlayedTime),
                QueryTarget::TotalTime => Command::Query(QueryKind::TotalTime),
                QueryTarget::FileName => Command::Query(QueryKind::PlayingFileName),
            },
            Action::Amp { state } => Command::Amplifier((*state).into()),
            Action::Prompt { state } => Command::Prompt((*state).into()),
            Action::Led { state } => Command::Led((*state).into()),
            Action::Next => Command::PlayNext,
            Action::Prev => Command::PlayLast,
            Action::Pause => Command::PlayPause,
            Action::Rewind { seconds } => Command::FastRewind { seconds: *seconds },
            Action::Forward { seconds } => Command::FastForward { seconds: *seconds },
            Action::Seek { second } => Command::StartFrom { second: *second },
            Action::PlayNum { number } => Command::PlayNumber { number: *number },
            Action::PlayFile { path } => Command::PlayFile { path: path.clone() },
            Action::Delete => Command::DeletePlaying,
            Action::Record => Command::RecordPause,
            Action::Save => Command::SaveRecording,
            Action::Raw { body } => Command::Raw { body: body.clone() },
            Action::Demo => {
                return Ok(vec![
                    Command::Test,
                    Command::SetVolume(Volume::new(DEMO_VOLUME)?),
                    Command::SetPlayMode(PlayMode::Shuffle),
                    Command::PlayNext,
                ]);
            }
        };
        Ok(vec![command])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfplayer_protocol::ProtocolError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dfplayer").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_parse_volume() {
        let cli = parse(&["volume", "15"]);
        assert_eq!(
            cli.action.to_commands().unwrap(),
            vec![Command::SetVolume(Volume::new(15).unwrap())]
        );
    }

    #[test]
    fn test_negative_volume_is_domain_error() {
        let cli = parse(&["volume", "-3"]);
        assert!(matches!(
            cli.action.to_commands(),
            Err(ProtocolError::VolumeOutOfRange { value: -3, .. })
        ));
    }

    #[test]
    fn test_parse_query_and_toggle() {
        let cli = parse(&["query", "file-name"]);
        assert_eq!(
            cli.action.to_commands().unwrap(),
            vec![Command::Query(QueryKind::PlayingFileName)]
        );
        let cli = parse(&["led", "off"]);
        assert_eq!(cli.action.to_commands().unwrap(), vec![Command::Led(Switch::Off)]);
    }

    #[test]
    fn test_parse_play_file() {
        let cli = parse(&["play-file", "/song.mp3"]);
        assert_eq!(
            cli.action.to_commands().unwrap(),
            vec![Command::PlayFile {
                path: "/song.mp3".to_string()
            }]
        );
    }

    #[test]
    fn test_raw_body_checked_before_open() {
        let cli = parse(&["raw", "VOL=1\tX"]);
        assert!(matches!(
            cli.action.to_commands(),
            Err(ProtocolError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_play_file_path_checked_before_open() {
        let cli = parse(&["play-file", "/a.mp3\r\nAT+DEL"]);
        assert!(matches!(
            cli.action.to_commands(),
            Err(ProtocolError::InvalidArgument(_))
        ));
        let cli = parse(&["play-file", "/música.mp3"]);
        assert!(cli.action.to_commands().is_ok());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let cli = parse(&["mode", "9"]);
        assert_eq!(cli.action.to_commands(), Err(ProtocolError::InvalidPlayMode(9)));
    }

    #[test]
    fn test_demo_sequence() {
        let commands = parse(&["demo"]).action.to_commands().unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Test,
                Command::SetVolume(Volume::new(15).unwrap()),
                Command::SetPlayMode(PlayMode::Shuffle),
                Command::PlayNext,
            ]
        );
    }

    #[test]
    fn test_flag_overrides() {
        let cli = parse(&["--device", "/dev/ttyS3", "--baud", "9600", "--tx-pin", "1", "test"]);
        let config = cli.controller_config().unwrap();
        assert_eq!(config.uart.device, "/dev/ttyS3");
        assert_eq!(config.uart.baud_rate, 9600);
        assert_eq!(config.uart.tx_pin, 1);
        assert_eq!(config.uart.rx_pin, 16);
    }

    #[test]
    fn test_zero_baud_flag_rejected() {
        let cli = parse(&["--baud", "0", "test"]);
        assert!(cli.controller_config().is_err());
    }
}
