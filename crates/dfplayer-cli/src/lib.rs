//! Command-line front end for the DFPlayer Pro driver.

pub mod args;

use std::io::Write;

use dfplayer_driver::{Delay, DeviceController, DriverResult, SerialTransport};
use dfplayer_protocol::Command;
use tracing::info;

/// Text printed when the module does not answer.
pub const NO_RESPONSE: &str = "(no response)";

/// Send `commands` in order, printing one line per reply.
///
/// Stops at the first error. Silence is not an error.
pub fn run_commands<T, D>(
    controller: &mut DeviceController<T, D>,
    commands: &[Command],
    out: &mut impl Write,
) -> DriverResult<()>
where
    T: SerialTransport,
    D: Delay,
{
    for command in commands {
        let reply = controller.execute(command)?;
        info!(command = ?command, answered = reply.is_some(), "command complete");
        match reply {
            Some(text) => writeln!(out, "{}", text.trim_end())?,
            None => writeln!(out, "{}", NO_RESPONSE)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfplayer_driver::mock::{MockDelay, MockTransport};
    use dfplayer_driver::TimingConfig;

    #[test]
    fn test_run_commands_prints_replies() {
        let transport = MockTransport::new().with_reply("OK\r\n");
        let mut controller =
            DeviceController::new(transport, MockDelay::new(), TimingConfig::default()).unwrap();
        let mut out = Vec::new();

        run_commands(&mut controller, &[Command::Test, Command::PlayNext], &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "OK\n(no response)\n");
        assert_eq!(controller.transport().writes().len(), 2);
    }

    #[test]
    fn test_run_commands_stops_on_error() {
        let transport = MockTransport::new().with_reply(vec![0xFF]);
        let mut controller =
            DeviceController::new(transport, MockDelay::new(), TimingConfig::default()).unwrap();
        let mut out = Vec::new();

        let result = run_commands(
            &mut controller,
            &[Command::QueryVolume, Command::PlayNext],
            &mut out,
        );

        assert!(result.is_err());
        assert!(out.is_empty());
        assert_eq!(controller.transport().writes().len(), 1);
    }
}
