//! Line-oriented control surface for the detection service.
//!
//! ```text
//! detection_handler start
//! detection_handler stop
//! ```
//!
//! Each command prints one confirmation or failure line and yields a status
//! code: `0` on success, the bus's negative error code when the publish
//! failed, `-EINVAL` for input that does not parse.

use std::io::{self, Write};

use clap::{Parser, Subcommand, error::ErrorKind};

use crate::{Bus, Clock, DetectionCommander, Error, MonotonicClock, Publish};

/// Name the shell command is registered under.
pub const COMMAND_NAME: &str = "detection_handler";

/// Detection handler commands
#[derive(Parser, Debug)]
#[command(
    name = "detection_handler",
    about = "Detection handler commands",
    subcommand_required = true,
    disable_version_flag = true
)]
struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum ShellCommand {
    /// Start detection service
    Start,

    /// Stop detection service
    Stop,
}

impl ShellCommand {
    fn label(self) -> &'static str {
        match self {
            ShellCommand::Start => "START",
            ShellCommand::Stop => "STOP",
        }
    }
}

/// Runs `detection_handler` command lines against a [`DetectionCommander`].
#[derive(Debug, Clone)]
pub struct DetectionShell<P: Publish = Bus, C: Clock = MonotonicClock> {
    commander: DetectionCommander<P, C>,
}

impl<P: Publish, C: Clock> DetectionShell<P, C> {
    pub fn new(commander: DetectionCommander<P, C>) -> Self {
        Self { commander }
    }

    pub fn commander(&self) -> &DetectionCommander<P, C> {
        &self.commander
    }

    /// Execute one command line, writing its output to `out`.
    ///
    /// Blank lines do nothing and return `0`.
    ///
    /// # Errors
    ///
    /// Only if writing to `out` fails.
    pub fn execute(&self, line: &str, out: &mut impl Write) -> io::Result<i32> {
        let mut words = line.split_whitespace().peekable();
        let Some(&first) = words.peek() else {
            return Ok(0);
        };
        if first != COMMAND_NAME {
            writeln!(out, "{first}: command not found")?;
            return Ok(Error::InvalidCommand(first.to_owned()).code());
        }

        let args = match ShellArgs::try_parse_from(words) {
            Ok(args) => args,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                    _ => Error::InvalidCommand(line.trim().to_owned()).code(),
                });
            }
        };

        let command = args.command;
        let result = match command {
            ShellCommand::Start => self.commander.request_start(),
            ShellCommand::Stop => self.commander.request_stop(),
        };
        match result {
            Ok(()) => {
                writeln!(out, "Detection {} command sent", command.label())?;
                Ok(0)
            }
            Err(e) => {
                writeln!(out, "Failed to send {} command", command.label())?;
                Ok(e.code())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ChannelId, FixedClock, Message, MessageKind, Result, WaitPolicy,
        catalog::{DetectionKind, DetectionMsg},
    };

    struct AlwaysBusy;

    impl Publish for AlwaysBusy {
        fn publish(&self, channel: &ChannelId, _: Message, _: WaitPolicy) -> Result<()> {
            Err(Error::Busy(channel.to_string()))
        }
    }

    fn run<P: Publish, C: Clock>(shell: &DetectionShell<P, C>, line: &str) -> (i32, String) {
        let mut out = Vec::new();
        let code = shell.execute(line, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn bus_shell() -> (Bus, ChannelId, DetectionShell<Bus, FixedClock>) {
        let bus = Bus::default();
        let ch = bus.channel("DETECTION_CHAN", MessageKind::Detection);
        let shell = DetectionShell::new(DetectionCommander::with_clock(
            bus.clone(),
            ch.clone(),
            FixedClock(10),
        ));
        (bus, ch, shell)
    }

    #[test]
    fn start_and_stop() {
        let (bus, ch, shell) = bus_shell();

        assert_eq!(
            run(&shell, "detection_handler start"),
            (0, "Detection START command sent\n".into())
        );
        assert_eq!(
            bus.read(&ch, WaitPolicy::NoWait).unwrap(),
            Some(DetectionMsg::new(DetectionKind::Start, 10).into())
        );

        assert_eq!(
            run(&shell, "  detection_handler   stop "),
            (0, "Detection STOP command sent\n".into())
        );
    }

    #[test]
    fn publish_failure_reports_code() {
        let bus = Bus::default();
        let ch = bus.channel("DETECTION_CHAN", MessageKind::Detection);
        let shell = DetectionShell::new(DetectionCommander::new(AlwaysBusy, ch));

        let (code, text) = run(&shell, "detection_handler stop");
        assert_eq!(code, -16);
        assert_eq!(text, "Failed to send STOP command\n");
    }

    #[test]
    fn bad_input_is_einval() {
        let (_, _, shell) = bus_shell();

        let (code, text) = run(&shell, "detection_handler restart");
        assert_eq!(code, -22);
        assert!(!text.is_empty());

        let (code, _) = run(&shell, "detection_handler");
        assert_eq!(code, -22);

        let (code, text) = run(&shell, "led_handler start");
        assert_eq!(code, -22);
        assert_eq!(text, "led_handler: command not found\n");
    }

    #[test]
    fn help_and_blank() {
        let (_, _, shell) = bus_shell();

        let (code, text) = run(&shell, "detection_handler --help");
        assert_eq!(code, 0);
        assert!(text.contains("Start detection service"));

        assert_eq!(run(&shell, "   "), (0, String::new()));
    }
}
