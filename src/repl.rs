//! Interactive shell for the CLI frontend.
//!
//! Reads operator lines, dispatches meta-commands, and hands everything else
//! to the session as directives.

use std::io::{BufRead, Write};

use crate::device::{pick_device, DeviceInfo, NetlistSink};
use crate::error::{BridgeError, Result};
use crate::session::Session;

/// Usage banner printed at startup and by `help`.
pub const BANNER: &str = "\
1)  Connect two rails: 5-30
2)  Connect a series of rails: VCC-1-2-3-4
3)  Remove a rail from a net: -30
4)  Separate multiple commands with commas:
        5-30,-20,20-40
    Is saying: connect 5->30, disconnect 20, connect 20->40
5)  Series expansion:
        1++(10,20,x,40)
    Produces: 1-10, 2-20, 4-40 (skips 3)
6)  Special commands:
    'clear' to reset the board.
    'flash' to put Arduino into flashing mode.
    'save <filename>' to save current netlist.
    'load <filename>' to load netlist from file.
    'list' to show current bridges.
    'help' to show this message.
    'exit' to quit.";

const RULE_WIDTH: usize = 50;

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset the board and the session
    Clear,
    /// Release the board for firmware flashing
    Flash,
    /// Save under the given name, or the current one
    Save(Option<String>),
    /// Load the given file, prompting if no name was given
    Load(Option<String>),
    /// Print the current bridges
    List,
    /// Print the usage banner
    Help,
    /// Leave the shell
    Exit,
    /// Directive line for the session
    Directives(String),
}

impl Command {
    /// Interpret a line. Input is lowercased and trimmed first.
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();

        match words.next() {
            Some("clear") if line == "clear" => Command::Clear,
            Some("flash") if line == "flash" => Command::Flash,
            Some("list") if line == "list" => Command::List,
            Some("help") if line == "help" => Command::Help,
            Some("exit") | Some("quit") if words.clone().next().is_none() => Command::Exit,
            Some("save") => Command::Save(words.next().map(str::to_string)),
            Some("load") => Command::Load(words.next().map(str::to_string)),
            _ => Command::Directives(line),
        }
    }
}

/// The interactive read-eval-print loop.
pub struct Repl<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Create a shell over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Recover the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask the operator to choose among several attached devices.
    pub fn select_device(&mut self, candidates: &[DeviceInfo]) -> Result<DeviceInfo> {
        if candidates.len() > 1 {
            self.say("Multiple Jumperless found")?;
            for (i, candidate) in candidates.iter().enumerate() {
                self.say(&format!("[{}] {} at {}", i, candidate.description, candidate.name))?;
            }
            self.prompt("Please select one: ")?;
        }
        let answer = if candidates.len() > 1 {
            self.read_line()?.unwrap_or_default()
        } else {
            String::new()
        };
        pick_device(candidates, &answer).cloned()
    }

    /// Print the banner and run until `exit` or end of input.
    pub fn run<S: NetlistSink>(&mut self, session: &mut Session<S>) -> Result<()> {
        self.say(&"-".repeat(RULE_WIDTH))?;
        self.say(BANNER)?;
        self.say(&"-".repeat(RULE_WIDTH))?;

        loop {
            let file = session.current_file().unwrap_or("").to_string();
            self.prompt(&format!("[{}] >> ", file))?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            if !self.dispatch(session, Command::parse(&line))? {
                return Ok(());
            }
        }
    }

    /// Execute one command. Returns `false` when the shell should stop.
    ///
    /// Session failures are reported to the operator; only console failures
    /// are returned as errors.
    pub fn dispatch<S: NetlistSink>(&mut self, session: &mut Session<S>, command: Command) -> Result<bool> {
        let outcome = match command {
            Command::Exit => return Ok(false),
            Command::Help => {
                self.say(BANNER)?;
                Ok(())
            }
            Command::List => {
                if session.netlist().is_empty() {
                    self.say("No connections")?;
                }
                let lines: Vec<String> = session.netlist().edges().map(|e| e.to_string()).collect();
                for line in lines {
                    self.say(&line)?;
                }
                Ok(())
            }
            Command::Clear => session.clear(),
            Command::Flash => self.flash(session),
            Command::Save(name) => match session.save(name.as_deref()) {
                Ok(_) => {
                    let name = session.current_file().unwrap_or_default().to_string();
                    self.say(&format!("Saved: {}", name))?;
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Command::Load(name) => self.load(session, name),
            Command::Directives(line) => match session.process_line(&line) {
                Ok(edits) => {
                    if !edits.is_empty() {
                        let rendered: Vec<String> = edits.iter().map(|e| e.to_string()).collect();
                        self.say(&rendered.join(" | "))?;
                    }
                    Ok(())
                }
                Err(err) => Err(err),
            },
        };

        if let Err(err) = outcome {
            self.report(&err)?;
        }
        Ok(true)
    }

    fn flash<S: NetlistSink>(&mut self, session: &mut Session<S>) -> Result<()> {
        session.begin_flash()?;
        self.prompt("Upload sketch to Arduino and press Enter when done")?;
        self.read_line()?;
        session.finish_flash()
    }

    fn load<S: NetlistSink>(&mut self, session: &mut Session<S>, name: Option<String>) -> Result<()> {
        let name = match name {
            Some(name) => name,
            None => {
                self.say("Please specify file:")?;
                self.read_line()?.unwrap_or_default().trim().to_string()
            }
        };
        if name.is_empty() {
            return Ok(());
        }
        session.load(&name)?;
        self.say(&format!("Opened: {}", name))
    }

    fn report(&mut self, err: &BridgeError) -> Result<()> {
        for err in err.directive_errors() {
            self.say(&err.to_string())?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|source| BridgeError::Console { source })?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).map_err(|source| BridgeError::Console { source })
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)
            .and_then(|_| self.output.flush())
            .map_err(|source| BridgeError::Console { source })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::device::{RecordingSink, FLASH_MODE_COMMAND};

    fn run_script(session: &mut Session<RecordingSink>, script: &str) -> String {
        let mut repl = Repl::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        repl.run(session).unwrap();
        String::from_utf8(repl.into_output()).unwrap()
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("  CLEAR "), Command::Clear);
        assert_eq!(Command::parse("save"), Command::Save(None));
        assert_eq!(Command::parse("save Amp"), Command::Save(Some("amp".to_string())));
        assert_eq!(Command::parse("load  fuzz "), Command::Load(Some("fuzz".to_string())));
        assert_eq!(Command::parse("quit"), Command::Exit);
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse("VCC-1"), Command::Directives("vcc-1".to_string()));
        assert_eq!(Command::parse("clear 1"), Command::Directives("clear 1".to_string()));
    }

    #[test]
    fn test_repl_applies_directives() {
        let mut session = Session::new(RecordingSink::new());
        let out = run_script(&mut session, "1++(10,20,x,40)\nexit\n");
        assert!(out.contains("1-10 | 2-20 | 4-40"));
        assert!(out.contains("[] >> "));
        assert_eq!(session.netlist().len(), 3);
    }

    #[test]
    fn test_repl_reports_invalid_directives_and_continues() {
        let mut session = Session::new(RecordingSink::new());
        let out = run_script(&mut session, "1-2,what?\n3-4\n");
        assert!(out.contains("Invalid connection: 'what?'"));
        assert_eq!(session.sink().commands(), &["::bridgelist[3-4]".to_string()]);
    }

    #[test]
    fn test_repl_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(RecordingSink::new()).with_storage_dir(dir.path());
        let out = run_script(&mut session, "save\n5-30\nsave rig\nclear\nload\nrig\nlist\n");
        assert!(out.contains("No connections to save"));
        assert!(out.contains("Saved: rig"));
        assert!(out.contains("Please specify file:"));
        assert!(out.contains("Opened: rig"));
        assert!(out.contains("[rig] >> "));
        assert_eq!(session.current_file(), Some("rig"));
        assert_eq!(session.netlist().len(), 1);
    }

    #[test]
    fn test_repl_flash_waits_for_operator() {
        let mut session = Session::new(RecordingSink::new());
        run_script(&mut session, "1-2\nflash\n\n");
        let commands = session.sink().commands();
        assert_eq!(commands[1], FLASH_MODE_COMMAND);
        assert_eq!(commands[2], "::bridgelist[1-2]");
        assert!(!session.sink().in_maintenance());
    }

    #[test]
    fn test_select_device_prompts_when_ambiguous() {
        let devices = vec![
            DeviceInfo {
                name: "/dev/ttyACM0".to_string(),
                description: "Jumperless".to_string(),
            },
            DeviceInfo {
                name: "/dev/ttyACM1".to_string(),
                description: "Jumperless".to_string(),
            },
        ];
        let mut repl = Repl::new(Cursor::new(b"1\n".to_vec()), Vec::new());
        assert_eq!(repl.select_device(&devices).unwrap().name, "/dev/ttyACM1");
        let out = String::from_utf8(repl.into_output()).unwrap();
        assert!(out.contains("[0] Jumperless at /dev/ttyACM0"));
    }
}
