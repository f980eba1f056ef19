//! Interactive wizard session
//!
//! Drives a `Wizard` from line commands read from any `BufRead` and writes
//! plain-text feedback to any `Write`. This is the host that sits between a
//! user and the sequencer: it calls `set_step_data` explicitly, applies the
//! conditional step policies afterwards, and forwards sequencer events to
//! the journal.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;

use serde_json::{Number, Value};
use tracing::{debug, warn};

use crate::definition::Wizard;
use crate::display::{format_current_step, format_progress, format_record};
use crate::error::{WizardError, WizardResult};
use crate::journal::{JournalEntry, JournalLogger};
use crate::models::Record;
use crate::sequencer::{Outcome, PolicyEffect, SequencerEvent};

const HELP: &str = "\
Commands:
  show                 Show the current step
  set <field> <value>  Set a field of the current step
  next, n              Continue to the next step (validated)
  prev, p              Go back one step
  goto <n>             Jump to step n
  reset                Clear all data and return to the first step
  data                 Show the merged data collected so far
  submit               Validate every step and finish
  help                 Show this help
  quit, q              Leave without submitting";

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Every step validated; carries the merged data
    Submitted(Record),
    /// The user quit or input ended
    Quit,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Set { field: String, value: String },
    Next,
    Prev,
    GoTo(usize),
    Reset,
    Data,
    Submit,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = WizardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "show" | "s" => Ok(Command::Show),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(WizardError::Session("usage: set <field> <value>".into()));
                }
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" | "back" => Ok(Command::Prev),
            "goto" | "g" => rest
                .parse::<usize>()
                .map(Command::GoTo)
                .map_err(|_| WizardError::Session("usage: goto <step number>".into())),
            "reset" => Ok(Command::Reset),
            "data" => Ok(Command::Data),
            "submit" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            "" => Err(WizardError::Session("empty command".into())),
            other => Err(WizardError::Session(format!(
                "unknown command '{}' (type 'help')",
                other
            ))),
        }
    }
}

/// Parse user input for a field, typed after the field's current value.
///
/// Booleans accept yes/no style answers, numbers must parse as numbers,
/// strings are taken verbatim. Unknown fields are parsed as JSON when
/// possible and otherwise stored as strings.
pub fn parse_field_value(existing: Option<&Value>, raw: &str) -> WizardResult<Value> {
    match existing {
        Some(Value::Bool(_)) => match raw.to_lowercase().as_str() {
            "true" | "yes" | "y" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "n" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(WizardError::Validation(format!(
                "'{}' is not a yes/no value",
                raw
            ))),
        },
        Some(Value::Number(_)) => {
            if let Ok(int) = raw.parse::<i64>() {
                return Ok(Value::Number(int.into()));
            }
            raw.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| WizardError::Validation(format!("'{}' is not a number", raw)))
        }
        Some(Value::String(_)) => Ok(Value::String(raw.to_string())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => serde_json::from_str(raw)
            .map_err(|e| WizardError::Validation(format!("'{}' is not valid JSON: {}", raw, e))),
        Some(Value::Null) | None => {
            Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
        }
    }
}

/// A running wizard bound to an input and an output
pub struct WizardSession<R, W> {
    wizard: Wizard,
    input: R,
    output: W,
    journal: Option<JournalLogger>,
    events: Rc<RefCell<Vec<SequencerEvent>>>,
}

impl<R: BufRead, W: Write> WizardSession<R, W> {
    pub fn new(mut wizard: Wizard, input: R, output: W) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        wizard
            .sequencer
            .subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Self {
            wizard,
            input,
            output,
            journal: None,
            events,
        }
    }

    /// Record every sequencer event of this session in `journal`
    pub fn with_journal(mut self, journal: JournalLogger) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Give back the wizard and the output
    pub fn into_parts(self) -> (Wizard, W) {
        (self.wizard, self.output)
    }

    /// Read and execute commands until the wizard is submitted or input ends
    pub fn run(&mut self) -> WizardResult<SessionOutcome> {
        writeln!(self.output, "Wizard: {}", self.wizard.name())?;
        writeln!(self.output, "Type 'help' for commands.")?;
        writeln!(self.output)?;
        self.show()?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                self.flush_journal();
                return Ok(SessionOutcome::Quit);
            }
            if line.trim().is_empty() {
                continue;
            }

            let result = match line.parse::<Command>() {
                Ok(command) => {
                    debug!(?command, "session command");
                    self.execute(command)
                }
                Err(e) => Err(e),
            };
            self.flush_journal();

            match result {
                Ok(Some(outcome)) => return Ok(outcome),
                Ok(None) => {}
                Err(e @ (WizardError::Session(_) | WizardError::Validation(_))) => {
                    writeln!(self.output, "Error: {}", e)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Execute one command; `Some` ends the session
    pub fn execute(&mut self, command: Command) -> WizardResult<Option<SessionOutcome>> {
        match command {
            Command::Show => self.show()?,
            Command::Set { field, value } => self.set_field(&field, &value)?,
            Command::Next => match self.wizard.sequencer.try_next() {
                Outcome::Moved => self.show()?,
                Outcome::Rejected => self.report_rejection()?,
                Outcome::AtEnd => return self.submit(),
                other => writeln!(self.output, "Cannot continue: {}.", other)?,
            },
            Command::Prev => match self.wizard.sequencer.try_prev() {
                Outcome::Moved => self.show()?,
                other => writeln!(self.output, "Cannot go back: {}.", other)?,
            },
            Command::GoTo(number) => {
                let outcome = match number.checked_sub(1) {
                    Some(index) => self.wizard.sequencer.try_go_to(index),
                    None => Outcome::OutOfRange,
                };
                match outcome {
                    Outcome::Moved => self.show()?,
                    Outcome::OutOfRange => writeln!(
                        self.output,
                        "No step {} (wizard has {} steps).",
                        number,
                        self.wizard.sequencer.len()
                    )?,
                    other => writeln!(self.output, "Cannot jump: {}.", other)?,
                }
            }
            Command::Reset => {
                self.wizard.sequencer.reset();
                writeln!(self.output, "Wizard reset.")?;
                self.show()?;
            }
            Command::Data => {
                let record = self.wizard.sequencer.all_data();
                writeln!(self.output, "{}", format_record(&record)?)?;
            }
            Command::Submit => return self.submit(),
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(Some(SessionOutcome::Quit)),
        }
        Ok(None)
    }

    fn show(&mut self) -> WizardResult<()> {
        write!(self.output, "{}", format_progress(&self.wizard.sequencer))?;
        writeln!(self.output)?;
        write!(self.output, "{}", format_current_step(&self.wizard.sequencer))?;
        Ok(())
    }

    fn set_field(&mut self, field: &str, raw: &str) -> WizardResult<()> {
        let Some(step) = self.wizard.sequencer.current_step() else {
            return Err(WizardError::Session("wizard has no steps".into()));
        };

        let mut fields = match step.data() {
            Some(Value::Object(fields)) => fields.clone(),
            None => Record::new(),
            Some(_) => {
                return Err(WizardError::Session(format!(
                    "step '{}' has no fields",
                    step.title()
                )))
            }
        };

        // cleared data still takes its field types from the definition
        let existing = fields
            .get(field)
            .or_else(|| self.wizard.definition.initial_value(step.key(), field));
        let value = parse_field_value(existing, raw)?;
        fields.insert(field.to_string(), value.clone());

        let effects = self.wizard.set_data(Value::Object(fields));
        writeln!(self.output, "{} = {}", field, crate::display::format_field(&value))?;

        for (key, effect) in effects {
            match effect {
                PolicyEffect::Inserted => {
                    let title = self
                        .wizard
                        .sequencer
                        .steps()
                        .iter()
                        .find(|s| s.key() == key)
                        .map(|s| s.title().to_string())
                        .unwrap_or_else(|| key.clone());
                    writeln!(self.output, "Added step '{}'.", title)?;
                }
                PolicyEffect::Removed => writeln!(self.output, "Removed step '{}'.", key)?,
                PolicyEffect::Unchanged => {}
            }
        }
        Ok(())
    }

    fn report_rejection(&mut self) -> WizardResult<()> {
        let violations = self.wizard.current_violations();
        if violations.is_empty() {
            writeln!(self.output, "Cannot continue: {}.", Outcome::Rejected)?;
            return Ok(());
        }

        writeln!(self.output, "Cannot continue:")?;
        for violation in violations {
            writeln!(self.output, "  - {}", violation)?;
        }
        Ok(())
    }

    fn submit(&mut self) -> WizardResult<Option<SessionOutcome>> {
        let record = self.wizard.sequencer.submit()?;
        writeln!(self.output, "Submitted:")?;
        writeln!(self.output, "{}", format_record(&record)?)?;
        Ok(Some(SessionOutcome::Submitted(record)))
    }

    fn flush_journal(&mut self) {
        let events: Vec<SequencerEvent> = self.events.borrow_mut().drain(..).collect();
        let Some(journal) = &self.journal else {
            return;
        };

        let name = self.wizard.name().to_string();
        let entries: Vec<JournalEntry> = events
            .into_iter()
            .map(|event| JournalEntry::new(name.clone(), event))
            .collect();
        if let Err(e) = journal.log_batch(&entries) {
            warn!(error = %e, path = %journal.path().display(), "failed to write journal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::profile;
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(script: &str) -> (SessionOutcome, Wizard, String) {
        let mut session = WizardSession::new(profile().build(), Cursor::new(script), Vec::new());
        let outcome = session.run().unwrap();
        let (wizard, output) = session.into_parts();
        (outcome, wizard, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("next".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("  P ".parse::<Command>().unwrap(), Command::Prev);
        assert_eq!("goto 3".parse::<Command>().unwrap(), Command::GoTo(3));
        assert_eq!(
            "set name Ada Lovelace".parse::<Command>().unwrap(),
            Command::Set {
                field: "name".into(),
                value: "Ada Lovelace".into()
            }
        );
        assert_eq!(
            "set name".parse::<Command>().unwrap(),
            Command::Set {
                field: "name".into(),
                value: String::new()
            }
        );
        assert!("set".parse::<Command>().is_err());
        assert!("goto x".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_field_value() {
        assert_eq!(parse_field_value(Some(&json!(false)), "yes").unwrap(), json!(true));
        assert_eq!(parse_field_value(Some(&json!(true)), "off").unwrap(), json!(false));
        assert!(parse_field_value(Some(&json!(true)), "maybe").is_err());
        assert_eq!(parse_field_value(Some(&json!(1)), "42").unwrap(), json!(42));
        assert_eq!(parse_field_value(Some(&json!(1)), "2.5").unwrap(), json!(2.5));
        assert!(parse_field_value(Some(&json!(1)), "many").is_err());
        assert_eq!(parse_field_value(Some(&json!("")), "true").unwrap(), json!("true"));
        assert_eq!(parse_field_value(None, "true").unwrap(), json!(true));
        assert_eq!(parse_field_value(None, "hello").unwrap(), json!("hello"));
        assert_eq!(parse_field_value(Some(&json!([])), "[1]").unwrap(), json!([1]));
    }

    #[test]
    fn test_full_run_with_newsletter() {
        let script = "\
set name Ada
set email ada@example.com
next
set theme dark
set newsletter yes
next
set frequency monthly
next
next
";
        let (outcome, wizard, output) = run_script(script);

        let SessionOutcome::Submitted(record) = outcome else {
            panic!("expected submission, got {:?}", outcome);
        };
        assert_eq!(
            Value::Object(record),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "theme": "dark",
                "notifications": true,
                "newsletter": true,
                "frequency": "monthly"
            })
        );
        assert!(output.contains("Added step 'Newsletter Preferences'."));
        assert!(output.contains("Submitted:"));
        assert_eq!(wizard.sequencer.len(), 4);
    }

    #[test]
    fn test_validation_message_and_quit() {
        let (outcome, wizard, output) = run_script("set email nope\nnext\nquit\n");

        assert_eq!(outcome, SessionOutcome::Quit);
        assert!(output.contains("Cannot continue:"));
        assert!(output.contains("  - name is required"));
        assert!(output.contains("  - email must be a valid email address"));
        assert_eq!(wizard.sequencer.current_index(), 0);
    }

    #[test]
    fn test_navigation_messages() {
        let (outcome, wizard, output) = run_script("prev\ngoto 9\ngoto 0\ngoto 3\nprev\n");

        assert_eq!(outcome, SessionOutcome::Quit);
        assert!(output.contains("Cannot go back: already at the first step."));
        assert!(output.contains("No step 9 (wizard has 3 steps)."));
        assert!(output.contains("No step 0 (wizard has 3 steps)."));
        assert_eq!(wizard.sequencer.current_index(), 1);
    }

    #[test]
    fn test_unknown_command_keeps_running() {
        let (outcome, _wizard, output) = run_script("dance\nhelp\n");
        assert_eq!(outcome, SessionOutcome::Quit);
        assert!(output.contains("Error: Session error: unknown command 'dance'"));
        assert!(output.contains("Commands:"));
    }

    #[test]
    fn test_submit_with_invalid_step_is_reported() {
        let (outcome, _wizard, output) = run_script("goto 3\nsubmit\n");
        assert_eq!(outcome, SessionOutcome::Quit);
        assert!(output.contains("Error: Validation error: step 'User Info' is incomplete"));
    }

    #[test]
    fn test_reset_restores_unset_data() {
        let (_outcome, wizard, output) = run_script("set name Ada\nreset\ndata\n");
        assert!(output.contains("Wizard reset."));
        assert!(output.contains("{}"));
        assert!(wizard.sequencer.steps().iter().all(|s| s.data().is_none()));
    }

    #[test]
    fn test_set_after_reset_starts_from_empty_record() {
        let (_outcome, wizard, _output) = run_script("reset\nset name Ada\n");
        assert_eq!(
            wizard.sequencer.current_step().unwrap().data(),
            Some(&json!({"name": "Ada"}))
        );
    }

    #[test]
    fn test_set_after_reset_keeps_field_types() {
        let script = "\
set name Ada
set email ada@example.com
next
set newsletter yes
reset
goto 2
set newsletter yes
";
        let (_outcome, wizard, output) = run_script(script);

        let preferences = wizard.sequencer.step(1).unwrap();
        assert_eq!(preferences.data(), Some(&json!({"newsletter": true})));
        let keys: Vec<&str> = wizard.sequencer.steps().iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["user_info", "preferences", "newsletter", "review"]);
        assert!(!output.contains("Removed step"));
    }

    #[test]
    fn test_events_are_journaled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal.log");

        let mut session = WizardSession::new(
            profile().build(),
            Cursor::new("set name Ada\nnext\ngoto 2\n"),
            Vec::new(),
        )
        .with_journal(JournalLogger::new(path.clone()));
        session.run().unwrap();

        let entries = JournalLogger::new(path).read_all().unwrap();
        let kinds: Vec<&str> = entries.iter().map(|e| e.event.kind()).collect();
        assert_eq!(kinds, vec!["data_changed", "validation_failed", "moved"]);
        assert_eq!(entries[0].wizard, "profile");
        assert_eq!(entries[0].diff_summary.as_deref(), Some("name: \"\" -> \"Ada\""));
    }
}
