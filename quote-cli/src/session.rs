//! Interactive estimator session.
//!
//! Reads one command per line and applies it to an [`Estimator`], printing
//! the updated total after every change. This is the terminal counterpart of
//! clicking through the calculator form: each line is one click, toggle or
//! slider move.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use quote_core::{Estimate, Estimator, EstimatorError, Quote};
use thiserror::Error;
use tracing::{debug, warn};

use crate::app::{NotOfferedError, export_quote, render_catalog, render_status, render_summary};
use crate::config::AppConfig;
use crate::logging;
use crate::utils::parse_switch;

const PROMPT: &str = "estimate> ";

const HELP: &str = "\
Commands:
  project <id>          choose the project type
  feature <id>          toggle a feature
  integration <id>      toggle an integration
  complexity <id>       choose the complexity tier
  timeline <id>         choose the delivery timeline (legacy calculator)
  pages <n>             set the page count (legacy calculator)
  maintenance on|off    include first-year maintenance
  show                  print the cost summary
  quote                 print the quote text
  export [path]         save the quote to a .txt file
  reset                 clear every selection
  catalog               list the available options
  log <level>           change the log filter
  help                  show this help
  quit                  leave the session
";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Project(String),
    Feature(String),
    Integration(String),
    Complexity(String),
    Timeline(String),
    Pages(u32),
    Maintenance(bool),
    Show,
    Quote,
    Export(Option<PathBuf>),
    Reset,
    Catalog,
    Log(String),
    Help,
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid value '{value}' for '{command}'")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

/// Parses one input line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = |command: &'static str| -> Result<String, CommandError> {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(command))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "project" => SessionCommand::Project(arg("project")?),
        "feature" => SessionCommand::Feature(arg("feature")?),
        "integration" => SessionCommand::Integration(arg("integration")?),
        "complexity" => SessionCommand::Complexity(arg("complexity")?),
        "timeline" => SessionCommand::Timeline(arg("timeline")?),
        "pages" => {
            let value = arg("pages")?;
            let pages = value
                .parse()
                .map_err(|_| CommandError::InvalidArgument {
                    command: "pages",
                    value,
                })?;
            SessionCommand::Pages(pages)
        }
        "maintenance" => {
            let value = arg("maintenance")?;
            match parse_switch(&value) {
                Some(enabled) => SessionCommand::Maintenance(enabled),
                None => {
                    return Err(CommandError::InvalidArgument {
                        command: "maintenance",
                        value,
                    });
                }
            }
        }
        "show" => SessionCommand::Show,
        "quote" => SessionCommand::Quote,
        "export" => SessionCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "reset" => SessionCommand::Reset,
        "catalog" => SessionCommand::Catalog,
        "log" => SessionCommand::Log(arg("log")?),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Mutation outcomes the session reports to the user and keeps going.
#[derive(Debug, Error)]
enum StepError {
    #[error(transparent)]
    Selection(#[from] EstimatorError),

    #[error(transparent)]
    NotOffered(#[from] NotOfferedError),
}

/// An estimator plus the settings it renders with.
pub struct Session<'a> {
    estimator: Estimator,
    config: &'a AppConfig,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self {
            estimator: Estimator::for_variant(config.calculator.variant),
            config,
        }
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Runs the read-eval-print loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<()> {
        writeln!(
            out,
            "Project cost estimator ({} calculator). Type 'help' for commands.",
            self.estimator.variant()
        )?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if self.handle(command, out)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Ok(None) => {}
                Err(error) => writeln!(out, "error: {error}")?,
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Applies one command and writes its output.
    pub fn handle<W: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
    ) -> Result<Flow> {
        debug!(?command, "session command");
        let currency = self.config.currency();

        match command {
            SessionCommand::Show => {
                write!(out, "{}", render_summary(&self.estimator, &currency))?;
            }
            SessionCommand::Quote => {
                let quote = Quote::from_estimator(&self.estimator, chrono::Local::now().date_naive());
                write!(out, "{}", quote.render(&currency))?;
            }
            SessionCommand::Export(path) => {
                match export_quote(&self.estimator, self.config, path.as_deref()) {
                    Ok(saved) => writeln!(out, "Quote saved to {}", saved.display())?,
                    Err(error) => {
                        warn!(%error, "quote export failed");
                        writeln!(out, "error: {error:#}")?;
                    }
                }
            }
            SessionCommand::Catalog => {
                write!(
                    out,
                    "{}",
                    render_catalog(self.estimator.catalogs(), &currency)
                )?;
            }
            SessionCommand::Log(level) => match logging::set_log_level(&level) {
                Ok(()) => writeln!(out, "Log level set to {level}")?,
                Err(error) => writeln!(out, "error: {error}")?,
            },
            SessionCommand::Help => write!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
            mutation => match self.apply(mutation) {
                Ok(estimate) => writeln!(out, "{}", render_status(&estimate, &currency))?,
                Err(error) => writeln!(out, "error: {error}")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn apply(
        &mut self,
        command: SessionCommand,
    ) -> Result<Estimate, StepError> {
        let variant = self.estimator.variant();
        let estimate = match command {
            SessionCommand::Project(id) => self.estimator.select_project_type(&id)?,
            SessionCommand::Feature(id) => self.estimator.toggle_feature(&id)?,
            SessionCommand::Integration(id) => self.estimator.toggle_integration(&id)?,
            SessionCommand::Complexity(id) => self.estimator.select_complexity(&id)?,
            SessionCommand::Timeline(id) => {
                if !variant.offers_timeline() {
                    return Err(NotOfferedError::Timeline(variant).into());
                }
                self.estimator.select_timeline(&id)?
            }
            SessionCommand::Pages(pages) => {
                if !variant.offers_pages() {
                    return Err(NotOfferedError::Pages(variant).into());
                }
                self.estimator.set_pages(pages)
            }
            SessionCommand::Maintenance(enabled) => self.estimator.set_maintenance(enabled),
            SessionCommand::Reset => self.estimator.reset(),
            _ => self.estimator.estimate(),
        };
        Ok(estimate.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::Variant;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_recognises_every_command() {
        let cases = [
            ("project business", SessionCommand::Project("business".into())),
            ("feature auth", SessionCommand::Feature("auth".into())),
            ("integration crm", SessionCommand::Integration("crm".into())),
            ("complexity enterprise", SessionCommand::Complexity("enterprise".into())),
            ("timeline rush", SessionCommand::Timeline("rush".into())),
            ("pages 12", SessionCommand::Pages(12)),
            ("maintenance on", SessionCommand::Maintenance(true)),
            ("maintenance no", SessionCommand::Maintenance(false)),
            ("show", SessionCommand::Show),
            ("quote", SessionCommand::Quote),
            ("export", SessionCommand::Export(None)),
            ("export out.txt", SessionCommand::Export(Some(PathBuf::from("out.txt")))),
            ("reset", SessionCommand::Reset),
            ("catalog", SessionCommand::Catalog),
            ("log debug", SessionCommand::Log("debug".into())),
            ("help", SessionCommand::Help),
            ("QUIT", SessionCommand::Quit),
        ];

        for (line, expected) in cases {
            assert_eq!(parse_command(line), Ok(Some(expected)), "line: {line}");
        }
    }

    #[test]
    fn parse_skips_blank_lines_and_comments() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("# a note"), Ok(None));
    }

    #[test]
    fn parse_reports_bad_input() {
        assert_eq!(
            parse_command("launch rocket"),
            Err(CommandError::Unknown("launch".to_string()))
        );
        assert_eq!(
            parse_command("feature"),
            Err(CommandError::MissingArgument("feature"))
        );
        assert_eq!(
            parse_command("pages many"),
            Err(CommandError::InvalidArgument {
                command: "pages",
                value: "many".to_string()
            })
        );
        assert_eq!(
            parse_command("maintenance perhaps"),
            Err(CommandError::InvalidArgument {
                command: "maintenance",
                value: "perhaps".to_string()
            })
        );
    }

    #[test]
    fn handle_reports_total_after_each_change() {
        let config = AppConfig::default();
        let mut session = Session::new(&config);
        let mut out = Vec::new();

        session
            .handle(SessionCommand::Project("business".into()), &mut out)
            .unwrap();
        session
            .handle(SessionCommand::Feature("auth".into()), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total: $6,999"));
        assert!(text.contains("Total: $8,498"));
        assert_eq!(session.estimator().estimate().total, dec!(8498));
    }

    #[test]
    fn handle_keeps_going_after_unknown_id() {
        let config = AppConfig::default();
        let mut session = Session::new(&config);
        let mut out = Vec::new();

        let flow = session
            .handle(SessionCommand::Feature("telepathy".into()), &mut out)
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(String::from_utf8(out).unwrap().contains("error: unknown feature 'telepathy'"));
    }

    #[test]
    fn timeline_is_hidden_on_current_calculator() {
        let config = AppConfig::default();
        let mut session = Session::new(&config);
        let mut out = Vec::new();

        session
            .handle(SessionCommand::Timeline("rush".into()), &mut out)
            .unwrap();

        assert!(String::from_utf8(out).unwrap().contains("no timeline selector"));
        assert_eq!(session.estimator().selection().timeline, None);
    }

    #[test]
    fn legacy_calculator_accepts_timeline_and_pages() {
        let mut config = AppConfig::default();
        config.calculator.variant = Variant::Legacy;
        let mut session = Session::new(&config);
        let mut out = Vec::new();

        for command in [
            SessionCommand::Project("landing".into()),
            SessionCommand::Pages(7),
            SessionCommand::Timeline("rush".into()),
        ] {
            session.handle(command, &mut out).unwrap();
        }

        // (2500 + 2 × 200) × 1.8 = 5220
        assert_eq!(session.estimator().estimate().total, dec!(5220));
    }

    #[test]
    fn quit_stops_the_session() {
        let config = AppConfig::default();
        let mut session = Session::new(&config);
        let mut out = Vec::new();

        let flow = session.handle(SessionCommand::Quit, &mut out).unwrap();

        assert_eq!(flow, Flow::Quit);
    }
}
