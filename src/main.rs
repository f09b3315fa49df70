mod agenda;
mod app;
mod calendar;
mod detail;
mod goto;
mod help;
mod logging;
mod noteform;
mod theme;
use crate::agenda::{CalendarSession, YearMonth};
use crate::app::App;
use crate::logging::{init_logging, normalize_level, DEFAULT_LOG_LEVEL};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        log_dir: Option<PathBuf>,
        log_level: &'static str,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut log_dir = None;
        let mut log_level = DEFAULT_LOG_LEVEL;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("log-dir") => log_dir = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => {
                    let value = parser.value()?.string()?;
                    match normalize_level(&value) {
                        Ok(level) => log_level = level,
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match parse_start_date(&value) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            log_dir,
            log_level,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                log_dir,
                log_level,
            } => {
                let _logger = log_dir
                    .map(|dir| init_logging(log_level, &dir))
                    .transpose()?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let start = date.unwrap_or(today);
                let session = CalendarSession::new(YearMonth::containing(start));
                let app = App::new(session, today).start_date(start);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal).context("terminal I/O failed")?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: calnotes [options] [YYYY-MM[-DD]]");
                println!();
                println!("Terminal month calendar with per-day and per-week notes");
                println!();
                println!("Options:");
                println!("  --log-dir <DIR>      Write log files to DIR");
                println!("  --log-level <LEVEL>  trace, debug, info, warn, or error [default: info]");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Accepts either a full date or a year and month, the latter meaning the
/// first of that month
fn parse_start_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, &YMD_FMT).or_else(|e| {
        if value.matches('-').count() == 1 {
            Date::parse(&format!("{value}-01"), &YMD_FMT)
        } else {
            Err(e)
        }
    })
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
