//! Interactive shell: one page session over a [`Dashboard`].
//!
//! Each input line is one user action. Catalog, ledger and chat exist only
//! for the lifetime of the shell; `vision` and `logout` also touch the
//! persisted session.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::LocalStorage;
use crate::domain::{
    Dashboard, GroupDraft, GroupId, GroupKind, GroupValidationError, SessionService,
    UnknownGroupKind, VisionLevel, VisionLevelError,
};

use super::notice::{Action, Notice};
use super::render;

const HELP: &str = "\
Commands:
  home                                   featured clubs and events
  clubs | events                         list every club or event
  club <id> | event <id>                 show one group (and its chat, for members)
  join club|event <id>                   join a club or register for an event
  create club <name> | <description>
  create event <YYYY-MM-DD> <name> | <description>
  say club|event <id> <message>          post to a group's chat
  profile                                your details and memberships
  vision [level]                         show or set text size (-3..2)
  logout                                 sign out and leave
  quit                                   leave, staying signed in
";

/// Errors raised while parsing a shell line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellParseError {
    /// The line was blank.
    #[error("enter a command, or `help`")]
    Empty,
    /// The first word is not a command.
    #[error("unknown command `{command}`; try `help`")]
    UnknownCommand {
        /// Word that was not recognised.
        command: String,
    },
    /// A required argument is missing.
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        /// Command being parsed.
        command: &'static str,
        /// What was expected.
        argument: &'static str,
    },
    /// The group kind is not `club` or `event`.
    #[error(transparent)]
    Kind(#[from] UnknownGroupKind),
    /// The group id is blank.
    #[error(transparent)]
    Id(#[from] GroupValidationError),
    /// The event date is not `YYYY-MM-DD`.
    #[error("`{value}` is not a date in YYYY-MM-DD form")]
    Date {
        /// Rejected text.
        value: String,
    },
    /// The vision level is invalid.
    #[error(transparent)]
    Vision(#[from] VisionLevelError),
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Print the command list.
    Help,
    /// Featured groups.
    Home,
    /// Every group of a kind.
    List(GroupKind),
    /// One group.
    Show(GroupKind, GroupId),
    /// Join or register.
    Join(GroupKind, GroupId),
    /// Create a group.
    Create(GroupKind, GroupDraft),
    /// Post a chat message.
    Say(GroupKind, GroupId, String),
    /// The user's details and memberships.
    Profile,
    /// Show (`None`) or set the vision level.
    Vision(Option<VisionLevel>),
    /// Sign out and leave.
    Logout,
    /// Leave, staying signed in.
    Quit,
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn require<'a>(
    word: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ShellParseError> {
    if word.is_empty() {
        Err(ShellParseError::MissingArgument { command, argument })
    } else {
        Ok(word)
    }
}

fn kind_and_id(
    command: &'static str,
    rest: &str,
) -> Result<(GroupKind, GroupId, String), ShellParseError> {
    let (kind, rest) = split_word(rest);
    let kind: GroupKind = require(kind, command, "`club` or `event`")?.parse()?;
    let (id, rest) = split_word(rest);
    let id = GroupId::new(require(id, command, "a group id")?)?;
    Ok((kind, id, rest.to_owned()))
}

fn name_and_description(rest: &str) -> Result<(String, String), ShellParseError> {
    let (name, description) = rest
        .split_once('|')
        .ok_or(ShellParseError::MissingArgument {
            command: "create",
            argument: "`<name> | <description>`",
        })?;
    Ok((name.trim().to_owned(), description.trim().to_owned()))
}

impl ShellCommand {
    /// Parse one input line.
    ///
    /// # Examples
    /// ```
    /// use senior_spark::domain::GroupKind;
    /// use senior_spark::inbound::cli::ShellCommand;
    ///
    /// let command = ShellCommand::parse("join event 2").unwrap();
    /// assert!(matches!(command, ShellCommand::Join(GroupKind::Event, _)));
    /// ```
    pub fn parse(line: &str) -> Result<Self, ShellParseError> {
        let (command, rest) = split_word(line.trim());
        match command.to_ascii_lowercase().as_str() {
            "" => Err(ShellParseError::Empty),
            "help" | "?" => Ok(Self::Help),
            "home" => Ok(Self::Home),
            "clubs" => Ok(Self::List(GroupKind::Club)),
            "events" => Ok(Self::List(GroupKind::Event)),
            "club" => Ok(Self::Show(
                GroupKind::Club,
                GroupId::new(require(rest, "club", "a club id")?)?,
            )),
            "event" => Ok(Self::Show(
                GroupKind::Event,
                GroupId::new(require(rest, "event", "an event id")?)?,
            )),
            "join" | "register" => {
                let (kind, id, _) = kind_and_id("join", rest)?;
                Ok(Self::Join(kind, id))
            }
            "create" => Self::parse_create(rest),
            "say" => {
                let (kind, id, text) = kind_and_id("say", rest)?;
                Ok(Self::Say(kind, id, text))
            }
            "profile" => Ok(Self::Profile),
            "vision" if rest.is_empty() => Ok(Self::Vision(None)),
            "vision" => Ok(Self::Vision(Some(rest.parse()?))),
            "logout" => Ok(Self::Logout),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ShellParseError::UnknownCommand {
                command: other.to_owned(),
            }),
        }
    }

    fn parse_create(rest: &str) -> Result<Self, ShellParseError> {
        let (kind, rest) = split_word(rest);
        let kind: GroupKind = require(kind, "create", "`club` or `event`")?.parse()?;
        match kind {
            GroupKind::Club => {
                let (name, description) = name_and_description(rest)?;
                Ok(Self::Create(kind, GroupDraft::club(name, description)))
            }
            GroupKind::Event => {
                let (date, rest) = split_word(rest);
                let date = require(date, "create", "an event date")?;
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                    ShellParseError::Date {
                        value: date.to_owned(),
                    }
                })?;
                let (name, description) = name_and_description(rest)?;
                Ok(Self::Create(kind, GroupDraft::event(name, description, date)))
            }
        }
    }
}

/// How the shell ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// `quit` or end of input.
    Quit,
    /// `logout`; the stored session was cleared.
    LoggedOut,
}

/// Interactive session state.
pub struct Shell<'a, S> {
    dashboard: Dashboard,
    session: &'a SessionService<S>,
    vision: VisionLevel,
}

impl<'a, S: LocalStorage> Shell<'a, S> {
    /// Start a shell over `dashboard`, persisting preferences via `session`.
    pub fn new(dashboard: Dashboard, session: &'a SessionService<S>, vision: VisionLevel) -> Self {
        Self {
            dashboard,
            session,
            vision,
        }
    }

    /// Session dashboard.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Read commands until `quit`, `logout` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<ShellExit> {
        render::home(out, &self.dashboard.home())?;
        writeln!(out, "Type `help` for commands.")?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match ShellCommand::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "! {err}")?;
                    continue;
                }
            };
            debug!(?command, "shell command");
            if let Some(exit) = self.dispatch(command, out)? {
                return Ok(exit);
            }
        }
        Ok(ShellExit::Quit)
    }

    /// Apply one command. Returns `Some` when the shell should stop.
    pub fn dispatch(
        &mut self,
        command: ShellCommand,
        out: &mut impl Write,
    ) -> io::Result<Option<ShellExit>> {
        match command {
            ShellCommand::Help => out.write_all(HELP.as_bytes())?,
            ShellCommand::Home => render::home(out, &self.dashboard.home())?,
            ShellCommand::List(kind) => render::groups(out, kind, self.dashboard.groups(kind))?,
            ShellCommand::Show(kind, id) => match self.dashboard.detail(kind, &id) {
                Ok(view) => render::detail(out, &view)?,
                Err(err) => render::notice(out, &Notice::failure(Action::Other, &err))?,
            },
            ShellCommand::Join(kind, id) => {
                let notice = match self.dashboard.join(kind, &id) {
                    Ok(group) => Notice::joined(kind, group.name()),
                    Err(err) => Notice::failure(Action::Join(kind), &err),
                };
                render::notice(out, &notice)?;
            }
            ShellCommand::Create(kind, draft) => {
                let notice = match self.dashboard.create(kind, &draft) {
                    Ok(group) => Notice::created(kind, group.name()),
                    Err(err) => Notice::failure(Action::Create(kind), &err),
                };
                render::notice(out, &notice)?;
            }
            ShellCommand::Say(kind, id, text) => {
                match self.dashboard.post_message(kind, &id, &text) {
                    Ok(message) => writeln!(
                        out,
                        "  #{} {}: {}",
                        message.id, message.author, message.text
                    )?,
                    Err(err) => render::notice(out, &Notice::failure(Action::Post, &err))?,
                }
            }
            ShellCommand::Profile => render::profile(out, &self.dashboard.profile(), self.vision)?,
            ShellCommand::Vision(None) => render::vision(out, self.vision)?,
            ShellCommand::Vision(Some(level)) => match self.session.set_vision_level(level) {
                Ok(()) => {
                    self.vision = level;
                    render::notice(out, &Notice::vision_saved(level))?;
                }
                Err(err) => render::notice(out, &Notice::failure(Action::Other, &err))?,
            },
            ShellCommand::Logout => {
                return match self.session.log_out() {
                    Ok(()) => {
                        render::notice(out, &Notice::logged_out())?;
                        Ok(Some(ShellExit::LoggedOut))
                    }
                    Err(err) => {
                        render::notice(out, &Notice::failure(Action::Other, &err))?;
                        Ok(None)
                    }
                };
            }
            ShellCommand::Quit => return Ok(Some(ShellExit::Quit)),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(raw: &str) -> GroupId {
        GroupId::new(raw).expect("valid id")
    }

    #[rstest]
    #[case("home", ShellCommand::Home)]
    #[case("  CLUBS ", ShellCommand::List(GroupKind::Club))]
    #[case("event 2", ShellCommand::Show(GroupKind::Event, id("2")))]
    #[case("join club 1", ShellCommand::Join(GroupKind::Club, id("1")))]
    #[case("register event 7", ShellCommand::Join(GroupKind::Event, id("7")))]
    #[case("say club 1 Hello there", ShellCommand::Say(GroupKind::Club, id("1"), "Hello there".into()))]
    #[case("vision", ShellCommand::Vision(None))]
    #[case("vision -2", ShellCommand::Vision(Some(VisionLevel::new(-2).expect("level"))))]
    #[case("quit", ShellCommand::Quit)]
    fn parses_commands(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(ShellCommand::parse(line), Ok(expected));
    }

    #[rstest]
    fn parses_club_creation() {
        let command = ShellCommand::parse("create club Chess Circle | Weekly games, all welcome")
            .expect("parse");
        assert_eq!(
            command,
            ShellCommand::Create(
                GroupKind::Club,
                GroupDraft::club("Chess Circle", "Weekly games, all welcome")
            )
        );
    }

    #[rstest]
    fn parses_event_creation() {
        let command = ShellCommand::parse("create event 2024-09-01 Tea Dance | Ballroom classics")
            .expect("parse");
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).expect("date");
        assert_eq!(
            command,
            ShellCommand::Create(
                GroupKind::Event,
                GroupDraft::event("Tea Dance", "Ballroom classics", date)
            )
        );
    }

    #[rstest]
    #[case("", ShellParseError::Empty)]
    #[case("dance", ShellParseError::UnknownCommand { command: "dance".into() })]
    #[case("join", ShellParseError::MissingArgument { command: "join", argument: "`club` or `event`" })]
    #[case("join club", ShellParseError::MissingArgument { command: "join", argument: "a group id" })]
    #[case("join party 1", ShellParseError::Kind(UnknownGroupKind("party".into())))]
    #[case("create event 1st-june Picnic | Bring food", ShellParseError::Date { value: "1st-june".into() })]
    #[case("create club Chess Circle", ShellParseError::MissingArgument { command: "create", argument: "`<name> | <description>`" })]
    #[case("vision 5", ShellParseError::Vision(VisionLevelError::OutOfRange { value: 5 }))]
    fn rejects_malformed_lines(#[case] line: &str, #[case] expected: ShellParseError) {
        assert_eq!(ShellCommand::parse(line), Err(expected));
    }
}
