//! Command-line front end.
//!
//! One-shot subcommands manage the persisted session; `shell` opens an
//! interactive page session over a freshly seeded catalog.

mod notice;
pub mod render;
mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mockable::Clock;
use thiserror::Error;

use crate::config::AppSettings;
use crate::domain::ports::LocalStorage;
use crate::domain::{Dashboard, LoginRequest, SessionService, SignUpRequest, VisionLevel};
use crate::outbound::seed::{CatalogSource, SeedLoadError, load_catalog};

pub use notice::{Action, Notice, NoticeVariant};
pub use shell::{Shell, ShellCommand, ShellExit, ShellParseError};

/// Senior Spark: clubs, events and chat for the local community.
#[derive(Debug, Parser)]
#[command(name = "senior-spark", version, about)]
pub struct Cli {
    /// Directory holding the persisted session.
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,
    /// Seed registry file replacing the built-in catalog.
    #[arg(long, global = true, value_name = "FILE")]
    pub seed_registry: Option<PathBuf>,
    /// Named demo seed adding generated clubs and events.
    #[arg(long, global = true, value_name = "NAME")]
    pub demo_seed: Option<String>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Layer command-line flags over loaded settings.
    pub fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(dir) = &self.storage_dir {
            settings.storage_dir = Some(dir.clone());
        }
        if let Some(path) = &self.seed_registry {
            settings.seed_registry = Some(path.clone());
        }
        if let Some(seed) = &self.demo_seed {
            settings.demo_seed = Some(seed.clone());
        }
        settings.log_json |= self.log_json;
    }
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account and sign in.
    Signup {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Email address.
        #[arg(long)]
        email: String,
        /// Password; checked for presence only and never stored.
        #[arg(long)]
        password: String,
        /// Age in years; 18 or older.
        #[arg(long)]
        age: String,
    },
    /// Sign in.
    Login {
        /// Email address.
        #[arg(long)]
        email: String,
        /// Password; checked for presence only and never stored.
        #[arg(long)]
        password: String,
        /// Display name; defaults to the part of the email before `@`.
        #[arg(long)]
        name: Option<String>,
        /// Age in years.
        #[arg(long)]
        age: Option<String>,
    },
    /// Sign out and clear stored preferences.
    Logout,
    /// Show the signed-in user.
    Profile,
    /// Show or set the vision level (-3 to 2).
    Vision {
        /// New level.
        #[arg(allow_negative_numbers = true)]
        level: Option<String>,
    },
    /// Open an interactive session.
    Shell,
}

/// Failures that stop a command outright.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The catalog could not be seeded.
    #[error(transparent)]
    Seed(#[from] SeedLoadError),
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action succeeded.
    Success,
    /// The action was refused; a notice explains why.
    Refused,
}

/// Everything a command needs besides its arguments.
pub struct Context<'a, S> {
    /// Persisted session.
    pub session: SessionService<S>,
    /// Seed registry and demo seed settings.
    pub catalog: CatalogSource<'a>,
    /// Time source for chat timestamps.
    pub clock: Arc<dyn Clock>,
}

fn refuse(out: &mut impl Write, notice: &Notice) -> Result<Outcome, CliError> {
    render::notice(out, notice)?;
    Ok(Outcome::Refused)
}

fn invalid_form(out: &mut impl Write, err: &impl std::fmt::Display) -> Result<Outcome, CliError> {
    let error = crate::domain::Error::invalid_request(err.to_string());
    refuse(out, &Notice::failure(Action::Other, &error))
}

/// Run `command`, reading shell input from `input` and writing to `out`.
pub fn execute<S: LocalStorage>(
    command: Command,
    ctx: &Context<'_, S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome, CliError> {
    match command {
        Command::Signup {
            name,
            email,
            password,
            age,
        } => {
            let form = match SignUpRequest::try_from_parts(&name, &email, &password, &age) {
                Ok(form) => form,
                Err(err) => return invalid_form(out, &err),
            };
            match ctx.session.sign_up(&form) {
                Ok(_) => {
                    render::notice(out, &Notice::signed_up())?;
                    Ok(Outcome::Success)
                }
                Err(err) => refuse(out, &Notice::failure(Action::SignUp, &err)),
            }
        }
        Command::Login {
            email,
            password,
            name,
            age,
        } => {
            let form = match LoginRequest::try_from_parts(
                &email,
                &password,
                name.as_deref(),
                age.as_deref(),
            ) {
                Ok(form) => form,
                Err(err) => return invalid_form(out, &err),
            };
            match ctx.session.log_in(&form) {
                Ok(_) => {
                    render::notice(out, &Notice::logged_in())?;
                    Ok(Outcome::Success)
                }
                Err(err) => refuse(out, &Notice::failure(Action::LogIn, &err)),
            }
        }
        Command::Logout => match ctx.session.log_out() {
            Ok(()) => {
                render::notice(out, &Notice::logged_out())?;
                Ok(Outcome::Success)
            }
            Err(err) => refuse(out, &Notice::failure(Action::Other, &err)),
        },
        Command::Profile => {
            let state = match ctx.session.restore() {
                Ok(state) => state,
                Err(err) => return refuse(out, &Notice::failure(Action::Other, &err)),
            };
            match state.user {
                Some(user) => {
                    render::account(out, &user, state.vision_level)?;
                    Ok(Outcome::Success)
                }
                None => refuse(out, &Notice::sign_in_required()),
            }
        }
        Command::Vision { level: None } => {
            let state = match ctx.session.restore() {
                Ok(state) => state,
                Err(err) => return refuse(out, &Notice::failure(Action::Other, &err)),
            };
            render::vision(out, state.vision_level)?;
            Ok(Outcome::Success)
        }
        Command::Vision { level: Some(raw) } => {
            let level: VisionLevel = match raw.parse() {
                Ok(level) => level,
                Err(err) => return invalid_form(out, &err),
            };
            match ctx.session.set_vision_level(level) {
                Ok(()) => {
                    render::notice(out, &Notice::vision_saved(level))?;
                    Ok(Outcome::Success)
                }
                Err(err) => refuse(out, &Notice::failure(Action::Other, &err)),
            }
        }
        Command::Shell => run_shell(ctx, input, out),
    }
}

fn run_shell<S: LocalStorage>(
    ctx: &Context<'_, S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome, CliError> {
    let state = match ctx.session.restore() {
        Ok(state) => state,
        Err(err) => return refuse(out, &Notice::failure(Action::Other, &err)),
    };
    let Some(user) = state.user else {
        return refuse(out, &Notice::sign_in_required());
    };
    let seeded = load_catalog(&ctx.catalog)?;
    let dashboard = Dashboard::new(user, seeded.catalog, seeded.greetings, Arc::clone(&ctx.clock));
    let mut shell = Shell::new(dashboard, &ctx.session, state.vision_level);
    shell.run(input, out)?;
    Ok(Outcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureLocalStorage;
    use crate::domain::{USER_KEY, VISION_LEVEL_KEY};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ctx() -> Context<'static, FixtureLocalStorage> {
        Context {
            session: SessionService::new(FixtureLocalStorage::default()),
            catalog: CatalogSource::default(),
            clock: Arc::new(DefaultClock),
        }
    }

    fn run(
        ctx: &Context<'_, FixtureLocalStorage>,
        command: Command,
        input: &str,
    ) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = execute(command, ctx, input.as_bytes(), &mut out).expect("command runs");
        (outcome, String::from_utf8(out).expect("utf-8"))
    }

    fn sign_up(age: &str) -> Command {
        Command::Signup {
            name: "Margaret".into(),
            email: "margaret@example.com".into(),
            password: "pw".into(),
            age: age.into(),
        }
    }

    #[rstest]
    fn sign_up_reports_welcome(ctx: Context<'static, FixtureLocalStorage>) {
        let (outcome, text) = run(&ctx, sign_up("70"), "");
        assert_eq!(outcome, Outcome::Success);
        assert!(text.contains("Welcome to Senior Spark!"));
        assert_eq!(ctx.session.storage().keys(), [USER_KEY]);
    }

    #[rstest]
    fn underage_sign_up_is_refused(ctx: Context<'static, FixtureLocalStorage>) {
        let (outcome, text) = run(&ctx, sign_up("16"), "");
        assert_eq!(outcome, Outcome::Refused);
        assert!(text.contains("Age Restriction: You must be 18 or older to join our community."));
        assert!(ctx.session.storage().keys().is_empty());
    }

    #[rstest]
    fn shell_requires_sign_in(ctx: Context<'static, FixtureLocalStorage>) {
        let (outcome, text) = run(&ctx, Command::Shell, "home\n");
        assert_eq!(outcome, Outcome::Refused);
        assert!(text.contains("Sign In Required"));
    }

    #[rstest]
    fn vision_accepts_negative_levels(ctx: Context<'static, FixtureLocalStorage>) {
        let (outcome, _) = run(&ctx, Command::Vision { level: Some("-3".into()) }, "");
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            ctx.session.storage().get_item(VISION_LEVEL_KEY).expect("get"),
            Some("-3".to_owned())
        );
    }

    #[rstest]
    fn clap_parses_negative_vision_level() {
        let cli = Cli::try_parse_from(["senior-spark", "vision", "-2"]).expect("parse");
        assert!(matches!(cli.command, Command::Vision { level: Some(ref raw) } if raw == "-2"));
    }

    #[rstest]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "senior-spark",
            "--demo-seed",
            "sunny-heron",
            "profile",
            "--log-json",
        ])
        .expect("parse");
        let mut settings = AppSettings {
            storage_dir: None,
            seed_registry: None,
            demo_seed: Some("quiet-otter".into()),
            log_json: false,
        };
        cli.apply_to(&mut settings);
        assert_eq!(settings.demo_seed(), Some("sunny-heron"));
        assert!(settings.log_json);
    }
}
