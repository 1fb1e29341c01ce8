//! Scripted end-to-end runs of the command-line front end.
//!
//! Each test signs a user in through the one-shot commands and then feeds
//! a script to the interactive shell, checking the printed transcript.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use senior_spark::domain::ports::{FixtureLocalStorage, LocalStorage};
use senior_spark::domain::{SessionService, USER_KEY, VISION_LEVEL_KEY};
use senior_spark::inbound::cli::{Command, Context, Outcome, execute};
use senior_spark::outbound::seed::CatalogSource;

type Ctx = Context<'static, FixtureLocalStorage>;

#[fixture]
fn ctx() -> Ctx {
    Context {
        session: SessionService::new(FixtureLocalStorage::default()),
        catalog: CatalogSource::default(),
        clock: Arc::new(DefaultClock),
    }
}

fn run(ctx: &Ctx, command: Command, script: &str) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = execute(command, ctx, script.as_bytes(), &mut out).expect("command runs");
    (outcome, String::from_utf8(out).expect("output is UTF-8"))
}

fn sign_up(ctx: &Ctx, age: &str) {
    let command = Command::Signup {
        name: "Margaret Hale".into(),
        email: "margaret@example.com".into(),
        password: "correct horse".into(),
        age: age.into(),
    };
    let (outcome, _) = run(ctx, command, "");
    assert_eq!(outcome, Outcome::Success);
}

fn log_in_without_age(ctx: &Ctx) {
    let command = Command::Login {
        email: "walter@example.com".into(),
        password: "pw".into(),
        name: None,
        age: None,
    };
    let (outcome, _) = run(ctx, command, "");
    assert_eq!(outcome, Outcome::Success);
}

#[rstest]
fn shell_opens_on_the_home_page(ctx: Ctx) {
    sign_up(&ctx, "72");
    let (outcome, text) = run(&ctx, Command::Shell, "quit\n");
    assert_eq!(outcome, Outcome::Success);
    assert!(text.contains("Margaret Hale"));
    assert!(text.contains("Morning Walkers Club"));
    assert!(text.contains("Senior Fitness Day"));
    assert!(text.contains("Type `help` for commands."));
}

#[rstest]
fn members_can_chat_after_joining(ctx: Ctx) {
    sign_up(&ctx, "72");
    let script = "\
say club 1 Before joining
join club 1
join club 1
say club 1 Hello everyone
club 1
quit
";
    let (_, text) = run(&ctx, Command::Shell, script);

    assert!(text.contains("! Members Only: Only members of Morning Walkers Club can chat here."));
    assert!(text.contains("* Joined Club!: You've successfully joined Morning Walkers Club."));
    assert!(text.contains("! Already Joined:"));
    assert!(text.contains("#3 Margaret Hale: Hello everyone"));
    assert!(text.contains("24/50 members"));
    assert!(text.contains("Welcome to our club!"));
}

#[rstest]
fn created_groups_take_the_next_id(ctx: Ctx) {
    sign_up(&ctx, "72");
    let script = "\
create club Chess Circle | Weekly games, all welcome
create event 2024-09-01 Tea Dance | Ballroom classics
club 3
event 3
quit
";
    let (_, text) = run(&ctx, Command::Shell, script);

    assert!(text.contains("* Club Created!: Chess Circle has been created successfully."));
    assert!(text.contains("* Event Created!: Tea Dance has been created successfully."));
    assert!(text.contains("Chess Circle (Club 3)"));
    assert!(text.contains("Tea Dance (Event 3)"));
    assert!(text.contains("1/50 members"));
    assert!(text.contains("1/500 attendees"));
}

#[rstest]
fn users_without_an_age_are_turned_away(ctx: Ctx) {
    log_in_without_age(&ctx);
    let script = "\
join event 2
create club Knitting | Needles at dawn
quit
";
    let (_, text) = run(&ctx, Command::Shell, script);

    assert!(text.contains("! Age Verification Failed: You must be 18 or older to register for this event."));
    assert!(text.contains("! Age Verification Failed: You must be 18 or older to create a club."));
    assert!(text.contains("walter"));
}

#[rstest]
fn malformed_lines_do_not_end_the_session(ctx: Ctx) {
    sign_up(&ctx, "72");
    let (outcome, text) = run(&ctx, Command::Shell, "dance\njoin party 1\nprofile\nquit\n");
    assert_eq!(outcome, Outcome::Success);
    assert!(text.contains("! unknown command `dance`; try `help`"));
    assert!(text.contains("margaret@example.com"));
}

#[rstest]
fn shell_state_is_not_persisted(ctx: Ctx) {
    sign_up(&ctx, "72");
    run(&ctx, Command::Shell, "join club 2\nquit\n");
    let (_, text) = run(&ctx, Command::Shell, "club 2\nquit\n");
    assert!(text.contains("15/50 members"));
    assert!(text.contains("Chat is for members only."));
}

#[rstest]
fn vision_and_logout_reach_storage(ctx: Ctx) {
    sign_up(&ctx, "72");
    run(&ctx, Command::Shell, "vision 2\nquit\n");
    assert_eq!(
        ctx.session.storage().get_item(VISION_LEVEL_KEY).expect("read"),
        Some("2".to_owned())
    );

    let (_, text) = run(&ctx, Command::Shell, "logout\nhome\n");
    assert!(text.contains("* Signed out: See you soon!"));
    assert_eq!(ctx.session.storage().get_item(USER_KEY).expect("read"), None);
    assert_eq!(
        ctx.session.storage().get_item(VISION_LEVEL_KEY).expect("read"),
        None
    );

    let (outcome, _) = run(&ctx, Command::Shell, "home\n");
    assert_eq!(outcome, Outcome::Refused);
}
