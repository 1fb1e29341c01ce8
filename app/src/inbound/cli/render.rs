//! Plain-text views of the dashboard.

use std::io::{self, Write};

use crate::domain::{
    CommunityGroup, GroupDetail, GroupKind, GroupStatus, HomeView, ProfileView, User, VisionLevel,
};

use super::notice::Notice;

fn group_line(out: &mut impl Write, group: &CommunityGroup) -> io::Result<()> {
    let status = match group.status() {
        GroupStatus::Open => format!("Open, {} spots left", group.available_spots()),
        GroupStatus::Full => "Full".to_owned(),
    };
    write!(
        out,
        "  [{}] {}  {}/{} {}  ({status})",
        group.id(),
        group.name(),
        group.members(),
        group.max_members(),
        group.kind().member_noun(),
    )?;
    if let Some(date) = group.date() {
        write!(out, "  on {}", date.format("%Y-%m-%d"))?;
    }
    writeln!(out)
}

fn section(
    out: &mut impl Write,
    heading: &str,
    groups: &[&CommunityGroup],
    empty: &str,
) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    if groups.is_empty() {
        return writeln!(out, "  {empty}");
    }
    for group in groups {
        group_line(out, group)?;
    }
    Ok(())
}

/// Greeting and featured groups.
pub fn home(out: &mut impl Write, view: &HomeView<'_>) -> io::Result<()> {
    writeln!(out, "Welcome back, {}!", view.greeting_name)?;
    section(out, "Featured clubs", &view.featured_clubs, "None yet.")?;
    section(out, "Featured events", &view.featured_events, "None yet.")
}

/// Full listing for one kind.
pub fn groups(out: &mut impl Write, kind: GroupKind, groups: &[CommunityGroup]) -> io::Result<()> {
    let refs: Vec<&CommunityGroup> = groups.iter().collect();
    let heading = match kind {
        GroupKind::Club => "Clubs",
        GroupKind::Event => "Events",
    };
    section(out, heading, &refs, "Nothing here yet. Create the first one!")
}

/// One group, with chat for members.
pub fn detail(out: &mut impl Write, view: &GroupDetail<'_>) -> io::Result<()> {
    let group = view.group;
    writeln!(out, "{} ({} {})", group.name(), group.kind().title(), group.id())?;
    writeln!(out, "  {}", group.description())?;
    group_line(out, group)?;
    match view.transcript {
        None => {
            let verb = match group.kind() {
                GroupKind::Club => "join",
                GroupKind::Event => "register",
            };
            writeln!(
                out,
                "  Chat is for {} only. Use `join {} {}` to {verb}.",
                group.kind().member_noun(),
                group.kind(),
                group.id()
            )
        }
        Some(messages) => {
            writeln!(out, "Chat")?;
            for message in messages {
                writeln!(
                    out,
                    "  #{} {} [{}]: {}",
                    message.id,
                    message.author,
                    message.timestamp.format("%H:%M"),
                    message.text
                )?;
            }
            Ok(())
        }
    }
}

/// Stored account details.
pub fn account(out: &mut impl Write, user: &User, level: VisionLevel) -> io::Result<()> {
    writeln!(out, "{} <{}>", user.name(), user.email())?;
    match user.age() {
        Some(age) => writeln!(out, "  Age: {age}")?,
        None => writeln!(out, "  Age: not provided")?,
    }
    writeln!(out, "  Vision level: {level} ({})", level.label())
}

/// Account details and memberships.
pub fn profile(out: &mut impl Write, view: &ProfileView<'_>, level: VisionLevel) -> io::Result<()> {
    account(out, view.user, level)?;
    section(out, "My clubs", &view.joined_clubs, "You haven't joined any clubs yet.")?;
    section(
        out,
        "My events",
        &view.registered_events,
        "You haven't registered for any events yet.",
    )
}

/// Vision level options with the current one marked.
pub fn vision(out: &mut impl Write, current: VisionLevel) -> io::Result<()> {
    writeln!(out, "Vision level (text size {}px)", current.font_size_px())?;
    for option in VisionLevel::options() {
        let marker = if option == current { ">" } else { " " };
        writeln!(out, "{marker} {:>6}  {}", option.to_string(), option.label())?;
    }
    Ok(())
}

/// A notice on its own line.
pub fn notice(out: &mut impl Write, notice: &Notice) -> io::Result<()> {
    writeln!(out, "{notice}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupRecord;
    use rstest::rstest;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("render");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[rstest]
    fn event_lines_show_dates_and_attendees() {
        let event = CommunityGroup::try_new(GroupRecord {
            kind: GroupKind::Event,
            id: "1".into(),
            name: "Community Gardening Workshop".into(),
            description: "Learn organic gardening techniques".into(),
            members: 45,
            max_members: 500,
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 15),
            created_by: "admin".into(),
            featured: true,
        })
        .expect("valid event");

        let text = render(|out| groups(out, GroupKind::Event, std::slice::from_ref(&event)));
        assert!(text.starts_with("Events\n"));
        assert!(text.contains("[1] Community Gardening Workshop  45/500 attendees"));
        assert!(text.contains("455 spots left"));
        assert!(text.contains("on 2024-06-15"));
    }

    #[rstest]
    fn vision_marks_current_level() {
        let level = VisionLevel::new(-1).expect("level");
        let text = render(|out| vision(out, level));
        assert!(text.contains("text size 12px"));
        assert!(text.contains(">     -1  Moderate magnification"));
    }
}
