//! Recognition of spoken "create a task" commands.
//!
//! Matching is plain substring search over the lower-cased transcript: the first
//! trigger phrase found wins and everything after it becomes the task title.

/// Phrases that introduce a new task. Longer phrases come first so that
/// "create a task" is not cut short by a shorter prefix.
const CREATE_TRIGGERS: &[&str] = &["создай задачу", "create a task", "create task", "add task"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    CreateTask { title: String },
}

/// Parses a transcript. Returns `None` when no trigger phrase is present or the
/// title after it is empty.
pub fn parse_command(command: &str) -> Option<VoiceCommand> {
    let lowered = command.to_lowercase();

    let (start, trigger) = CREATE_TRIGGERS
        .iter()
        .filter_map(|trigger| lowered.find(trigger).map(|pos| (pos, *trigger)))
        .min_by_key(|(pos, trigger)| (*pos, std::cmp::Reverse(trigger.len())))?;

    let title = lowered[start + trigger.len()..]
        .trim_start_matches(|c: char| c.is_whitespace() || c == ':')
        .trim();

    if title.is_empty() {
        return None;
    }

    Some(VoiceCommand::CreateTask {
        title: title.to_string(),
    })
}
