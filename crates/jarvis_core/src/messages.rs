//! User-facing message catalogue.
//!
//! Messages are an enumerated registry rendered at the formatting boundary;
//! callers pick a variant and never assemble catalogue text themselves.

use std::fmt::{Display, Formatter};

/// Entity kind addressed by a displayed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Student,
    Task,
    Lesson,
    Note,
}

/// Filtered list a command asks the display layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Students,
    Tasks,
    Lessons,
}

impl ListKind {
    fn noun(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Tasks => "tasks",
            Self::Lessons => "lessons",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    UnknownCommand,
    InvalidCommandFormat { usage: &'static str },
    InvalidDisplayedIndex(IndexKind),
    Listed { kind: ListKind, count: usize },
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand => f.write_str("Unknown command"),
            Self::InvalidCommandFormat { usage } => {
                write!(f, "Invalid command format! \n{usage}")
            }
            Self::InvalidDisplayedIndex(IndexKind::Student) => {
                f.write_str("The student index provided is invalid")
            }
            Self::InvalidDisplayedIndex(IndexKind::Task) => {
                f.write_str("The task index provided is invalid")
            }
            Self::InvalidDisplayedIndex(IndexKind::Lesson) => {
                f.write_str("The lesson index provided is invalid")
            }
            Self::InvalidDisplayedIndex(IndexKind::Note) => {
                f.write_str("The note at the note index provided does not exist")
            }
            Self::Listed { kind, count } => write!(f, "{count} {} listed!", kind.noun()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexKind, ListKind, Message};

    #[test]
    fn index_messages_are_distinct_per_kind() {
        let rendered = [
            IndexKind::Student,
            IndexKind::Task,
            IndexKind::Lesson,
            IndexKind::Note,
        ]
        .map(|kind| Message::InvalidDisplayedIndex(kind).to_string());
        for (idx, message) in rendered.iter().enumerate() {
            assert!(!rendered[idx + 1..].contains(message));
        }
    }

    #[test]
    fn listed_message_uses_count_and_noun() {
        let message = Message::Listed {
            kind: ListKind::Students,
            count: 2,
        };
        assert_eq!(message.to_string(), "2 students listed!");
    }
}
