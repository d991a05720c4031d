use crate::command::Command;
use crate::territory::TerritoryId;
use thiserror::Error;

/// A problem that makes a batch of commands unsafe to upload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("Duplicate territory name '{name}': Territory_{id} reuses the name of Territory_{first_id}")]
    DuplicateName {
        name: String,
        id: TerritoryId,
        first_id: TerritoryId,
    },
    #[error("Bonus group '{group}' contains no territories")]
    EmptyBonus { group: String },
    #[error("Bonus group '{group}': Territory_{territory} has no fill colour in its style")]
    MissingFill {
        group: String,
        territory: TerritoryId,
    },
    #[error("A group labelled '{label}' looks like a bonus but has no id to name it by")]
    UnnamedBonus { label: String },
}

/// Output of a command generator: the commands in emission order plus every
/// issue found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub commands: Vec<Command>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any issue was recorded; such a batch must not be submitted.
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Records an issue and keeps going.
    pub fn flag(&mut self, issue: Issue) {
        log::warn!("{}", issue);
        self.issues.push(issue);
    }

    /// Appends another generator's output after this one's.
    pub fn merge(&mut self, other: Report) {
        self.commands.extend(other.commands);
        self.issues.extend(other.issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order_and_errors() {
        let mut names = Report::new();
        names.push(Command::SetTerritoryName {
            id: 1,
            name: "A".to_string(),
        });

        let mut bonuses = Report::new();
        bonuses.push(Command::AddBonus {
            name: "B".to_string(),
            armies: 2,
            color: "#000".to_string(),
        });
        bonuses.flag(Issue::EmptyBonus {
            group: "C".to_string(),
        });

        assert!(!names.has_errors());
        names.merge(bonuses);
        assert!(names.has_errors());
        assert_eq!(names.commands.len(), 2);
        assert!(matches!(names.commands[0], Command::SetTerritoryName { .. }));
    }

    #[test]
    fn test_issue_messages() {
        let issue = Issue::DuplicateName {
            name: "Rome".to_string(),
            id: 7,
            first_id: 2,
        };
        assert_eq!(
            issue.to_string(),
            "Duplicate territory name 'Rome': Territory_7 reuses the name of Territory_2"
        );
    }
}
