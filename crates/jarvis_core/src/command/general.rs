//! Commands that do not address a single entity.

use crate::command::{CommandOutcome, CommandResult};
use crate::model::manager::Model;

/// Empties every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const WORD: &'static str = "clear";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        model.clear();
        Ok(CommandOutcome::new("JARVIS has been cleared!"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpCommand;

impl HelpCommand {
    pub const WORD: &'static str = "help";
    pub const USAGE: &'static str = "help: Shows program usage instructions.\nExample: help";

    pub fn execute(self, _model: &mut dyn Model) -> CommandResult {
        Ok(CommandOutcome {
            show_help: true,
            ..CommandOutcome::new("Opened help window.")
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitCommand;

impl ExitCommand {
    pub const WORD: &'static str = "exit";

    pub fn execute(self, _model: &mut dyn Model) -> CommandResult {
        Ok(CommandOutcome {
            exit: true,
            ..CommandOutcome::new("Exiting JARVIS as requested ...")
        })
    }
}
