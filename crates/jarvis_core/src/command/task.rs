//! Task commands.

use crate::command::{resolve, CommandError, CommandOutcome, CommandResult};
use crate::index::Index;
use crate::messages::{IndexKind, ListKind, Message};
use crate::model::book::{predicate, show_all};
use crate::model::manager::Model;
use crate::model::task::{Task, TaskDeadline, TaskDesc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskCommand {
    pub desc: TaskDesc,
    pub deadline: TaskDeadline,
}

impl AddTaskCommand {
    pub const WORD: &'static str = "addtask";
    pub const USAGE: &'static str = "addtask: Adds a task to JARVIS.\n\
        Parameters: t/TASK_DESCRIPTION [d/DEADLINE (yyyy-MM-dd)]\n\
        Example: addtask t/Mark missions d/2022-10-28";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let task = Task::new(self.desc, self.deadline);
        let feedback = format!("New task added: {task}");
        model.add_task(task)?;
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTaskCommand {
    pub index: Index,
}

impl DeleteTaskCommand {
    pub const WORD: &'static str = "deletetask";
    pub const USAGE: &'static str = "deletetask: Deletes the task identified by the index number \
        used in the displayed task list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: deletetask 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let target = resolve(model.filtered_tasks(), self.index, IndexKind::Task)?.id();
        let deleted = model.delete_task(target)?;
        Ok(CommandOutcome::new(format!("Deleted Task: {deleted}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkTaskCommand {
    pub index: Index,
}

impl MarkTaskCommand {
    pub const WORD: &'static str = "marktask";
    pub const USAGE: &'static str = "marktask: Marks the task identified by the index number \
        used in the displayed task list as done.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: marktask 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let task = set_done(model, self.index, true)?;
        Ok(CommandOutcome::new(format!("Marked task as done: {task}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarkTaskCommand {
    pub index: Index,
}

impl UnmarkTaskCommand {
    pub const WORD: &'static str = "unmarktask";
    pub const USAGE: &'static str = "unmarktask: Marks the task identified by the index number \
        used in the displayed task list as not done.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: unmarktask 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let task = set_done(model, self.index, false)?;
        Ok(CommandOutcome::new(format!(
            "Marked task as not done: {task}"
        )))
    }
}

fn set_done(
    model: &mut dyn Model,
    index: Index,
    is_done: bool,
) -> Result<Task, CommandError> {
    let target = resolve(model.filtered_tasks(), index, IndexKind::Task)?;
    let updated = target.with_done(is_done);
    let target_id = target.id();
    model.set_task(target_id, updated.clone())?;
    Ok(updated)
}

/// Filters the task list to descriptions containing any keyword as a whole word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindTaskCommand {
    pub keywords: Vec<String>,
}

impl FindTaskCommand {
    pub const WORD: &'static str = "findtask";
    pub const USAGE: &'static str = "findtask: Finds all tasks whose descriptions contain any of \
        the specified keywords (case-insensitive) and displays them as a list with index numbers.\n\
        Parameters: KEYWORD [MORE_KEYWORDS]...\n\
        Example: findtask mark consult";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let keywords = self.keywords;
        model.update_filtered_task_list(predicate(move |task: &Task| {
            task.desc().as_str().split_whitespace().any(|word| {
                keywords
                    .iter()
                    .any(|keyword| word.eq_ignore_ascii_case(keyword))
            })
        }));
        let count = model.filtered_tasks().len();
        Ok(CommandOutcome::new(
            Message::Listed {
                kind: ListKind::Tasks,
                count,
            }
            .to_string(),
        )
        .showing(ListKind::Tasks))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTaskCommand;

impl ListTaskCommand {
    pub const WORD: &'static str = "listtask";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        model.update_filtered_task_list(show_all());
        Ok(CommandOutcome::new("Listed all tasks").showing(ListKind::Tasks))
    }
}
