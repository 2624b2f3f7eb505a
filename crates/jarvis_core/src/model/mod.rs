//! In-memory domain model for students, lessons and tasks.
//!
//! # Responsibility
//! - Define validated value objects and the aggregates composed from them.
//! - Own the collections and their filtered views behind the `Model` trait.
//!
//! # Invariants
//! - Value objects are immutable once constructed.
//! - Collections change only through `Model` hooks, which receive whole new
//!   values; nothing outside the model mutates a stored entity in place.

pub mod attendance;
pub mod book;
pub mod grade;
pub mod lesson;
pub mod lesson_notes;
pub mod manager;
pub mod student;
pub mod task;
pub mod time_period;
pub mod validation;
