//! Repository layer: persistence of the student book, lesson book and task list.
//!
//! # Responsibility
//! - Define the `BookRepository` contract used by the application shell.
//! - Keep file formats and JSON adaptation out of the domain model.
//!
//! # Invariants
//! - Read paths reject malformed or invariant-breaking data with
//!   `RepoError::InvalidData` instead of repairing it.
//! - A missing book file reads as an empty book.

pub mod json_repo;
