/// Database models for Taskboard
///
/// This module contains all database models and their CRUD operations.
/// Entities form a containment chain: users own projects, projects
/// contain tasks, tasks carry comments. Foreign keys are plain integer
/// ids validated at write time by the callers.
///
/// All four models share the same lifecycle: rows are created with
/// both timestamps set, mutated through their update operation (which
/// refreshes `updated_at`), and soft-deleted by flipping `is_deleted`.
/// Every read in this layer filters `is_deleted = FALSE`; call sites
/// never see a deleted row.
///
/// # Models
///
/// - `user`: User accounts with a role (`Admin` or `User`)
/// - `project`: Projects owned by a user
/// - `task`: Tasks within a project, with a closed status set
/// - `comment`: Comments on a task, attributed to a user

pub mod comment;
pub mod project;
pub mod task;
pub mod user;
