//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the modifier and a
//! collaborator supplied by the host (repository access, identifier
//! generation). Implementations live in `src/adapters/`.

pub mod id_gen;
pub mod repository;

pub use id_gen::IdGenerator;
pub use repository::{RepositoryClient, RepositoryError};
