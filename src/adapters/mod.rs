//! Adapter implementations of the port traits.
//!
//! - `live`: real UUIDs and a YAML-file repository.
//! - `memory`: in-process repository and deterministic IDs for tests.
//! - `recording`: wrappers that capture port traffic to cassettes.
//! - `replaying`: adapters that serve recorded traffic back.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
