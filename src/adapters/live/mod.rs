//! Live adapters for real external interactions.

pub mod id_gen;
pub mod repository;

pub use id_gen::LiveIdGenerator;
pub use repository::FileRepository;
