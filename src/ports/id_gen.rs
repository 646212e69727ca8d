//! ID generator port for producing identifiers assigned on creation.

/// Generates unique identifiers.
///
/// Uniqueness is probabilistic; no registry of issued identifiers is kept.
/// Substituting the generator gives tests and cassette playback a
/// predictable sequence.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
