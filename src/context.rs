//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{FileRepository, LiveIdGenerator};
use crate::adapters::recording::{RecordingIdGenerator, RecordingRepository};
use crate::adapters::replaying::{ReplayingIdGenerator, ReplayingRepository};
use crate::cassette::cassette_file_name;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{IdGenerator, RepositoryClient};

/// Bundles the collaborators a modifier runs against.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Repository client for retrieving and saving objects.
    pub repository: Box<dyn RepositoryClient>,
    /// ID generator for new identifiers.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(repository: Box<dyn RepositoryClient>, id_gen: Box<dyn IdGenerator>) -> Self {
        Self { repository, id_gen }
    }

    /// Creates a live context over the YAML store at `store`.
    #[must_use]
    pub fn live(store: &Path) -> Self {
        Self::new(Box::new(FileRepository::new(store)), Box::new(LiveIdGenerator::new()))
    }

    /// Creates a live context whose port traffic is captured by `session`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`] is
    /// called.
    #[must_use]
    pub fn recording(store: &Path, session: &RecordingSession) -> Self {
        let live = Self::live(store);
        Self::new(
            Box::new(RecordingRepository::new(live.repository, session.repository.clone())),
            Box::new(RecordingIdGenerator::new(live.id_gen, session.id_gen.clone())),
        )
    }

    /// Creates a replaying context from the per-port cassettes of a
    /// recording session directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette file is missing or cannot be parsed.
    pub fn replaying(dir: &Path) -> Result<Self, String> {
        let load = |port: &str| -> Result<CassetteReplayer, String> {
            let cassette = Cassette::load(&dir.join(cassette_file_name(port)))?;
            Ok(CassetteReplayer::new(&cassette))
        };

        Ok(Self::new(
            Box::new(ReplayingRepository::new(load("repository")?)),
            Box::new(ReplayingIdGenerator::new(load("id_gen")?)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ManagedObject;

    #[test]
    fn recording_then_replaying_serves_same_results() {
        let dir = std::env::temp_dir().join("registry_idgen_context_test");
        let _ = std::fs::remove_dir_all(&dir);
        let store = dir.join("store.yaml");
        FileRepository::new(&store).create(ManagedObject::new("a", None)).unwrap();

        let session = RecordingSession::new(dir.join("cassettes")).unwrap();
        let (id, retrieved) = {
            let ctx = ServiceContext::recording(&store, &session);
            (ctx.id_gen.generate_id(), ctx.repository.retrieve("a", 1).unwrap())
        };
        let cassettes = session.finish().unwrap();

        let ctx = ServiceContext::replaying(&cassettes).unwrap();
        assert_eq!(ctx.id_gen.generate_id(), id);
        assert_eq!(ctx.repository.retrieve("a", 1).unwrap(), retrieved);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_requires_cassettes() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/cassettes")).err().unwrap();
        assert!(err.contains("repository.cassette.yaml"));
    }
}
