//! Test helpers: stub collaborators, temporary workspaces and a blocking
//! runtime for driving async commands from synchronous tests.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use saferoute_core::test_support::{StubDirections, StubPlaceSearch, candidate, straight_path};
use saferoute_core::{CandidateRoute, DirectionsProvider, PlaceSearch};
use services::ServiceConfig;
use std::future::Future;
use std::sync::Arc;
use tempfile::TempDir;

pub(super) const TEST_API_KEY: &str = "test-key";

/// Collaborators that never touch the network.
pub(super) struct StubCollaborators {
    pub(super) search: Arc<StubPlaceSearch>,
    pub(super) directions: StubDirections,
}

impl StubCollaborators {
    pub(super) fn new(search: StubPlaceSearch, directions: StubDirections) -> Self {
        Self {
            search: Arc::new(search),
            directions,
        }
    }
}

impl Collaborators for StubCollaborators {
    fn place_search(&self, _config: &ServiceConfig) -> Result<Box<dyn PlaceSearch>, CliError> {
        Ok(Box::new(Arc::clone(&self.search)))
    }

    fn directions(
        &self,
        _config: &ServiceConfig,
    ) -> Result<Box<dyn DirectionsProvider>, CliError> {
        Ok(Box::new(self.directions.clone()))
    }
}

/// A temporary directory with a UTF-8 root path.
pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

/// `count` short eastbound routes, one kilometre-ish step apart.
pub(super) fn sample_routes(count: usize) -> Vec<CandidateRoute> {
    (0..count)
        .map(|index| {
            let summary = if index == 0 { "NH44 highway" } else { "Old City Road" };
            candidate(index, straight_path(4, 0.01), summary)
        })
        .collect()
}

pub(super) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}
