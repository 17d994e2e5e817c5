//! Path-acquisition collaborator.

use async_trait::async_trait;

use crate::candidates::{CandidatePath, Candidates};

/// Supplies the candidate paths for one task run, or a terminal outcome
/// when the run is already decided (no matching files).
///
/// Discovery itself belongs to the host; tasks only consume the result.
#[async_trait]
pub trait PathResolver: Send + Sync {
    async fn resolve(&self) -> anyhow::Result<Candidates>;
}

/// Resolver over a fixed path list.
///
/// An empty list resolves to a skipped run, so tasks wired with it never
/// spawn a process for nothing. This is the common host wiring when the
/// path set is computed ahead of time, and the standard test double.
#[derive(Debug, Clone, Default)]
pub struct StaticPaths {
    paths: Vec<CandidatePath>,
}

impl StaticPaths {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<CandidatePath>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PathResolver for StaticPaths {
    async fn resolve(&self) -> anyhow::Result<Candidates> {
        if self.paths.is_empty() {
            return Ok(Candidates::skipped());
        }
        Ok(Candidates::Paths(self.paths.clone()))
    }
}
