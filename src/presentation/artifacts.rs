use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use crate::charts::ChartArtifact;

/// Writes rendered charts under one output directory. File names carry the
/// session id, chart kind and artifact id, so concurrent sessions and
/// repeated renders never overwrite each other.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    session: Uuid,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, session: Uuid) -> Self {
        Self {
            dir: dir.into(),
            session,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, artifact: &ChartArtifact) -> PathBuf {
        self.dir.join(format!(
            "{}-{}-{}.html",
            self.session.simple(),
            artifact.kind.id(),
            artifact.id.simple()
        ))
    }

    pub fn save(&self, artifact: &ChartArtifact) -> Result<PathBuf> {
        let path = self.path_for(artifact);
        fs::write(&path, artifact.html.as_bytes())
            .with_context(|| format!("failed to write chart to {}", path.display()))?;
        info!(
            target: "artifact",
            path = %path.display(),
            kind = %artifact.kind,
            height = artifact.height,
            rendered_at = %artifact.rendered_at,
            bytes = artifact.html.len(),
            "chart saved"
        );
        Ok(path)
    }
}
