use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub output_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(Path::new(&cfg.logs_dir))?;
    let output_dir = ensure_writable_dir(Path::new(&cfg.output_dir))?;
    Ok(ResolvedPaths {
        logs_dir,
        output_dir,
    })
}

/// Creates `path` if missing and checks that files can be written into it.
pub fn ensure_writable_dir(path: &Path) -> Result<PathBuf> {
    let dir = ensure_dir(path)?;
    let probe_file = dir.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("directory {} is not writable", dir.display()))?;
    fs::remove_file(&probe_file)?;
    Ok(dir)
}

fn ensure_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
    }
    Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}
