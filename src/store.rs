use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::project::{FileReference, Project};

/// The capability surface a manifest backend must provide. The mutation
/// flow only ever loads, adds references, and saves; it never inspects the
/// backend's on-disk representation.
pub trait ProjectStore: Sized {
    fn load(path: &Path) -> Result<Self, StoreError>;
    fn add_file(&mut self, path: &Path, group: Option<&str>) -> &FileReference;
    fn save(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not load manifest at {}: {}", .path.display(), .reason)]
    Load { path: PathBuf, reason: String },
    #[error("could not save manifest at {}: {}", .path.display(), .reason)]
    Save { path: PathBuf, reason: String },
}

fn load_error(path: &Path, reason: impl Display) -> StoreError {
    StoreError::Load {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn save_error(path: &Path, reason: impl Display) -> StoreError {
    StoreError::Save {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// JSON project manifest backend. Saves overwrite the path the manifest
/// was loaded from; no backup is kept.
#[derive(Debug)]
pub struct JsonProject {
    path: PathBuf,
    project: Project,
}

impl JsonProject {
    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl ProjectStore for JsonProject {
    fn load(path: &Path) -> Result<Self, StoreError> {
        let data = fs::read_to_string(path).map_err(|err| load_error(path, err))?;
        let project: Project =
            serde_json::from_str(&data).map_err(|err| load_error(path, err))?;
        project.validate().map_err(|err| load_error(path, err))?;

        Ok(JsonProject {
            path: path.to_path_buf(),
            project,
        })
    }

    fn add_file(&mut self, path: &Path, group: Option<&str>) -> &FileReference {
        self.project.add_file(path, group)
    }

    fn save(&self) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(&self.project)
            .map_err(|err| save_error(&self.path, err))?;

        // Write beside the destination, then rename over it.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, data).map_err(|err| save_error(&self.path, err))?;
        fs::rename(&tmp_path, &self.path).map_err(|err| save_error(&self.path, err))?;
        Ok(())
    }
}

/// Add each path as a new reference, in input order. Returns the recorded
/// paths for reporting. Adding cannot fail once the manifest is loaded.
pub fn add_files<S: ProjectStore>(
    store: &mut S,
    paths: &[PathBuf],
    group: Option<&str>,
) -> Vec<String> {
    paths
        .iter()
        .map(|path| store.add_file(path, group).path.clone())
        .collect()
}
