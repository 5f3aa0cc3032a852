use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Group that receives new references when the manifest does not name one.
pub const DEFAULT_GROUP: &str = "Sources";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub version: String,
    #[serde(default = "default_group_name")]
    pub default_group: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub files: Vec<FileReference>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileReference {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Error)]
pub enum ProjectValidationError {
    #[error("manifest missing required field: {0}")]
    MissingField(String),
    #[error("manifest has a group with an empty name")]
    EmptyGroupName,
    #[error("manifest defines group '{0}' more than once")]
    DuplicateGroup(String),
}

fn default_group_name() -> String {
    DEFAULT_GROUP.to_string()
}

impl FileReference {
    pub fn new(path: &Path) -> Self {
        let raw = path.to_string_lossy().to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| raw.clone());
        FileReference { name, path: raw }
    }
}

impl Project {
    /// Register a new file reference at the end of the named group, or the
    /// manifest's default group. The group is created if it does not exist.
    /// The path is recorded verbatim; duplicates and non-existent paths are
    /// accepted.
    pub fn add_file(&mut self, path: &Path, group: Option<&str>) -> &FileReference {
        let group_name = group.unwrap_or(&self.default_group).to_string();
        let idx = match self.groups.iter().position(|g| g.name == group_name) {
            Some(idx) => idx,
            None => {
                self.groups.push(Group {
                    name: group_name,
                    files: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        self.groups[idx].files.push(FileReference::new(path));
        self.groups[idx].files.last().expect("reference pushed above")
    }

    /// Structural checks applied at load time. File paths inside the
    /// manifest are never inspected.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::MissingField("name".to_string()));
        }

        if self.version.trim().is_empty() {
            return Err(ProjectValidationError::MissingField("version".to_string()));
        }

        if self.default_group.trim().is_empty() {
            return Err(ProjectValidationError::MissingField(
                "default_group".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(ProjectValidationError::EmptyGroupName);
            }

            if !seen.insert(group.name.as_str()) {
                return Err(ProjectValidationError::DuplicateGroup(group.name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_GROUP, Group, Project, ProjectValidationError};
    use std::path::Path;

    fn empty_project() -> Project {
        Project {
            name: "demo".to_string(),
            version: "1.0.0".to_string(),
            default_group: DEFAULT_GROUP.to_string(),
            groups: Vec::new(),
        }
    }

    #[test]
    fn adds_reference_to_default_group() {
        let mut project = empty_project();
        let added = project.add_file(Path::new("src/a.c"), None);
        assert_eq!(added.path, "src/a.c");
        assert_eq!(added.name, "a.c");

        assert_eq!(project.groups.len(), 1);
        assert_eq!(project.groups[0].name, DEFAULT_GROUP);
        assert_eq!(project.groups[0].files.len(), 1);
    }

    #[test]
    fn creates_named_group_when_missing() {
        let mut project = empty_project();
        project.add_file(Path::new("docs/readme.md"), Some("Docs"));

        assert_eq!(project.groups.len(), 1);
        assert_eq!(project.groups[0].name, "Docs");
        assert_eq!(project.groups[0].files[0].path, "docs/readme.md");
    }

    #[test]
    fn keeps_input_order_within_group() {
        let mut project = empty_project();
        project.add_file(Path::new("src/a.c"), None);
        project.add_file(Path::new("src/b.c"), None);

        let paths: Vec<&str> = project.groups[0]
            .files
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(paths, vec!["src/a.c", "src/b.c"]);
    }

    #[test]
    fn duplicate_paths_produce_separate_entries() {
        let mut project = empty_project();
        project.add_file(Path::new("src/a.c"), None);
        project.add_file(Path::new("src/a.c"), None);

        assert_eq!(project.groups[0].files.len(), 2);
        assert_eq!(project.groups[0].files[0], project.groups[0].files[1]);
    }

    #[test]
    fn absent_default_group_falls_back_to_sources() {
        let project: Project =
            serde_json::from_str("{\"name\":\"demo\",\"version\":\"1\"}").unwrap();
        assert_eq!(project.default_group, DEFAULT_GROUP);
        assert!(project.groups.is_empty());
    }

    #[test]
    fn rejects_empty_name() {
        let mut project = empty_project();
        project.name = String::new();

        let err = project.validate().expect_err("project should be invalid");
        assert!(matches!(err, ProjectValidationError::MissingField(field) if field == "name"));
    }

    #[test]
    fn rejects_duplicate_groups() {
        let mut project = empty_project();
        project.groups.push(Group {
            name: "Docs".to_string(),
            files: Vec::new(),
        });
        project.groups.push(Group {
            name: "Docs".to_string(),
            files: Vec::new(),
        });

        let err = project.validate().expect_err("project should be invalid");
        assert!(matches!(err, ProjectValidationError::DuplicateGroup(name) if name == "Docs"));
    }
}
