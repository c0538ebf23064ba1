use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

/// Metadata read from a mod's `info.json`. Immutable once parsed.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModDescriptor {
    title: String,
    description: String,
    published_file_id: Option<i64>,
    tags: Vec<String>,
}

impl ModDescriptor {
    pub fn new(
        title: String,
        description: String,
        published_file_id: Option<i64>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title,
            description,
            published_file_id,
            tags,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn published_file_id(&self) -> Option<i64> {
        self.published_file_id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A mod discovered under the storage root.
///
/// `enabled` mirrors which manifest filename was present when the record was
/// built; only the toggler changes it, right after the rename it performed.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModRecord {
    descriptor: ModDescriptor,
    directory: Utf8PathBuf,
    enabled: bool,
}

impl ModRecord {
    pub fn new(descriptor: ModDescriptor, directory: Utf8PathBuf, enabled: bool) -> Self {
        Self {
            descriptor,
            directory,
            enabled,
        }
    }

    pub fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    pub fn title(&self) -> &str {
        self.descriptor.title()
    }

    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Name of the mod's own directory, which is also its top-level archive folder.
    pub fn folder_name(&self) -> &str {
        self.directory.file_name().unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
