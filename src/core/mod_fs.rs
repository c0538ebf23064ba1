use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModDescriptor;
use crate::models::paths::ManifestPaths;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::{Map, Value};
use walkdir::WalkDir;

// Characters rejected in a file name by at least one supported filesystem.
const INVALID_FILE_NAME_CHARS: &[char] = &['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

/// Which manifest variant a directory carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestState {
    Enabled(Utf8PathBuf),
    Disabled(Utf8PathBuf),
    Missing,
}

// Field names are matched after lower-casing every key of the document.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawManifest {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedfileid")]
    published_file_id: Option<PublishedFileId>,
    tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PublishedFileId {
    Number(i64),
    Text(String),
}

pub struct ModFS;

impl ModFS {
    /// Reads and parses a manifest file.
    pub fn read_manifest(path: &Utf8Path) -> Result<ModDescriptor, SError> {
        let text = std::fs::read_to_string(path).at(path)?;
        Self::parse_manifest(&text, path)
    }

    /// Parses manifest text. `path` is only used to label errors.
    pub fn parse_manifest(text: &str, path: &Utf8Path) -> Result<ModDescriptor, SError> {
        let invalid = |reason: &str| SError::ManifestInvalid {
            path: path.to_owned(),
            reason: reason.to_string(),
        };

        let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))
            .map_err(|source| SError::ManifestParse {
                path: path.to_owned(),
                source,
            })?;

        let Value::Object(fields) = value else {
            return Err(invalid("expected a JSON object"));
        };

        let folded: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        let raw: RawManifest =
            serde_json::from_value(Value::Object(folded)).map_err(|source| {
                SError::ManifestParse {
                    path: path.to_owned(),
                    source,
                }
            })?;

        let published_file_id = match raw.published_file_id {
            None => None,
            Some(PublishedFileId::Number(id)) => Some(id),
            Some(PublishedFileId::Text(text)) => Some(
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| invalid("publishedFileId is not a 64-bit integer"))?,
            ),
        };

        Ok(ModDescriptor::new(
            raw.title.unwrap_or_default(),
            raw.description.unwrap_or_default(),
            published_file_id,
            raw.tags.unwrap_or_default(),
        ))
    }

    /// Finds the manifest of a mod directory. `info.json` wins when both exist.
    pub fn locate_manifest(mod_root: &Utf8Path) -> ManifestState {
        let paths = ManifestPaths::new(mod_root);
        if paths.enabled.is_file() {
            ManifestState::Enabled(paths.enabled)
        } else if paths.disabled.is_file() {
            ManifestState::Disabled(paths.disabled)
        } else {
            ManifestState::Missing
        }
    }

    /// Every file below `base`, relative to it, in a stable order.
    pub fn collect_files(base: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(base).sort_by_file_name() {
            let entry = entry.at(base)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8Path::from_path(entry.path()).ok_or_else(|| SError::NonUtf8Path {
                path: entry.path().to_string_lossy().into_owned(),
            })?;
            if let Ok(rel) = path.strip_prefix(base) {
                files.push(rel.to_path_buf());
            }
        }
        Ok(files)
    }

    /// Turns a mod title into a folder name: whitespace is dropped and
    /// characters no filesystem accepts become `_`.
    pub fn sanitize_folder_name(title: &str) -> String {
        title
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                if (c as u32) < 32 || INVALID_FILE_NAME_CHARS.contains(&c) {
                    '_'
                } else {
                    c
                }
            })
            .collect()
    }
}
