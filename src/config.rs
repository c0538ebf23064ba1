use crate::models::error::SError;
use crate::models::paths::StorageVendorPath;
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "cvmods";
const CONFIG_NAME: &str = "config";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    pub version: u8,
    /// Overrides the platform mods folder.
    pub storage_root: Option<Utf8PathBuf>,
    /// Where packed archives go. Defaults to the working directory.
    pub pack_output_dir: Option<Utf8PathBuf>,
    /// Enables a daily rolling log file in this directory.
    pub log_dir: Option<Utf8PathBuf>,
    pub verbose: bool,
}

impl AppSettings {
    pub fn load() -> Result<AppSettings, SError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    pub fn save(&self) -> Result<(), SError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Utf8Path) -> Result<AppSettings, SError> {
        Ok(confy::load_path(path)?)
    }

    pub fn save_to(&self, path: &Utf8Path) -> Result<(), SError> {
        Ok(confy::store_path(path, self)?)
    }

    pub fn config_path() -> Result<Utf8PathBuf, SError> {
        let path = confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?;
        utf8(path)
    }

    /// The mods folder: the configured override, or the game's folder under
    /// the user's local data directory.
    pub fn resolve_storage_root(&self) -> Result<Utf8PathBuf, SError> {
        let root = match &self.storage_root {
            Some(root) => root.clone(),
            None => {
                let dirs = BaseDirs::new().ok_or_else(|| SError::NotFound {
                    path: Utf8PathBuf::from("~"),
                })?;
                StorageVendorPath::new(&utf8(dirs.data_local_dir().to_path_buf())?).mods
            }
        };
        Ok(absolute(&root))
    }

    pub fn resolve_pack_output_dir(&self) -> Result<Utf8PathBuf, SError> {
        match &self.pack_output_dir {
            Some(dir) => Ok(absolute(dir)),
            None => {
                let cwd = std::env::current_dir().map_err(|e| SError::io(".", e))?;
                utf8(cwd)
            }
        }
    }
}

fn utf8(path: std::path::PathBuf) -> Result<Utf8PathBuf, SError> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| SError::NonUtf8Path {
        path: p.to_string_lossy().into_owned(),
    })
}

// Existing paths are canonicalized without the `\\?\` prefix; others are left as given.
pub(crate) fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    dunce::canonicalize(path)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| path.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_root_override_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let settings = AppSettings {
            storage_root: Some(root.clone()),
            ..Default::default()
        };

        let resolved = settings.resolve_storage_root().unwrap();
        assert!(resolved.ends_with(root.file_name().unwrap()));
    }

    #[test]
    fn test_saved_override_is_loaded_back() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let file = base.join("config.toml");
        let settings = AppSettings {
            storage_root: Some(base.join("mods")),
            verbose: true,
            ..Default::default()
        };

        settings.save_to(&file).unwrap();

        assert!(file.is_file());
        assert_eq!(AppSettings::load_from(&file).unwrap(), settings);
    }

    #[test]
    fn test_missing_settings_fields_default() {
        let settings: AppSettings = serde_json::from_str(r#"{"verbose": true}"#).unwrap();
        assert!(settings.verbose);
        assert_eq!(settings.storage_root, None);
    }
}
