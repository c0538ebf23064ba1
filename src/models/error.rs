use camino::{Utf8Path, Utf8PathBuf};
use derive_more::{Display, Error};

/// Coarse classification of [`SError`], stable enough for callers to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    NotFound,
    InvalidManifest,
    StateConflict,
    Collision,
    SecurityViolation,
    IoFailure,
}

#[derive(Debug, Display, Error)]
pub enum SError {
    #[display("'{path}' does not exist")]
    NotFound { path: Utf8PathBuf },

    #[display("'{path}' is not a mod: it lacks an info.json file")]
    ManifestMissing { path: Utf8PathBuf },

    #[display("manifest '{path}' is not valid: {source}")]
    ManifestParse {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },

    #[display("manifest '{path}' is not valid: {reason}")]
    ManifestInvalid { path: Utf8PathBuf, reason: String },

    #[display("cannot find info.json in the archive. Is this not a mod?")]
    ArchiveWithoutManifest,

    #[display("'{folder}' is already enabled")]
    AlreadyEnabled { folder: String },

    #[display("'{folder}' is already disabled")]
    AlreadyDisabled { folder: String },

    #[display("'{folder}' is in an inconsistent state: {detail}")]
    InconsistentState { folder: String, detail: &'static str },

    #[display("unable to create mod directory because '{path}' exists and is a file. This is almost certainly a mistake, and the file should be deleted")]
    OccupiedByFile { path: Utf8PathBuf },

    #[display("a mod with folder '{folder}' already exists. If overwriting is intended, delete the mod first")]
    AlreadyInstalled { folder: String },

    #[display("'{path}' already exists and will not be overwritten")]
    FileExists { path: Utf8PathBuf },

    #[display("archive entry '{entry}' would be extracted outside of the mods folder")]
    PathTraversal { entry: String },

    #[display("'{path}' is not inside the mods folder")]
    OutsideStorageRoot { path: Utf8PathBuf },

    #[display("data is not a valid zip file: {source}")]
    InvalidArchive { source: zip::result::ZipError },

    #[display("archive operation failed: {source}")]
    Archive { source: zip::result::ZipError },

    #[display("I/O error at '{path}': {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[display("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    #[display("unable to write JSON output: {source}")]
    Json { source: serde_json::Error },

    #[display("configuration error: {source}")]
    Config { source: confy::ConfyError },
}

impl SError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SError::NotFound { .. } => ErrorKind::NotFound,
            SError::ManifestMissing { .. }
            | SError::ManifestParse { .. }
            | SError::ManifestInvalid { .. }
            | SError::ArchiveWithoutManifest => ErrorKind::InvalidManifest,
            SError::AlreadyEnabled { .. }
            | SError::AlreadyDisabled { .. }
            | SError::InconsistentState { .. } => ErrorKind::StateConflict,
            SError::OccupiedByFile { .. }
            | SError::AlreadyInstalled { .. }
            | SError::FileExists { .. } => ErrorKind::Collision,
            SError::PathTraversal { .. } | SError::OutsideStorageRoot { .. } => {
                ErrorKind::SecurityViolation
            }
            SError::InvalidArchive { .. }
            | SError::Archive { .. }
            | SError::Io { .. }
            | SError::NonUtf8Path { .. }
            | SError::Json { .. }
            | SError::Config { .. } => ErrorKind::IoFailure,
        }
    }

    pub fn io(path: impl AsRef<Utf8Path>, source: std::io::Error) -> Self {
        SError::Io {
            path: path.as_ref().to_owned(),
            source,
        }
    }
}

impl From<zip::result::ZipError> for SError {
    fn from(source: zip::result::ZipError) -> Self {
        SError::Archive { source }
    }
}

impl From<confy::ConfyError> for SError {
    fn from(source: confy::ConfyError) -> Self {
        SError::Config { source }
    }
}

/// Attaches the path being worked on to an `std::io::Error`.
pub trait IoContext<T> {
    fn at(self, path: impl AsRef<Utf8Path>) -> Result<T, SError>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl AsRef<Utf8Path>) -> Result<T, SError> {
        self.map_err(|e| SError::io(path, e))
    }
}

impl<T> IoContext<T> for Result<T, walkdir::Error> {
    fn at(self, path: impl AsRef<Utf8Path>) -> Result<T, SError> {
        self.map_err(|e| {
            let path = e
                .path()
                .and_then(Utf8Path::from_path)
                .map(Utf8Path::to_owned)
                .unwrap_or_else(|| path.as_ref().to_owned());
            SError::Io {
                path,
                source: e.into(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_error_keeps_its_cause() {
        let source = serde_json::from_str::<u8>("not json").unwrap_err();
        let err = SError::Json { source };

        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("unable to write JSON output"));
    }
}
