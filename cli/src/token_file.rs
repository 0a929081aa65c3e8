//! File-backed token persistence for the CLI.

#[cfg(test)]
#[path = "token_file_test.rs"]
mod token_file_test;

use std::io::{self, Write};
use std::path::PathBuf;

use auth::TokenStore;

/// Default token file, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".studio-token";

/// Keeps the bearer token in a single file, one line.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_owned())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token file unreadable");
                None
            }
        }
    }

    fn save(&mut self, token: &str) {
        if let Err(e) = write_private(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "token file write failed");
        }
    }

    fn clear(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "token file removal failed"),
        }
    }
}

/// Write `token` readable by the owner only.
#[cfg(unix)]
fn write_private(path: &std::path::Path, token: &str) -> io::Result<()> {
    use std::fs::{OpenOptions, Permissions};
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(Permissions::from_mode(0o600))?;
    file.write_all(format!("{token}\n").as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &std::path::Path, token: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(format!("{token}\n").as_bytes())
}
