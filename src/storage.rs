use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Environment variable holding a GitHub token; takes precedence over storage.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Where a token lives between runs.
pub trait TokenStorage {
    /// `Ok(None)` when nothing usable is stored.
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    /// Removing an absent token succeeds.
    fn delete(&self) -> Result<()>;
}

/// Token kept in `~/.issues2markdown/token`.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .context("HOME environment variable not set")?;
        Ok(Self::with_path(
            home.join(crate::config::PROJECT_CONFIG_DIR).join("token"),
        ))
    }

    pub fn with_path(path: PathBuf) -> Self {
        FileTokenStorage { path }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", self.path.display())),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        let dir = self
            .path
            .parent()
            .with_context(|| format!("{} has no parent directory", self.path.display()))?;
        fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        fs::write(&self.path, token.trim())
            .with_context(|| format!("Cannot write {}", self.path.display()))
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                Err(e).with_context(|| format!("Cannot remove {}", self.path.display()))
            }
            _ => Ok(()),
        }
    }
}

/// Picks the token from the environment value if set and non-empty, else from storage.
pub fn resolve_token(
    env_token: Option<String>,
    storage: &dyn TokenStorage,
) -> Result<Option<String>> {
    match env_token.map(|t| t.trim().to_string()) {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => storage.load(),
    }
}
