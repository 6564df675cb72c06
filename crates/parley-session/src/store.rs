use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::secret::Secret;

/// Pluggable access-token storage.
///
/// The API client reads the token before every outgoing request and clears
/// it when the server reports the credential invalid. Implementations must
/// treat their own failures as an absent token: credential lookup never
/// fails a request on its own.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<Secret>;
    fn set(&self, token: Secret);
    fn clear(&self);
}

/// In-memory token storage for native hosts and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<Secret>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(Secret::new(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Secret> {
        self.token
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().cloned())
    }

    fn set(&self, token: Secret) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

/// File-backed token storage: one token per file, read on every lookup so
/// that external writers (a login flow, another process) are picked up
/// without restarting.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Secret> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(Secret::new(token))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("token file {} unreadable: {e}", self.path.display());
                None
            }
        }
    }

    fn set(&self, token: Secret) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("token directory {} not created: {e}", parent.display());
            return;
        }
        if let Err(e) = std::fs::write(&self.path, token.expose()) {
            tracing::warn!("token file {} not written: {e}", self.path.display());
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("token file {} not removed: {e}", self.path.display()),
        }
    }
}
