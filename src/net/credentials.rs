//! Where the access token comes from.
//!
//! The fetch path only asks a [`CredentialProvider`] for a token. Reading the
//! persisted token, prompting for a new one and caching the answer are the
//! provider's business.

use std::fs;
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{SkylineError, SkylineResult};

/// Storage key of the persisted token.
pub const TOKEN_KEY: &str = "github_token";

pub const TOKEN_PROMPT: &str = "Enter your GitHub personal access token (only needed once):";

pub trait CredentialProvider: Send + Sync {
    /// `Ok(None)` means no token could be obtained.
    fn token(&self) -> SkylineResult<Option<String>>;

    /// Forget a token the server rejected, so the next call obtains a new one.
    fn invalidate(&self) -> SkylineResult<()> {
        Ok(())
    }
}

/// Persisted token storage.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> SkylineResult<Option<String>>;
    fn save(&self, token: &str) -> SkylineResult<()>;
    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> SkylineResult<()>;
}

/// Interactive source of a token. Returns `None` if the user declines.
pub trait TokenPrompt: Send + Sync {
    fn prompt(&self, message: &str) -> Option<String>;
}

impl<F> TokenPrompt for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn prompt(&self, message: &str) -> Option<String> {
        self(message)
    }
}

/// A pending question for whoever owns the UI thread.
pub struct PromptRequest {
    pub message: String,
    reply: mpsc::Sender<Option<String>>,
}

impl PromptRequest {
    pub fn answer(self, token: Option<String>) {
        let _ = self.reply.send(token);
    }
}

/// Prompt that forwards the question over a channel and blocks until it is
/// answered. Dropping the request unanswered counts as declining.
pub struct ChannelPrompt {
    requests: mpsc::Sender<PromptRequest>,
}

pub fn channel_prompt() -> (ChannelPrompt, mpsc::Receiver<PromptRequest>) {
    let (tx, rx) = mpsc::channel();
    (ChannelPrompt { requests: tx }, rx)
}

impl TokenPrompt for ChannelPrompt {
    fn prompt(&self, message: &str) -> Option<String> {
        let (reply, answer) = mpsc::channel();
        self.requests
            .send(PromptRequest {
                message: message.to_string(),
                reply,
            })
            .ok()?;
        answer.recv().ok().flatten()
    }
}

/// A token known up front (env var, tests).
pub struct StaticToken(pub Option<String>);

impl CredentialProvider for StaticToken {
    fn token(&self) -> SkylineResult<Option<String>> {
        Ok(self.0.clone().filter(|t| !t.trim().is_empty()))
    }
}

/// Stored token, or prompt and store the answer.
pub struct PromptingProvider<S, P> {
    store: S,
    prompt: P,
}

impl<S: TokenStore, P: TokenPrompt> PromptingProvider<S, P> {
    pub fn new(store: S, prompt: P) -> Self {
        Self { store, prompt }
    }
}

impl<S: TokenStore, P: TokenPrompt> CredentialProvider for PromptingProvider<S, P> {
    fn token(&self) -> SkylineResult<Option<String>> {
        if let Some(token) = self.store.load()? {
            return Ok(Some(token));
        }

        let answer = self
            .prompt
            .prompt(TOKEN_PROMPT)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(ref token) = answer {
            self.store.save(token)?;
            log::debug!("Stored new access token");
        }
        Ok(answer)
    }

    fn invalidate(&self) -> SkylineResult<()> {
        self.store.clear()?;
        log::debug!("Cleared rejected access token");
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// JSON file under the platform config directory.
pub struct FsTokenStore {
    path: PathBuf,
}

impl FsTokenStore {
    /// Store at `<config dir>/github_token.json`.
    pub fn new() -> SkylineResult<Self> {
        let proj = ProjectDirs::from("dev", "contrib-skyline", "contrib-skyline")
            .ok_or_else(|| SkylineError::storage("could not resolve config dir"))?;
        Ok(Self::in_dir(proj.config_dir().to_path_buf()))
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            path: dir.join(format!("{}.json", TOKEN_KEY)),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FsTokenStore {
    fn load(&self) -> SkylineResult<Option<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredToken = serde_json::from_slice(&bytes)
            .map_err(|e| SkylineError::storage(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(stored.token).filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> SkylineResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&StoredToken {
            token: token.to_string(),
        })
        .map_err(|e| SkylineError::storage(e.to_string()))?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn clear(&self) -> SkylineResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local store.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> SkylineResult<Option<String>> {
        Ok(self.get())
    }

    fn save(&self, token: &str) -> SkylineResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| SkylineError::storage("token store poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> SkylineResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| SkylineError::storage("token store poisoned"))?;
        *guard = None;
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    fn load(&self) -> SkylineResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, token: &str) -> SkylineResult<()> {
        (**self).save(token)
    }

    fn clear(&self) -> SkylineResult<()> {
        (**self).clear()
    }
}
