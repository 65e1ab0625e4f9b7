//! Token persistence in a capability-scoped data directory.
//!
//! The token lives in a single file named [`TOKEN_KEY`]. Writes go to a
//! hidden temporary file in the same directory which is then renamed over
//! the target, so a crash never leaves a truncated token behind. Blocking
//! filesystem work runs on the tokio blocking pool.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::AuthToken;
use crate::domain::ports::{TokenStore, TokenStoreError};

/// File name the token is stored under.
pub const TOKEN_KEY: &str = "auth_token";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// [`TokenStore`] writing one file below `root`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    root: Utf8PathBuf,
}

impl FileTokenStore {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the token file.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, TokenStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Utf8Path) -> Result<T, TokenStoreError> + Send + 'static,
    {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || op(&root))
            .await
            .map_err(|err| TokenStoreError::unavailable(format!("storage task failed: {err}")))?
    }
}

fn unavailable(root: &Utf8Path, err: &io::Error) -> TokenStoreError {
    TokenStoreError::unavailable(format!("{root}: {err}"))
}

/// Open `root`, or `None` when it does not exist yet.
fn open_existing(root: &Utf8Path) -> Result<Option<Dir>, TokenStoreError> {
    match Dir::open_ambient_dir(root, ambient_authority()) {
        Ok(dir) => Ok(Some(dir)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(unavailable(root, &err)),
    }
}

fn save_blocking(root: &Utf8Path, token: &AuthToken) -> Result<(), TokenStoreError> {
    Dir::create_ambient_dir_all(root, ambient_authority())
        .map_err(|err| unavailable(root, &err))?;
    let dir =
        Dir::open_ambient_dir(root, ambient_authority()).map_err(|err| unavailable(root, &err))?;

    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{TOKEN_KEY}.tmp.{}.{counter}", std::process::id());
    write_temp(&dir, &tmp_name, token).map_err(|err| unavailable(root, &err))?;
    if let Err(err) = dir.rename(&tmp_name, &dir, TOKEN_KEY) {
        if dir.remove_file(&tmp_name).is_err() {
            debug!(file = %tmp_name, "temporary token file left behind");
        }
        return Err(unavailable(root, &err));
    }
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        debug!(root = %root, "token directory sync skipped");
    }
    Ok(())
}

fn write_temp(dir: &Dir, tmp_name: &str, token: &AuthToken) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    let written = file
        .write_all(token.expose().as_bytes())
        .and_then(|()| file.sync_all());
    if written.is_err() {
        drop(file);
        drop(dir.remove_file(tmp_name));
    }
    written
}

fn get_blocking(root: &Utf8Path) -> Result<Option<AuthToken>, TokenStoreError> {
    let Some(dir) = open_existing(root)? else {
        return Ok(None);
    };
    match dir.read_to_string(TOKEN_KEY) {
        Ok(raw) => AuthToken::new(raw)
            .map(Some)
            .ok_or_else(|| TokenStoreError::corrupt(format!("{root}/{TOKEN_KEY} is empty"))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            Err(TokenStoreError::corrupt(format!("{root}/{TOKEN_KEY}: {err}")))
        }
        Err(err) => Err(unavailable(root, &err)),
    }
}

fn remove_blocking(root: &Utf8Path) -> Result<(), TokenStoreError> {
    let Some(dir) = open_existing(root)? else {
        return Ok(());
    };
    match dir.remove_file(TOKEN_KEY) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(unavailable(root, &err)),
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        let fingerprint = token.fingerprint();
        let token = token.clone();
        self.run_blocking(move |root| save_blocking(root, &token))
            .await?;
        debug!(root = %self.root, token = %fingerprint, "token saved");
        Ok(())
    }

    async fn get(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        self.run_blocking(get_blocking).await
    }

    async fn remove(&self) -> Result<(), TokenStoreError> {
        self.run_blocking(remove_blocking).await
    }
}
