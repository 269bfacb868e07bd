//! Serialized JSON documents on disk.
//!
//! Every mutation is a full read-modify-write under a per-collection
//! `tokio::sync::Mutex`, persisted by writing a sibling temp file and
//! renaming it over the target. Atomic per collection file,
//! last-writer-wins across processes.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use reserva_domain::{ReservaError, Result};
use tokio::sync::Mutex;

use crate::errors::InfraError;

/// One collection, one file.
pub(crate) struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path, lock: Mutex::new(()), _marker: PhantomData }
    }

    /// Read the whole collection. A missing file is an empty collection.
    pub(crate) async fn read(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        load(&self.path).await
    }

    /// Read-modify-write the collection under the lock.
    pub(crate) async fn update<R, F>(&self, apply: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut items = load(&self.path).await?;
        let out = apply(&mut items)?;
        persist(&self.path, &items).await?;
        Ok(out)
    }
}

/// Per-key collections under one directory (one file per store).
pub(crate) struct JsonDirectory<T> {
    dir: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDirectory<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir, lock: Mutex::new(()), _marker: PhantomData }
    }

    fn file_for(&self, key: &str) -> Result<PathBuf> {
        // Keys become file names; reject anything that could escape the dir.
        if key.is_empty()
            || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ReservaError::Validation(format!("invalid collection key: {key}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    pub(crate) async fn read(&self, key: &str) -> Result<Vec<T>> {
        let path = self.file_for(key)?;
        let _guard = self.lock.lock().await;
        load(&path).await
    }

    pub(crate) async fn update<R, F>(&self, key: &str, apply: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send,
    {
        let path = self.file_for(key)?;
        let _guard = self.lock.lock().await;
        let mut items = load(&path).await?;
        let out = apply(&mut items)?;
        persist(&path, &items).await?;
        Ok(out)
    }
}

async fn load<T>(path: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            let infra: InfraError = err.into();
            return Err(infra.into());
        }
    };
    serde_json::from_slice(&bytes).map_err(|err| {
        let infra: InfraError = err.into();
        infra.into()
    })
}

async fn persist<T>(path: &Path, items: &[T]) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
    }

    let bytes = serde_json::to_vec_pretty(items).map_err(InfraError::from)?;

    // Write a sibling temp file and rename it over the target so a crash
    // mid-write never leaves a truncated document behind.
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await.map_err(InfraError::from)?;
    tokio::fs::rename(&tmp, path).await.map_err(InfraError::from)?;
    Ok(())
}
