//! Key-value persistence of the model as JSON documents.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::FitTrackError;
use crate::model::FitnessState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Workouts,
    CompletedWorkouts,
    BodyMetrics,
    PersonalRecords,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Workouts,
        StorageKey::CompletedWorkouts,
        StorageKey::BodyMetrics,
        StorageKey::PersonalRecords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Workouts => "workouts",
            StorageKey::CompletedWorkouts => "completedWorkouts",
            StorageKey::BodyMetrics => "bodyMetrics",
            StorageKey::PersonalRecords => "personalRecords",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait StateStore: Send + Sync + 'static {
    /// `Ok(None)` when nothing was ever stored under `key`.
    async fn load(&self, key: StorageKey) -> Result<Option<Value>, FitTrackError>;
    async fn save(&self, key: StorageKey, value: &Value) -> Result<(), FitTrackError>;
    /// Removing an absent key is not an error.
    async fn remove(&self, key: StorageKey) -> Result<(), FitTrackError>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self, key: StorageKey) -> Result<Option<Value>, FitTrackError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn save(&self, key: StorageKey, value: &Value) -> Result<(), FitTrackError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::trace!(key = %key, path = %path.display(), "saved");
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), FitTrackError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StorageKey, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self, key: StorageKey) -> Result<Option<Value>, FitTrackError> {
        Ok(self.entries.lock().await.get(&key).cloned())
    }

    async fn save(&self, key: StorageKey, value: &Value) -> Result<(), FitTrackError> {
        self.entries.lock().await.insert(key, value.clone());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), FitTrackError> {
        self.entries.lock().await.remove(&key);
        Ok(())
    }
}

async fn load_typed<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: StorageKey,
) -> Result<Option<T>, FitTrackError> {
    match store.load(key).await? {
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
        None => Ok(None),
    }
}

/// Read the model. `Ok(None)` when no key is present at all, so the caller
/// can decide whether to seed. Keys missing next to present ones load empty.
pub async fn load_state(store: &dyn StateStore) -> Result<Option<FitnessState>, FitTrackError> {
    let workouts = load_typed(store, StorageKey::Workouts).await?;
    let completed = load_typed(store, StorageKey::CompletedWorkouts).await?;
    let metrics = load_typed(store, StorageKey::BodyMetrics).await?;
    let records = load_typed(store, StorageKey::PersonalRecords).await?;

    if workouts.is_none() && completed.is_none() && metrics.is_none() && records.is_none() {
        return Ok(None);
    }
    Ok(Some(FitnessState {
        workouts: workouts.unwrap_or_default(),
        completed_workouts: completed.unwrap_or_default(),
        body_metrics: metrics.unwrap_or_default(),
        personal_records: records.unwrap_or_default(),
    }))
}

fn to_value<T: Serialize>(v: &T) -> Result<Value, FitTrackError> {
    Ok(serde_json::to_value(v)?)
}

/// Write all four keys. Every key is attempted; the failures are returned
/// together instead of stopping at the first one.
pub async fn save_state(
    store: &dyn StateStore,
    state: &FitnessState,
) -> Vec<(StorageKey, FitTrackError)> {
    let documents = [
        (StorageKey::Workouts, to_value(&state.workouts)),
        (StorageKey::CompletedWorkouts, to_value(&state.completed_workouts)),
        (StorageKey::BodyMetrics, to_value(&state.body_metrics)),
        (StorageKey::PersonalRecords, to_value(&state.personal_records)),
    ];
    let mut failures = Vec::new();
    for (key, doc) in documents {
        let res = match doc {
            Ok(v) => store.save(key, &v).await,
            Err(e) => Err(e),
        };
        if let Err(e) = res {
            failures.push((key, e));
        }
    }
    failures
}

/// Remove all four keys. Like [`save_state`], every key is attempted and the
/// failures are returned together.
pub async fn clear_state(store: &dyn StateStore) -> Vec<(StorageKey, FitTrackError)> {
    let mut failures = Vec::new();
    for key in StorageKey::ALL {
        if let Err(e) = store.remove(key).await {
            failures.push((key, e));
        }
    }
    failures
}
