//! Saving the scene to storage on change and restoring it on mount.

use crate::scene::{Scene, SceneEvent};
use crate::shapes::Shape;
use crate::storage::{Storage, StorageError, StorageResult};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Storage key used unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "canvas";

/// Snapshot decoding errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Serialized form of a scene: drawables in z-order plus pan/zoom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub objects: Vec<Shape>,
    #[serde(default)]
    pub viewport: Viewport,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl SceneSnapshot {
    /// Capture the current state of a scene.
    pub fn capture(scene: &Scene) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            objects: scene.objects().cloned().collect(),
            viewport: scene.viewport.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot, rejecting versions newer than this build understands.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    /// Rebuild the scene. No change events are recorded.
    pub fn into_scene(self) -> Scene {
        Scene::from_shapes(self.objects, self.viewport)
    }
}

/// Receives scene change notifications.
///
/// The editor drains the scene's events after each input and delivers them
/// here synchronously, before the next input is processed.
pub trait SceneSubscriber {
    fn on_scene_changed(&mut self, scene: &Scene, events: &[SceneEvent]);
}

/// Load the scene stored under `key`.
///
/// A missing key yields an empty scene; so does an unreadable or malformed
/// snapshot, after a warning. A restored scene has a render pending.
pub fn restore<S: Storage + ?Sized>(storage: &S, key: &str) -> Scene {
    let json = match storage.read(key) {
        Ok(json) => json,
        Err(StorageError::NotFound(_)) => {
            log::info!("No saved scene under {key:?}, starting empty");
            return Scene::new();
        }
        Err(e) => {
            log::warn!("Could not read saved scene: {e}");
            return Scene::new();
        }
    };

    match SceneSnapshot::from_json(&json) {
        Ok(snapshot) => {
            let mut scene = snapshot.into_scene();
            log::info!("Restored {} drawable(s) from {key:?}", scene.len());
            scene.request_render();
            scene
        }
        Err(e) => {
            log::warn!("Ignoring saved scene under {key:?}: {e}");
            Scene::new()
        }
    }
}

/// Writes the whole scene to storage whenever it changes.
#[derive(Debug)]
pub struct PersistenceBridge<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> PersistenceBridge<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the scene this bridge persists.
    pub fn restore(&self) -> Scene {
        restore(&self.storage, &self.key)
    }

    /// Serialize the scene and write it under the bridge's key.
    pub fn save(&self, scene: &Scene) -> StorageResult<()> {
        let json = SceneSnapshot::capture(scene)
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.write(&self.key, &json)
    }
}

impl<S: Storage> SceneSubscriber for PersistenceBridge<S> {
    fn on_scene_changed(&mut self, scene: &Scene, events: &[SceneEvent]) {
        if events.is_empty() {
            return;
        }
        match self.save(scene) {
            Ok(()) => log::debug!("Saved {} drawable(s) after {} change(s)", scene.len(), events.len()),
            // The in-memory scene stays authoritative; the next change retries.
            Err(e) => log::error!("Failed to save scene: {e}"),
        }
    }
}
