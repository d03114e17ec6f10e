//! Owner of the active scene.

use crate::scene::Scene;

/// Single-owner registry for the editor's scene.
///
/// Empty until the editor mounts and again after it unmounts. Every caller
/// handles the empty case; actions against an absent scene do nothing.
#[derive(Debug, Default)]
pub struct SceneStore {
    scene: Option<Scene>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a scene, returning the one it replaces.
    pub fn set_scene(&mut self, scene: Scene) -> Option<Scene> {
        self.scene.replace(scene)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Remove the scene, leaving the store empty.
    pub fn take(&mut self) -> Option<Scene> {
        self.scene.take()
    }

    pub fn is_ready(&self) -> bool {
        self.scene.is_some()
    }
}
