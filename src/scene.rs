//! Scene adapter
//!
//! The simulation never renders. It adds and removes drawable objects and
//! asks for a draw after each mutation; whatever sits behind [`Scene`]
//! (a GPU renderer, a terminal view, a test recorder) does the rest.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::camera::Camera;
use crate::sim::state::{JumpActor, Platform};

/// Identity of a drawable in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectId {
    Platform(u32),
    Actor(u32),
    Light(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
}

/// Anything the game puts into the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneObject {
    Platform { platform: Platform, color: u32 },
    Actor { actor: JumpActor, size: Vec3, color: u32 },
    Light(Light),
}

/// Drawable collection plus a draw call
pub trait Scene {
    fn add(&mut self, id: ObjectId, object: SceneObject);

    fn remove(&mut self, id: ObjectId);

    /// Draw the scene from `camera`. The actor moves every tick, so its
    /// current transform is passed along rather than re-added.
    fn draw(&mut self, camera: &Camera, actor: &JumpActor);
}

/// In-memory scene that records what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct SceneLog {
    pub objects: BTreeMap<ObjectId, SceneObject>,
    pub draws: u64,
    pub last_camera: Option<Camera>,
    pub last_actor: Option<JumpActor>,
}

impl SceneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform_count(&self) -> usize {
        self.objects
            .keys()
            .filter(|id| matches!(id, ObjectId::Platform(_)))
            .count()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }
}

impl Scene for SceneLog {
    fn add(&mut self, id: ObjectId, object: SceneObject) {
        self.objects.insert(id, object);
    }

    fn remove(&mut self, id: ObjectId) {
        if self.objects.remove(&id).is_none() {
            log::warn!("remove of unknown scene object {:?}", id);
        }
    }

    fn draw(&mut self, camera: &Camera, actor: &JumpActor) {
        self.draws += 1;
        self.last_camera = Some(*camera);
        self.last_actor = Some(*actor);
    }
}
