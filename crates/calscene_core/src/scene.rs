//! Scene index over parsed definitions.
//!
//! The parser does not check that an object's frame exists. [`Scene`]
//! groups the definitions by kind and does those checks once everything
//! is known.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::source::{Definition, FrameDefinition, SceneObjectDefinition};

/// Consistency problems between definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Object '{object}' references unknown frame '{frame}'")]
    UnknownFrame { object: String, frame: String },

    #[error("Frame '{0}' is defined more than once")]
    DuplicateFrame(String),

    #[error("Object '{0}' is defined more than once")]
    DuplicateObject(String),
}

/// Frames and objects of one scene source, each in source order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Frame definitions
    frames: Vec<FrameDefinition>,

    /// Object definitions
    objects: Vec<SceneObjectDefinition>,

    /// Frame name -> index of its first definition
    frame_index: HashMap<String, usize>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a scene from parsed definitions.
    pub fn from_definitions(name: impl Into<String>, definitions: Vec<Definition>) -> Self {
        let mut scene = Self::new(name);
        for definition in definitions {
            match definition {
                Definition::Frame(frame) => scene.add_frame(frame),
                Definition::Object(object) => scene.add_object(object),
            }
        }

        log::debug!(
            "Scene {}: {} frames, {} objects",
            scene.name,
            scene.frame_count(),
            scene.object_count()
        );
        scene
    }

    pub fn add_frame(&mut self, frame: FrameDefinition) {
        let index = self.frames.len();
        self.frame_index.entry(frame.name.clone()).or_insert(index);
        self.frames.push(frame);
    }

    pub fn add_object(&mut self, object: SceneObjectDefinition) {
        self.objects.push(object);
    }

    /// All frames, in insertion order.
    pub fn frames(&self) -> &[FrameDefinition] {
        &self.frames
    }

    /// All objects, in insertion order.
    pub fn objects(&self) -> &[SceneObjectDefinition] {
        &self.objects
    }

    /// Get a frame by name (first definition wins).
    pub fn frame(&self, name: &str) -> Option<&FrameDefinition> {
        self.frame_index.get(name).and_then(|&i| self.frames.get(i))
    }

    /// Get an object by name (first definition wins).
    pub fn object(&self, name: &str) -> Option<&SceneObjectDefinition> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Objects anchored to the named frame.
    pub fn objects_in_frame<'a>(
        &'a self,
        frame: &'a str,
    ) -> impl Iterator<Item = &'a SceneObjectDefinition> + 'a {
        self.objects.iter().filter(move |o| o.frame == frame)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check frame references and name uniqueness. Returns every problem found.
    pub fn validate(&self) -> Vec<SceneError> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for frame in &self.frames {
            if !seen.insert(frame.name.as_str()) {
                errors.push(SceneError::DuplicateFrame(frame.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.name.as_str()) {
                errors.push(SceneError::DuplicateObject(object.name.clone()));
            }
            if !self.frame_index.contains_key(&object.frame) {
                errors.push(SceneError::UnknownFrame {
                    object: object.name.clone(),
                    frame: object.frame.clone(),
                });
            }
        }

        for error in &errors {
            log::warn!("Scene {}: {}", self.name, error);
        }
        errors
    }
}
