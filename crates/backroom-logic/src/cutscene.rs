//! Linear cutscene playback.
//!
//! A cutscene is a playlist of scenes. Each scene shows a background, a few
//! positioned overlay images and lines of text. A scene ends after its
//! duration, or earlier when the player steps past its last line of text.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// An overlay image placed on a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneImage {
    pub path: String,
    pub position: Vec2,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub background: String,
    #[serde(default)]
    pub images: Vec<SceneImage>,
    #[serde(default)]
    pub text: Vec<String>,
    /// Seconds before the scene advances on its own
    pub duration: f32,
}

impl Scene {
    pub fn new(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            images: Vec::new(),
            text: Vec::new(),
            duration: 0.0,
        }
    }

    pub fn with_image(mut self, path: impl Into<String>, position: Vec2, scale: f32) -> Self {
        self.images.push(SceneImage {
            path: path.into(),
            position,
            scale,
        });
        self
    }

    pub fn with_text(mut self, line: impl Into<String>) -> Self {
        self.text.push(line.into());
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Every asset path this scene needs loaded.
    pub fn asset_paths(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.background.as_str()).chain(self.images.iter().map(|i| i.path.as_str()))
    }
}

/// A named playlist of scenes as stored in `data/cutscenes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutsceneScript {
    pub name: String,
    pub scenes: Vec<Scene>,
}

impl CutsceneScript {
    /// Deduplicated asset paths across all scenes, in first-use order.
    pub fn asset_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for path in self.scenes.iter().flat_map(|s| s.asset_paths()) {
            if !paths.iter().any(|p| p == path) {
                paths.push(path.to_string());
            }
        }
        paths
    }
}

/// What changed after driving the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutsceneStep {
    /// Still on the same scene and line
    Unchanged,
    /// Moved to the next line of text
    NextLine,
    /// Moved to the scene at this index
    NextScene(usize),
    /// Playlist finished
    Ended,
}

/// Plays a cutscene script scene by scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutscenePlayer {
    script: CutsceneScript,
    scene_index: usize,
    line_index: usize,
    scene_elapsed: f32,
    finished: bool,
}

impl CutscenePlayer {
    pub fn new(script: CutsceneScript) -> Self {
        let finished = script.scenes.is_empty();
        Self {
            script,
            scene_index: 0,
            line_index: 0,
            scene_elapsed: 0.0,
            finished,
        }
    }

    pub fn name(&self) -> &str {
        &self.script.name
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        if self.finished {
            return None;
        }
        self.script.scenes.get(self.scene_index)
    }

    pub fn scene_index(&self) -> usize {
        self.scene_index
    }

    pub fn scene_count(&self) -> usize {
        self.script.scenes.len()
    }

    /// Text line currently on screen.
    pub fn current_line(&self) -> Option<&str> {
        self.current_scene()?.text.get(self.line_index).map(String::as_str)
    }

    /// Advance the scene clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> CutsceneStep {
        let Some(scene) = self.current_scene() else {
            return CutsceneStep::Unchanged;
        };
        let duration = scene.duration;
        self.scene_elapsed += dt.max(0.0);
        if duration > 0.0 && self.scene_elapsed >= duration {
            return self.next_scene();
        }
        CutsceneStep::Unchanged
    }

    /// Show the next text line, moving on to the next scene after the last one.
    pub fn advance_text(&mut self) -> CutsceneStep {
        let Some(scene) = self.current_scene() else {
            return CutsceneStep::Unchanged;
        };
        if self.line_index + 1 < scene.text.len() {
            self.line_index += 1;
            return CutsceneStep::NextLine;
        }
        self.next_scene()
    }

    pub fn next_scene(&mut self) -> CutsceneStep {
        if self.finished {
            return CutsceneStep::Unchanged;
        }
        self.scene_index += 1;
        self.line_index = 0;
        self.scene_elapsed = 0.0;
        if self.scene_index >= self.script.scenes.len() {
            self.finished = true;
            return CutsceneStep::Ended;
        }
        CutsceneStep::NextScene(self.scene_index)
    }

    /// Jump straight to the end.
    pub fn skip(&mut self) -> CutsceneStep {
        if self.finished {
            return CutsceneStep::Unchanged;
        }
        self.finished = true;
        self.scene_index = self.script.scenes.len();
        CutsceneStep::Ended
    }
}
