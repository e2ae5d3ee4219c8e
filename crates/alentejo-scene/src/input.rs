//! Keyboard input mapping

use crate::roles::ShadingMode;
use alentejo_core::Vec3;

/// A discrete scene command triggered by a single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    RegenerateGround,
    RegenerateSky,
    ToggleDirectionalLight,
    ToggleSpotLight,
    TogglePointLights,
    SetShading(ShadingMode),
}

impl SceneAction {
    /// Map a key name to its action. Letters are case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "1" => Some(SceneAction::RegenerateGround),
            "2" => Some(SceneAction::RegenerateSky),
            "d" => Some(SceneAction::ToggleDirectionalLight),
            "s" => Some(SceneAction::ToggleSpotLight),
            "p" => Some(SceneAction::TogglePointLights),
            "q" => Some(SceneAction::SetShading(ShadingMode::Gouraud)),
            "w" => Some(SceneAction::SetShading(ShadingMode::Phong)),
            "e" => Some(SceneAction::SetShading(ShadingMode::Toon)),
            "r" => Some(SceneAction::SetShading(ShadingMode::Basic)),
            _ => None,
        }
    }
}

/// Arrow keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Process a key press event. Returns false for keys that are not tracked.
    pub fn process_key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    /// Unit movement direction on the ground plane, or zero when the held
    /// keys cancel out. Up moves towards -Z.
    pub fn direction(&self) -> Vec3 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec3::new(axis(self.left, self.right), 0.0, axis(self.up, self.down)).normalized()
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "ArrowUp" => &mut self.up,
            "ArrowDown" => &mut self.down,
            "ArrowLeft" => &mut self.left,
            "ArrowRight" => &mut self.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }
}
