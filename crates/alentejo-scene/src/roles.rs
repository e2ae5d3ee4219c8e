//! Semantic mesh roles and shading-mode materials

use alentejo_core::Color;
use serde::{Deserialize, Serialize};

/// What a decorative mesh represents. Drives its color under every shading mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshRole {
    UfoBody,
    UfoCockpit,
    UfoLight,
    UfoSpotLight,
    TreeLeaves,
    TreeTrunk,
    HouseWall,
    HouseRoof,
    HouseWindow,
    HousePole,
    HouseDoor,
}

impl MeshRole {
    pub const ALL: [MeshRole; 11] = [
        MeshRole::UfoBody,
        MeshRole::UfoCockpit,
        MeshRole::UfoLight,
        MeshRole::UfoSpotLight,
        MeshRole::TreeLeaves,
        MeshRole::TreeTrunk,
        MeshRole::HouseWall,
        MeshRole::HouseRoof,
        MeshRole::HouseWindow,
        MeshRole::HousePole,
        MeshRole::HouseDoor,
    ];

    pub fn base_color(self) -> Color {
        let hex = match self {
            MeshRole::UfoBody => 0x808080,
            MeshRole::UfoCockpit => 0xffffff,
            MeshRole::UfoLight => 0xffff00,
            MeshRole::UfoSpotLight => 0xcbc7bb,
            MeshRole::TreeLeaves => 0x26c751,
            MeshRole::TreeTrunk => 0x966920,
            MeshRole::HouseWall => 0xf0f7f7,
            MeshRole::HouseRoof => 0xf0b756,
            MeshRole::HouseWindow => 0x4b8ad6,
            MeshRole::HousePole => 0x966920,
            MeshRole::HouseDoor => 0x99431f,
        };
        Color::from_hex(hex)
    }
}

/// Lighting model applied to every decorative mesh at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Per-vertex diffuse
    #[default]
    Gouraud,
    /// Per-fragment diffuse + specular
    Phong,
    /// Quantized diffuse bands
    Toon,
    /// Unlit flat color
    Basic,
}

/// Renderer-agnostic material description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: ShadingMode,
    pub color: Color,
    pub specular: Option<Color>,
    pub shininess: f32,
    /// False for materials that ignore scene lights
    pub lit: bool,
}

impl Material {
    pub fn for_role(role: MeshRole, shading: ShadingMode) -> Self {
        let color = role.base_color();
        match shading {
            ShadingMode::Gouraud | ShadingMode::Toon => Self {
                shading,
                color,
                specular: None,
                shininess: 0.0,
                lit: true,
            },
            ShadingMode::Phong => Self {
                shading,
                color,
                specular: Some(Color::WHITE),
                shininess: 100.0,
                lit: true,
            },
            ShadingMode::Basic => Self {
                shading,
                color,
                specular: None,
                shininess: 0.0,
                lit: false,
            },
        }
    }
}
