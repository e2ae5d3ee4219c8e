//! Texture synthesis parameters

use alentejo_core::{AlentejoError, Color, Result};
use serde::{Deserialize, Serialize};

/// Texture edge length used when none is configured
pub const DEFAULT_SIZE: u32 = 512;

/// Which synthesis algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// Solid base color speckled with palette-colored dots
    Ground,
    /// Vertical gradient scattered with glowing stars
    Sky,
}

impl std::str::FromStr for TextureKind {
    type Err = AlentejoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ground" | "field" => Ok(TextureKind::Ground),
            "sky" => Ok(TextureKind::Sky),
            other => Err(AlentejoError::invalid_parameter(
                "kind",
                format!("unknown texture kind '{}'; valid values: ground, sky", other),
            )),
        }
    }
}

/// Colors for one texture kind. Tagged by `kind` in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextureStyle {
    Ground {
        #[serde(with = "hex_color")]
        base: Color,
        /// Dot colors, each picked with equal probability
        #[serde(with = "hex_palette")]
        palette: Vec<Color>,
    },
    Sky {
        #[serde(with = "hex_color")]
        top: Color,
        #[serde(with = "hex_color")]
        bottom: Color,
        #[serde(with = "hex_color")]
        star: Color,
        /// Halo radius as a multiple of the star radius; 0 disables the halo
        #[serde(default = "default_glow")]
        glow: f32,
    },
}

impl TextureStyle {
    pub fn kind(&self) -> TextureKind {
        match self {
            TextureStyle::Ground { .. } => TextureKind::Ground,
            TextureStyle::Sky { .. } => TextureKind::Sky,
        }
    }
}

/// Full parameter set for one synthesized texture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureParams {
    /// Edge length in pixels; output is always square
    #[serde(default = "default_size")]
    pub size: u32,
    /// Number of dots (ground) or stars (sky) to stamp
    pub point_count: u32,
    /// Dot radii are sampled uniformly from `[min_radius, max_radius)`
    pub min_radius: f32,
    pub max_radius: f32,
    pub style: TextureStyle,
}

impl TextureParams {
    /// Light-green field speckled with white, yellow, lavender and light-blue flowers
    pub fn ground() -> Self {
        Self {
            size: DEFAULT_SIZE,
            point_count: 400,
            min_radius: 1.0,
            max_radius: 3.0,
            style: TextureStyle::Ground {
                base: Color::from_hex(0x90ee90),
                palette: vec![
                    Color::from_hex(0xffffff),
                    Color::from_hex(0xffff00),
                    Color::from_hex(0xe6e6fa),
                    Color::from_hex(0xadd8e6),
                ],
            },
        }
    }

    /// Dark-blue to violet night gradient with white stars
    pub fn sky() -> Self {
        Self {
            size: DEFAULT_SIZE,
            point_count: 1500,
            min_radius: 0.5,
            max_radius: 1.5,
            style: TextureStyle::Sky {
                top: Color::from_hex(0x00001a),
                bottom: Color::from_hex(0x2e1a47),
                star: Color::WHITE,
                glow: default_glow(),
            },
        }
    }

    pub fn for_kind(kind: TextureKind) -> Self {
        match kind {
            TextureKind::Ground => Self::ground(),
            TextureKind::Sky => Self::sky(),
        }
    }

    pub fn kind(&self) -> TextureKind {
        self.style.kind()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_point_count(mut self, point_count: u32) -> Self {
        self.point_count = point_count;
        self
    }

    /// Reject parameters the synthesizer cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(AlentejoError::invalid_parameter("size", "must be at least 1"));
        }
        if !(self.min_radius.is_finite() && self.max_radius.is_finite()) {
            return Err(AlentejoError::invalid_parameter("radius", "must be finite"));
        }
        if self.min_radius < 0.0 || self.max_radius < self.min_radius {
            return Err(AlentejoError::invalid_parameter(
                "radius",
                format!(
                    "expected 0 <= min_radius <= max_radius, got [{}, {}]",
                    self.min_radius, self.max_radius
                ),
            ));
        }
        match &self.style {
            TextureStyle::Ground { palette, .. } if palette.is_empty() && self.point_count > 0 => {
                Err(AlentejoError::invalid_parameter(
                    "palette",
                    "needs at least one color when point_count > 0",
                ))
            }
            TextureStyle::Sky { glow, .. } if !glow.is_finite() || *glow < 0.0 => Err(
                AlentejoError::invalid_parameter("glow", "must be a finite non-negative factor"),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for TextureParams {
    fn default() -> Self {
        Self::ground()
    }
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_glow() -> f32 {
    3.0
}

mod hex_color {
    use alentejo_core::Color;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&color.to_hex_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let s = String::deserialize(d)?;
        Color::parse_hex(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid color '{}', expected #rrggbb", s)))
    }
}

mod hex_palette {
    use alentejo_core::Color;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(colors: &[Color], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(colors.iter().map(Color::to_hex_string))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Color>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|s| {
                Color::parse_hex(s).ok_or_else(|| {
                    de::Error::custom(format!("invalid color '{}', expected #rrggbb", s))
                })
            })
            .collect()
    }
}
