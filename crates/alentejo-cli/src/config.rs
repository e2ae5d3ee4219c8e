//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `ALENTEJO_SEED`, `ALENTEJO_HEIGHT_SCALE`, `ALENTEJO_SEGMENTS`
//! 2. Project-local: `alentejo.toml` (or the file passed with `--config`)
//! 3. Global: `~/.alentejo/config.toml`

use alentejo_core::{AlentejoError, Result};
use alentejo_terrain::{SampleMapping, TerrainConfig};
use alentejo_texture::{TextureKind, TextureParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Terrain settings as written in a file; unset keys defer to lower layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainSection {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub segments: Option<u32>,
    #[serde(default)]
    pub height_scale: Option<f32>,
    #[serde(default)]
    pub mapping: Option<SampleMapping>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlentejoConfigFile {
    /// Seed for every texture; unseeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub terrain: TerrainSection,
    /// Replaces the built-in ground texture parameters wholesale
    #[serde(default)]
    pub ground: Option<TextureParams>,
    /// Replaces the built-in sky texture parameters wholesale
    #[serde(default)]
    pub sky: Option<TextureParams>,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct AlentejoConfig {
    pub seed: Option<u64>,
    pub terrain: TerrainConfig,
    pub ground: TextureParams,
    pub sky: TextureParams,
}

impl AlentejoConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = AlentejoConfigFile::default();

        // Layer 1: Global config (~/.alentejo/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config; an explicit path must exist
        match explicit {
            Some(path) => {
                let local = Self::load_file(path)?;
                Self::merge_into(&mut config, local);
            }
            None => {
                let local_path = PathBuf::from("alentejo.toml");
                if local_path.exists() {
                    let local = Self::load_file(&local_path)?;
                    Self::merge_into(&mut config, local);
                }
            }
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config)?;

        Ok(Self::resolve(config))
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config)?;
        Ok(Self::resolve(config))
    }

    fn resolve(file: AlentejoConfigFile) -> Self {
        let defaults = TerrainConfig::default();
        let t = file.terrain;
        Self {
            seed: file.seed,
            terrain: TerrainConfig {
                width: t.width.unwrap_or(defaults.width),
                height: t.height.unwrap_or(defaults.height),
                segments: t.segments.unwrap_or(defaults.segments),
                height_scale: t.height_scale.unwrap_or(defaults.height_scale),
                mapping: t.mapping.unwrap_or(defaults.mapping),
            },
            ground: file.ground.unwrap_or_else(TextureParams::ground),
            sky: file.sky.unwrap_or_else(TextureParams::sky),
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".alentejo").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<AlentejoConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: AlentejoConfigFile = toml::from_str(&content).map_err(|e| {
            AlentejoError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        check_section_kind(path, "ground", config.ground.as_ref(), TextureKind::Ground)?;
        check_section_kind(path, "sky", config.sky.as_ref(), TextureKind::Sky)?;
        Ok(config)
    }

    fn merge_into(base: &mut AlentejoConfigFile, overlay: AlentejoConfigFile) {
        if overlay.seed.is_some() {
            base.seed = overlay.seed;
        }

        let (b, o) = (&mut base.terrain, overlay.terrain);
        if o.width.is_some() {
            b.width = o.width;
        }
        if o.height.is_some() {
            b.height = o.height;
        }
        if o.segments.is_some() {
            b.segments = o.segments;
        }
        if o.height_scale.is_some() {
            b.height_scale = o.height_scale;
        }
        if o.mapping.is_some() {
            b.mapping = o.mapping;
        }

        if overlay.ground.is_some() {
            base.ground = overlay.ground;
        }
        if overlay.sky.is_some() {
            base.sky = overlay.sky;
        }
    }

    fn apply_env_overrides(config: &mut AlentejoConfigFile) -> Result<()> {
        if let Some(seed) = env_value::<u64>("ALENTEJO_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(scale) = env_value::<f32>("ALENTEJO_HEIGHT_SCALE")? {
            config.terrain.height_scale = Some(scale);
        }
        if let Some(segments) = env_value::<u32>("ALENTEJO_SEGMENTS")? {
            config.terrain.segments = Some(segments);
        }
        Ok(())
    }
}

/// A texture table must describe the kind it is named after
fn check_section_kind(
    path: &Path,
    section: &str,
    params: Option<&TextureParams>,
    expected: TextureKind,
) -> Result<()> {
    match params {
        Some(params) if params.kind() != expected => Err(AlentejoError::ConfigError(format!(
            "{}: [{}] has style kind {:?}, expected {:?}",
            path.display(),
            section,
            params.kind(),
            expected
        ))),
        _ => Ok(()),
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AlentejoError::ConfigError(format!("{} has an invalid value '{}'", key, raw))
        }),
        Err(_) => Ok(None),
    }
}
