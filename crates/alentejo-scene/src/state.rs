//! Scene state, passed explicitly to update and input handling

use crate::input::{HeldKeys, SceneAction};
use crate::roles::{Material, MeshRole, ShadingMode};
use alentejo_core::{Result, Vec3};
use alentejo_terrain::Terrain;
use alentejo_texture::{generate, generate_texture, Texture, TextureParams};
use rand::Rng;

/// Distance the UFO travels per tick while an arrow key is held
const UFO_SPEED: f32 = 0.5;
/// UFO spin per tick, in radians
const UFO_SPIN: f32 = 0.01;

/// Light switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lights {
    pub directional: bool,
    pub spot: bool,
    pub point: bool,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            directional: true,
            spot: true,
            point: true,
        }
    }
}

/// A decorative mesh and its current material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub role: MeshRole,
    pub material: Material,
}

/// The keyboard-driven flying saucer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ufo {
    pub position: Vec3,
    /// Spin about world Y, in radians
    pub rotation_y: f32,
}

/// Everything the update and render steps need, owned in one place
pub struct SceneState {
    pub land: Terrain,
    sky: Texture,
    sky_params: TextureParams,
    shading: ShadingMode,
    pub lights: Lights,
    pub ufo: Ufo,
    decorations: Vec<Decoration>,
}

impl SceneState {
    /// Create a scene around an already-built terrain, synthesizing the sky
    pub fn new<R: Rng>(land: Terrain, sky_params: TextureParams, rng: &mut R) -> Result<Self> {
        let sky = generate_texture(&sky_params, rng)?;
        Ok(Self {
            land,
            sky,
            sky_params,
            shading: ShadingMode::default(),
            lights: Lights::default(),
            ufo: Ufo {
                position: Vec3::new(0.0, 60.0, 0.0),
                rotation_y: 0.0,
            },
            decorations: Vec::new(),
        })
    }

    pub fn sky(&self) -> &Texture {
        &self.sky
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Register a decorative mesh; returns its index
    pub fn add_decoration(&mut self, role: MeshRole) -> usize {
        self.decorations.push(Decoration {
            role,
            material: Material::for_role(role, self.shading),
        });
        self.decorations.len() - 1
    }

    /// Reassign every decoration's material for the new shading mode
    pub fn set_shading(&mut self, mode: ShadingMode) {
        self.shading = mode;
        for d in &mut self.decorations {
            d.material = Material::for_role(d.role, mode);
        }
    }

    /// Handle one key-press action
    pub fn apply<R: Rng>(&mut self, action: SceneAction, rng: &mut R) -> Result<()> {
        match action {
            SceneAction::RegenerateGround => {
                self.land.regenerate_texture(rng)?;
            }
            SceneAction::RegenerateSky => {
                let image = generate(&self.sky_params, rng)?;
                self.sky.replace_image(image);
            }
            SceneAction::ToggleDirectionalLight => {
                self.lights.directional = !self.lights.directional
            }
            SceneAction::ToggleSpotLight => self.lights.spot = !self.lights.spot,
            SceneAction::TogglePointLights => self.lights.point = !self.lights.point,
            SceneAction::SetShading(mode) => self.set_shading(mode),
        }
        tracing::debug!(?action, "applied scene action");
        Ok(())
    }

    /// Advance one frame: move the UFO along the held arrows and spin it
    pub fn tick(&mut self, keys: &HeldKeys) {
        self.ufo.position = self.ufo.position + keys.direction() * UFO_SPEED;
        self.ufo.rotation_y += UFO_SPIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alentejo_core::RasterImage;
    use alentejo_terrain::TerrainConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene(rng: &mut StdRng) -> SceneState {
        let heightmap = RasterImage::new(4, 4, [128, 128, 128, 255]).unwrap();
        let config = TerrainConfig {
            width: 10.0,
            height: 10.0,
            segments: 3,
            ..TerrainConfig::default()
        };
        let ground = TextureParams::ground().with_size(32).with_point_count(16);
        let land = Terrain::build(&config, &heightmap, &ground, rng).unwrap();
        let sky = TextureParams::sky().with_size(32).with_point_count(16);
        SceneState::new(land, sky, rng).unwrap()
    }

    #[test]
    fn shading_change_reassigns_every_decoration() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = scene(&mut rng);
        s.add_decoration(MeshRole::TreeTrunk);
        s.add_decoration(MeshRole::HouseDoor);

        s.apply(SceneAction::SetShading(ShadingMode::Toon), &mut rng)
            .unwrap();

        assert_eq!(s.shading(), ShadingMode::Toon);
        for d in s.decorations() {
            assert_eq!(d.material, Material::for_role(d.role, ShadingMode::Toon));
        }
        // New decorations pick up the current mode
        let i = s.add_decoration(MeshRole::UfoBody);
        assert_eq!(s.decorations()[i].material.shading, ShadingMode::Toon);
    }

    #[test]
    fn regenerate_ground_swaps_only_the_land_texture() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = scene(&mut rng);
        let sky_version = s.sky().version();
        let positions = s.land.mesh().positions().to_vec();

        s.apply(SceneAction::RegenerateGround, &mut rng).unwrap();

        assert_eq!(s.land.texture().version(), 2);
        assert_eq!(s.sky().version(), sky_version);
        assert_eq!(s.land.mesh().positions(), positions.as_slice());
    }

    #[test]
    fn regenerate_sky_swaps_only_the_sky() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = scene(&mut rng);
        let before = s.sky().hash();

        s.apply(SceneAction::RegenerateSky, &mut rng).unwrap();

        assert_ne!(s.sky().hash(), before);
        assert_eq!(s.land.texture().version(), 1);
    }

    #[test]
    fn light_toggles_flip_independently() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = scene(&mut rng);
        s.apply(SceneAction::ToggleSpotLight, &mut rng).unwrap();
        assert_eq!(
            s.lights,
            Lights {
                directional: true,
                spot: false,
                point: true
            }
        );
        s.apply(SceneAction::ToggleSpotLight, &mut rng).unwrap();
        assert!(s.lights.spot);
    }

    #[test]
    fn tick_moves_and_spins_the_ufo() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = scene(&mut rng);
        let start = s.ufo.position;

        let keys = HeldKeys {
            right: true,
            ..Default::default()
        };
        s.tick(&keys);
        s.tick(&HeldKeys::default());

        assert!((s.ufo.position.x - start.x - UFO_SPEED).abs() < 1e-6);
        assert_eq!(s.ufo.position.y, start.y);
        assert!((s.ufo.rotation_y - 2.0 * UFO_SPIN).abs() < 1e-6);
    }
}
