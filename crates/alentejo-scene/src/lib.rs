//! Alentejo Scene - Application state for terrain demos
//!
//! Holds the land, sky, lights, UFO and decorative meshes in a single
//! [`SceneState`] that input handling and per-frame updates take by
//! reference. Decorative meshes carry a [`MeshRole`], and materials are
//! chosen by matching on role and [`ShadingMode`].

pub mod input;
pub mod roles;
pub mod state;

pub use input::{HeldKeys, SceneAction};
pub use roles::{Material, MeshRole, ShadingMode};
pub use state::{Decoration, Lights, SceneState, Ufo};
