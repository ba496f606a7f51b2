//! Wavefield library - procedural terrain, primitive meshes and a
//! wave-animated water scene

pub mod camera;
pub mod cli;
pub mod input;
pub mod lighting;
pub mod mesh;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod terrain;
pub mod water;
