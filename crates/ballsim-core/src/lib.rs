pub mod consts;
pub mod error;
pub mod game_mode;
pub mod math;
pub mod mutator;
pub mod units;

pub use glam::Vec3;
