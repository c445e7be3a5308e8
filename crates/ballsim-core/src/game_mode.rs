use serde::{Deserialize, Serialize};

/// Game mode the simulation runs under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Soccar,
    /// The ball homes toward a goal after being hit.
    Heatseeker,
}

/// Team a car plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Orange,
}

impl Team {
    /// Sign of the Y direction this team attacks toward.
    pub fn attack_dir_y(self) -> f32 {
        match self {
            Team::Blue => 1.0,
            Team::Orange => -1.0,
        }
    }
}

/// Tag stored in engine user data so contact dispatch can tell objects apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UserInfoType {
    None = 0,
    Ball = 1,
    Car = 2,
    World = 3,
}

impl UserInfoType {
    pub fn from_user_data(data: u128) -> Self {
        match data {
            1 => Self::Ball,
            2 => Self::Car,
            3 => Self::World,
            _ => Self::None,
        }
    }

    pub fn user_data(self) -> u128 {
        self as u8 as u128
    }
}
