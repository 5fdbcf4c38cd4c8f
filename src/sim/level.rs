//! Level descriptors and runtime obstacles
//!
//! A level is an ordered list of obstacle descriptors. Order matters twice: it
//! assigns obstacle ids, and the last descriptor's x is the distance used for the
//! progress bar.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::Aabb;
use crate::consts::DEFAULT_OBSTACLE_SIZE;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Spike,
    Block,
    Finish,
    Coin,
    /// Yellow jump orb
    Orb,
    /// Purple dash orb
    OrbDash,
    PortalShip,
    PortalCube,
    PortalWave,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Block => "block",
            ObstacleKind::Finish => "finish",
            ObstacleKind::Coin => "coin",
            ObstacleKind::Orb => "orb",
            ObstacleKind::OrbDash => "orb_dash",
            ObstacleKind::PortalShip => "portal_ship",
            ObstacleKind::PortalCube => "portal_cube",
            ObstacleKind::PortalWave => "portal_wave",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "spike" => Some(ObstacleKind::Spike),
            "block" => Some(ObstacleKind::Block),
            "finish" => Some(ObstacleKind::Finish),
            "coin" => Some(ObstacleKind::Coin),
            "orb" => Some(ObstacleKind::Orb),
            "orb_dash" => Some(ObstacleKind::OrbDash),
            "portal_ship" => Some(ObstacleKind::PortalShip),
            "portal_cube" => Some(ObstacleKind::PortalCube),
            "portal_wave" => Some(ObstacleKind::PortalWave),
            _ => None,
        }
    }
}

/// Raw level record as authored
///
/// Only `type` and `x` are required; everything else falls back to a default so
/// that hand-written levels stay forgiving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f32,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl ObstacleDescriptor {
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            x,
            y: None,
            width: None,
            height: None,
        }
    }

    pub fn at_height(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A runtime obstacle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge in world space
    pub x: f32,
    /// Height of the bottom edge above the ground line
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Coins only: picked up during the current run
    pub collected: bool,
}

impl Obstacle {
    /// Screen-space box for the given ground line
    pub fn aabb(&self, ground_y: f32) -> Aabb {
        Aabb::from_ground(self.x, self.y, self.width, self.height, ground_y)
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no built-in level with index {0}")]
    UnknownLevel(usize),
}

/// An immutable level: a name plus its descriptor list
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub descriptors: Vec<ObstacleDescriptor>,
}

impl Level {
    pub fn new(name: impl Into<String>, descriptors: Vec<ObstacleDescriptor>) -> Self {
        Self {
            name: name.into(),
            descriptors,
        }
    }

    /// Parse a JSON array of descriptors
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, LevelError> {
        let descriptors: Vec<ObstacleDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(name, descriptors))
    }

    /// Build fresh runtime obstacles (ids 0.., nothing collected)
    ///
    /// Records with an unknown type are skipped with a warning; ids stay sequential
    /// over the records that were kept.
    pub fn obstacles(&self) -> Vec<Obstacle> {
        let mut obstacles = Vec::with_capacity(self.descriptors.len());
        for desc in &self.descriptors {
            let Some(kind) = ObstacleKind::from_str(&desc.kind) else {
                log::warn!(
                    "Level '{}': skipping unknown obstacle type '{}' at x={}",
                    self.name,
                    desc.kind,
                    desc.x
                );
                continue;
            };
            obstacles.push(Obstacle {
                id: obstacles.len() as u32,
                kind,
                x: desc.x,
                y: desc.y.unwrap_or(0.0),
                width: desc.width.unwrap_or(DEFAULT_OBSTACLE_SIZE),
                height: desc.height.unwrap_or(DEFAULT_OBSTACLE_SIZE),
                collected: false,
            });
        }
        obstacles
    }

    /// Seed for the cosmetic RNG, stable per level
    pub fn seed(&self) -> u64 {
        self.name
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |hash, b| {
                (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let level = Level::from_json(
            "defaults",
            r#"[
                { "type": "spike", "x": 800 },
                { "type": "block", "x": 1500, "width": 200 },
                { "type": "orb", "x": 3250, "y": 90, "height": 30 }
            ]"#,
        )
        .unwrap();
        let obs = level.obstacles();
        assert_eq!(obs.len(), 3);

        assert_eq!(obs[0].kind, ObstacleKind::Spike);
        assert_eq!((obs[0].y, obs[0].width, obs[0].height), (0.0, 40.0, 40.0));

        assert_eq!(obs[1].width, 200.0);
        assert_eq!(obs[1].height, 40.0);

        assert_eq!(obs[2].y, 90.0);
        assert_eq!(obs[2].width, 40.0);
        assert_eq!(obs[2].height, 30.0);
    }

    #[test]
    fn test_ids_follow_source_order() {
        let level = Level::new(
            "order",
            vec![
                ObstacleDescriptor::new(ObstacleKind::Block, 500.0),
                ObstacleDescriptor::new(ObstacleKind::Coin, 100.0).at_height(50.0),
                ObstacleDescriptor::new(ObstacleKind::Finish, 900.0),
            ],
        );
        let ids: Vec<u32> = level.obstacles().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_type_skipped() {
        let level = Level::from_json(
            "typo",
            r#"[{ "type": "spike", "x": 1 }, { "type": "lava", "x": 2 }, { "type": "finish", "x": 3 }]"#,
        )
        .unwrap();
        let obs = level.obstacles();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[1].kind, ObstacleKind::Finish);
        assert_eq!(obs[1].id, 1);
    }

    #[test]
    fn test_missing_x_is_an_error() {
        let err = Level::from_json("broken", r#"[{ "type": "spike" }]"#).unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            ObstacleKind::Spike,
            ObstacleKind::OrbDash,
            ObstacleKind::PortalWave,
        ] {
            assert_eq!(ObstacleKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_obstacle_box_sits_on_ground() {
        let level = Level::new(
            "box",
            vec![ObstacleDescriptor::new(ObstacleKind::Block, 10.0).at_height(160.0).with_width(1550.0)],
        );
        let block = &level.obstacles()[0];
        let aabb = block.aabb(600.0);
        assert_eq!(aabb.bottom, 440.0);
        assert_eq!(aabb.top, 400.0);
        assert_eq!(aabb.right, 1560.0);
    }
}
