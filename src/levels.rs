//! Built-in levels
//!
//! Level data ships inside the binary as JSON and is parsed on demand.

use crate::sim::{Level, LevelError};

/// Name and JSON source of every built-in level, in play order
const BUILTIN: [(&str, &str); 7] = [
    ("Stereo Bound", include_str!("../levels/01_stereo_bound.json")),
    ("Orb City", include_str!("../levels/02_orb_city.json")),
    ("Triple Threat", include_str!("../levels/03_triple_threat.json")),
    ("Aerodynamics", include_str!("../levels/04_aerodynamics.json")),
    ("Tsunami", include_str!("../levels/05_tsunami.json")),
    ("The Gauntlet", include_str!("../levels/06_the_gauntlet.json")),
    ("Hyperspace", include_str!("../levels/07_hyperspace.json")),
];

/// Number of built-in levels
pub fn count() -> usize {
    BUILTIN.len()
}

/// Display names in play order
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(name, _)| *name)
}

/// Load the built-in level at `index` (0-based)
pub fn builtin(index: usize) -> Result<Level, LevelError> {
    let (name, json) = BUILTIN
        .get(index)
        .ok_or(LevelError::UnknownLevel(index))?;
    Level::from_json(*name, json)
}

/// Index after `index`, wrapping to the first level
pub fn next_index(index: usize) -> usize {
    (index + 1) % count()
}

/// Index before `index`, wrapping to the last level
pub fn prev_index(index: usize) -> usize {
    (index + count() - 1) % count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;

    #[test]
    fn test_all_builtin_levels_parse() {
        for i in 0..count() {
            let level = builtin(i).unwrap();
            let obstacles = level.obstacles();
            assert!(!obstacles.is_empty(), "{} is empty", level.name);
            // Every record uses a known type
            assert_eq!(obstacles.len(), level.descriptors.len());
            // Each level ends on its finish line
            assert_eq!(obstacles.last().unwrap().kind, ObstacleKind::Finish);
        }
    }

    #[test]
    fn test_unknown_index() {
        assert!(matches!(builtin(99), Err(LevelError::UnknownLevel(99))));
    }

    #[test]
    fn test_index_wrapping() {
        assert_eq!(next_index(0), 1);
        assert_eq!(next_index(count() - 1), 0);
        assert_eq!(prev_index(0), count() - 1);
    }

    #[test]
    fn test_names_match_data() {
        let names: Vec<_> = names().collect();
        assert_eq!(names.len(), count());
        assert_eq!(builtin(0).unwrap().name, names[0]);
        assert_eq!(names[6], "Hyperspace");
    }

    #[test]
    fn test_first_level_layout() {
        let level = builtin(0).unwrap();
        let obs = level.obstacles();
        assert_eq!(obs[0].kind, ObstacleKind::Spike);
        assert_eq!(obs[0].x, 800.0);
        let coins = obs.iter().filter(|o| o.kind == ObstacleKind::Coin).count();
        assert_eq!(coins, 1);
    }
}
