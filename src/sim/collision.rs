//! Collision detection for axis-aligned boxes
//!
//! Everything in the course is an axis-aligned box: the player, blocks, spikes,
//! orbs, portals and the finish line. This module only answers geometric
//! questions; what a contact *does* is decided per obstacle kind in `tick`.

use glam::Vec2;

use crate::consts::{BLOCK_TOLERANCE, SPIKE_INSET, WAVE_BLOCK_TOLERANCE};
use super::state::GameMode;

/// Axis-aligned box in screen-space coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Box for an obstacle resting `height_above_ground` above the ground line
    pub fn from_ground(x: f32, height_above_ground: f32, width: f32, height: f32, ground_y: f32) -> Self {
        let bottom = ground_y - height_above_ground;
        Self {
            left: x,
            top: bottom - height,
            right: x + width,
            bottom,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Strict overlap test; boxes that merely touch do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }

    /// Shrink the box by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            left: self.left + margin,
            top: self.top + margin,
            right: self.right - margin,
            bottom: self.bottom - margin,
        }
    }
}

/// Lethal core of a spike; grazing the outer margin is forgiven
pub fn spike_hitbox(spike: &Aabb) -> Aabb {
    spike.inset(SPIKE_INSET)
}

/// How a player contact with a block resolves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockContact {
    /// Came down onto the top face; rest the player's bottom at `surface`
    Landing { surface: f32 },
    /// Came up into the bottom face; rest the player's top at `surface`
    Ceiling { surface: f32 },
    /// Hit a side face or ended up inside the block
    Impact,
}

/// Vertical slack used to tell landings and ceiling bumps from side impacts
pub fn block_tolerance(mode: GameMode) -> f32 {
    match mode {
        GameMode::Wave => WAVE_BLOCK_TOLERANCE,
        GameMode::Cube | GameMode::Ship => BLOCK_TOLERANCE,
    }
}

/// Classify an overlapping player/block pair
///
/// `vy` must be the velocity applied to the player this frame: the previous
/// position is reconstructed as the current one minus `vy`, which only holds while
/// velocity is integrated exactly once per frame.
pub fn classify_block_contact(player: &Aabb, vy: f32, block: &Aabb, mode: GameMode) -> BlockContact {
    let tolerance = block_tolerance(mode);
    let prev_bottom = player.bottom - vy;
    let prev_top = player.top - vy;

    if prev_bottom <= block.top + tolerance && vy >= 0.0 {
        BlockContact::Landing { surface: block.top }
    } else if prev_top >= block.bottom - tolerance && vy < 0.0 {
        BlockContact::Ceiling {
            surface: block.bottom,
        }
    } else {
        BlockContact::Impact
    }
}
