//! Player preferences
//!
//! Cosmetics and audio levels. These never touch gameplay; the renderer and the
//! audio manager read them. Settings live in memory for the session. The native
//! runner can seed them from a JSON file, nothing is ever written back.

use serde::{Deserialize, Serialize};

/// Selectable player colors (RGB hex)
pub const PLAYER_COLORS: [u32; 8] = [
    0x00f0ff, // Cyan
    0x22c55e, // Green
    0xef4444, // Red
    0xfacc15, // Yellow
    0xa855f7, // Purple
    0xec4899, // Pink
    0xf97316, // Orange
    0xffffff, // White
];

/// Face drawn on the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubeIcon {
    #[default]
    Default,
    Face,
    Creeper,
    Lines,
    Dot,
    Cross,
}

impl CubeIcon {
    pub const ALL: [CubeIcon; 6] = [
        CubeIcon::Default,
        CubeIcon::Face,
        CubeIcon::Creeper,
        CubeIcon::Lines,
        CubeIcon::Dot,
        CubeIcon::Cross,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CubeIcon::Default => "Classic",
            CubeIcon::Face => "Face",
            CubeIcon::Creeper => "Blocky",
            CubeIcon::Lines => "Stripes",
            CubeIcon::Dot => "Dot",
            CubeIcon::Cross => "X",
        }
    }
}

/// Ship chassis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipIcon {
    #[default]
    Default,
    Fighter,
    Shark,
    Saucer,
}

impl ShipIcon {
    pub const ALL: [ShipIcon; 4] = [
        ShipIcon::Default,
        ShipIcon::Fighter,
        ShipIcon::Shark,
        ShipIcon::Saucer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShipIcon::Default => "Rocket",
            ShipIcon::Fighter => "Jet",
            ShipIcon::Shark => "Shark",
            ShipIcon::Saucer => "UFO",
        }
    }
}

/// Wave arrowhead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveIcon {
    #[default]
    Default,
    Dart,
    Saw,
    Shuriken,
}

impl WaveIcon {
    pub const ALL: [WaveIcon; 4] = [
        WaveIcon::Default,
        WaveIcon::Dart,
        WaveIcon::Saw,
        WaveIcon::Shuriken,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WaveIcon::Default => "Classic",
            WaveIcon::Dart => "Dart",
            WaveIcon::Saw => "Saw",
            WaveIcon::Shuriken => "Diamond",
        }
    }
}

/// Cosmetic choice sent by the customization screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cosmetics {
    /// Index into [`PLAYER_COLORS`]
    pub color: usize,
    pub cube: CubeIcon,
    pub ship: ShipIcon,
    pub wave: WaveIcon,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cosmetics: Cosmetics,

    // === Visual Effects ===
    /// Particle effects (bursts and trails)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
    /// Pause the run when the page is hidden or loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cosmetics: Cosmetics::default(),
            particles: true,
            master_volume: 0.8,
            muted: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp values that may come from hand-edited JSON
    fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        if self.cosmetics.color >= PLAYER_COLORS.len() {
            log::warn!(
                "Player color {} out of range, using default",
                self.cosmetics.color
            );
            self.cosmetics.color = 0;
        }
    }

    /// Apply a new cosmetic selection
    pub fn set_cosmetics(&mut self, cosmetics: Cosmetics) {
        self.cosmetics = cosmetics;
        self.sanitize();
    }

    /// Player color as RGBA floats
    pub fn player_rgba(&self) -> [f32; 4] {
        let hex = PLAYER_COLORS
            .get(self.cosmetics.color)
            .copied()
            .unwrap_or(PLAYER_COLORS[0]);
        crate::renderer::hex_rgba(hex, 1.0)
    }
}
