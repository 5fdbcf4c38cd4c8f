//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//!
//! The simulation only ever names a [`Cue`]; whatever plays it is a [`CueSink`].
//! Playback is fire-and-forget: an unavailable device turns every cue into a
//! no-op, nothing is queued and no error reaches the caller.

#[cfg(target_arch = "wasm32")]
use web_sys::{
    AudioContext, BiquadFilterNode, BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Grounded cube jump
    Jump,
    /// Yellow orb boost
    Orb,
    /// Dash orb entered
    Dash,
    /// Player destroyed
    Death,
    /// Finish line reached
    Win,
    /// Coin picked up
    Coin,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Orb => "orb",
            Cue::Dash => "dash",
            Cue::Death => "death",
            Cue::Win => "win",
            Cue::Coin => "coin",
        }
    }
}

/// Anything that can play a cue
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Audio manager for the game
///
/// Created once at startup. A failed device open is remembered as the disabled
/// state instead of being retried.
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        log::info!("No audio output on this platform - cues are silent");
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    /// A manager that never plays anything
    pub fn disabled() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            master_volume: 0.0,
            muted: true,
        }
    }

    /// Whether an output device was opened
    #[cfg(target_arch = "wasm32")]
    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn is_available(&self) -> bool {
        false
    }

    /// Resume audio context (required after user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a cue, silently dropping it when muted or unavailable
    pub fn play_cue(&self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.output(cue, vol);
    }

    #[cfg(target_arch = "wasm32")]
    fn output(&self, cue: Cue, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers start contexts suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Jump => play_jump(ctx, vol),
            Cue::Orb => play_orb(ctx, vol),
            Cue::Dash => play_dash(ctx, vol),
            Cue::Death => play_death(ctx, vol),
            Cue::Win => play_win(ctx, vol),
            Cue::Coin => play_coin(ctx, vol),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn output(&self, cue: Cue, vol: f32) {
        log::debug!("cue {} at volume {:.2} (silent)", cue.as_str(), vol);
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: Cue) {
        self.play_cue(cue);
    }
}

// === Sound generators ===

/// Create an oscillator with gain envelope
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Jump - short square chirp upward
#[cfg(target_arch = "wasm32")]
fn play_jump(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Square) else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(150.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(300.0, t + 0.1)
        .ok();
    gain.gain().set_value_at_time(vol * 0.1, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.1)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.1).ok();
}

/// Orb - rising sine blip
#[cfg(target_arch = "wasm32")]
fn play_orb(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(800.0, t + 0.15)
        .ok();
    gain.gain().set_value_at_time(vol * 0.15, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.15).ok();
}

/// Dash - filtered saw swoosh
#[cfg(target_arch = "wasm32")]
fn play_dash(ctx: &AudioContext, vol: f32) {
    let build = || -> Option<(OscillatorNode, GainNode, BiquadFilterNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let filter = ctx.create_biquad_filter().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(OscillatorType::Sawtooth);
        filter.set_type(BiquadFilterType::Lowpass);
        osc.connect_with_audio_node(&filter).ok()?;
        filter.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some((osc, gain, filter))
    };
    let Some((osc, gain, filter)) = build() else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(100.0, t).ok();
    osc.frequency()
        .linear_ramp_to_value_at_time(50.0, t + 0.3)
        .ok();
    filter.frequency().set_value_at_time(500.0, t).ok();
    filter
        .frequency()
        .exponential_ramp_to_value_at_time(3000.0, t + 0.2)
        .ok();
    gain.gain().set_value_at_time(vol * 0.15, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.3).ok();
}

/// Death - saw dive to a rumble
#[cfg(target_arch = "wasm32")]
fn play_death(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(100.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(10.0, t + 0.3)
        .ok();
    gain.gain().set_value_at_time(vol * 0.2, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.3).ok();
}

/// Win - two-step rising sweep
#[cfg(target_arch = "wasm32")]
fn play_win(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency()
        .linear_ramp_to_value_at_time(800.0, t + 0.1)
        .ok();
    osc.frequency().set_value_at_time(800.0, t + 0.1).ok();
    osc.frequency()
        .linear_ramp_to_value_at_time(1200.0, t + 0.2)
        .ok();
    gain.gain().set_value_at_time(vol * 0.2, t).ok();
    gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.5).ok();
}

/// Coin - bright ding
#[cfg(target_arch = "wasm32")]
fn play_coin(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 1200.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(1200.0, t).ok();
    osc.frequency()
        .linear_ramp_to_value_at_time(2000.0, t + 0.1)
        .ok();
    gain.gain().set_value_at_time(vol * 0.1, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.3).ok();
}
