//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and a soft drone loop - no external
//! files needed! Every call is best-effort: if the browser refuses an
//! AudioContext or a node, the cue is silently skipped.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{FeedbackEvent, MusicCue};
use crate::settings::Settings;

/// Running drone voices
struct MusicLoop {
    voices: Vec<OscillatorNode>,
    gain: GainNode,
    playing: bool,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    music: Option<MusicLoop>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music: None,
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        if let (Some(ctx), Some(music)) = (&self.ctx, &self.music) {
            if music.playing {
                music
                    .gain
                    .gain()
                    .set_value_at_time(self.music_volume * 0.3, ctx.current_time())
                    .ok();
            }
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&self, event: FeedbackEvent) {
        let vol = self.sfx_volume * event.volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            FeedbackEvent::LaneShift => self.play_lane_shift(ctx, vol),
            FeedbackEvent::Collision => self.play_collision(ctx, vol),
            FeedbackEvent::HighScore => self.play_high_score(ctx, vol),
            FeedbackEvent::UiConfirm => self.play_ui_confirm(ctx, vol),
            FeedbackEvent::UiCancel => self.play_ui_cancel(ctx, vol),
        }
    }

    /// Bring the background loop in line with `cue`
    pub fn set_music(&mut self, cue: MusicCue) {
        let Some(ctx) = self.ctx.clone() else { return };
        match cue {
            MusicCue::Play => {
                if self.music.is_none() {
                    self.music = self.start_drone(&ctx);
                }
                if let Some(music) = &mut self.music {
                    music
                        .gain
                        .gain()
                        .set_value_at_time(self.music_volume * 0.3, ctx.current_time())
                        .ok();
                    music.playing = true;
                }
            }
            MusicCue::Pause => {
                if let Some(music) = &mut self.music {
                    music.gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
                    music.playing = false;
                }
            }
            MusicCue::Stop => {
                if let Some(music) = self.music.take() {
                    for voice in &music.voices {
                        voice.stop().ok();
                    }
                }
            }
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Two detuned voices under one gain node
    fn start_drone(&self, ctx: &AudioContext) -> Option<MusicLoop> {
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(0.0);
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let mut voices = Vec::with_capacity(2);
        for (freq, kind) in [(110.0, OscillatorType::Sine), (164.8, OscillatorType::Triangle)] {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(kind);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            osc.start().ok()?;
            voices.push(osc);
        }
        Some(MusicLoop {
            voices,
            gain,
            playing: false,
        })
    }

    /// Lane shift - quick upward chirp
    fn play_lane_shift(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 420.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.09)
            .ok();
        osc.frequency().set_value_at_time(420.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(720.0, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Collision - crunchy falling thud
    fn play_collision(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.45, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(45.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        // Bass thump
        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }

    /// High score - celebratory
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// UI confirm - two rising notes
    fn play_ui_confirm(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }
    }

    /// UI cancel - soft falling blip
    fn play_ui_cancel(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(520.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(330.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.14).ok();
    }
}
