//! High score persistence and tracking
//!
//! The high score is a single integer stored under one key. The tracker
//! watches published game states and reports when the record rises, so the
//! driver can persist it and play the fanfare.

use crate::consts::HIGHLIGHT_DURATION;
use crate::persistence::{Storage, StorageError};
use crate::sim::GameState;

/// Best score ever reached, as persisted between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(pub u32);

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "everglow_high_score";

    /// Load the persisted high score, 0 if missing or unreadable
    pub fn load(storage: &Storage) -> Self {
        match storage.load_json::<u32>(Self::STORAGE_KEY) {
            Some(score) => {
                log::info!("Loaded high score {}", score);
                Self(score)
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Persist the high score
    pub fn save(&self, storage: &Storage) -> Result<(), StorageError> {
        storage.save_json(Self::STORAGE_KEY, &self.0)?;
        log::info!("High score saved ({})", self.0);
        Ok(())
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// What the tracker saw in one observed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScoreUpdate {
    /// The record rose since the last observation
    pub raised: bool,
}

/// Follows the high score across states and sessions
#[derive(Debug, Clone)]
pub struct HighScoreTracker {
    previous: u32,
    record_session: Option<u32>,
    highlight_remaining: f32,
}

impl HighScoreTracker {
    /// Start tracking from the high score the first state was built with
    pub fn new(initial: u32) -> Self {
        Self {
            previous: initial,
            record_session: None,
            highlight_remaining: 0.0,
        }
    }

    /// Observe a freshly published state
    pub fn observe(&mut self, state: &GameState) -> HighScoreUpdate {
        if state.high_score <= self.previous {
            return HighScoreUpdate::default();
        }
        self.previous = state.high_score;
        if self.record_session != Some(state.session) {
            self.record_session = Some(state.session);
            // Pulse once per run, when the old record is first beaten
            if state.score > 0 {
                self.highlight_remaining = HIGHLIGHT_DURATION;
            }
        }
        HighScoreUpdate { raised: true }
    }

    /// True if the current record was set during `state`'s session
    pub fn is_new_record(&self, state: &GameState) -> bool {
        self.record_session == Some(state.session)
    }

    /// Count down the highlight pulse
    pub fn tick(&mut self, dt: f32) {
        self.highlight_remaining = (self.highlight_remaining - dt.max(0.0)).max(0.0);
    }

    /// Whether the high-score badge should currently pulse
    pub fn is_highlighting(&self) -> bool {
        self.highlight_remaining > 0.0
    }

    /// Stop the pulse immediately (e.g. the menu was opened)
    pub fn clear_highlight(&mut self) {
        self.highlight_remaining = 0.0;
    }
}
