//! Audio/UI feedback derived from state transitions
//!
//! The simulation never emits events. Cues are found by comparing the state
//! before and after a transition, which keeps the core pure.

use crate::sim::GameState;

/// One-shot cues the audio layer can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    /// Player changed lane
    LaneShift,
    /// A collision ended the run
    Collision,
    /// The high score went up
    HighScore,
    /// Start/restart confirmed
    UiConfirm,
    /// Back to menu
    UiCancel,
}

impl FeedbackEvent {
    /// Playback volume relative to the sfx channel
    pub fn volume(&self) -> f32 {
        match self {
            FeedbackEvent::LaneShift => 0.55,
            FeedbackEvent::Collision => 0.9,
            FeedbackEvent::HighScore => 0.8,
            FeedbackEvent::UiConfirm => 0.7,
            FeedbackEvent::UiCancel => 0.6,
        }
    }
}

/// What the background loop should be doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Playing (start if not already)
    Play,
    /// Paused, keep position
    Pause,
    /// Paused and rewound
    Stop,
}

/// Cues implied by moving from `prev` to `next`
pub fn diff(prev: &GameState, next: &GameState) -> Vec<FeedbackEvent> {
    let mut events = Vec::new();
    if next.session == prev.session && next.player_lane != prev.player_lane {
        events.push(FeedbackEvent::LaneShift);
    }
    if prev.is_running && !next.is_running {
        events.push(FeedbackEvent::Collision);
    }
    if next.high_score > prev.high_score {
        events.push(FeedbackEvent::HighScore);
    }
    events
}

/// Music state for the current screen and run
pub fn music_cue(menu_shown: bool, state: &GameState) -> MusicCue {
    if menu_shown {
        MusicCue::Stop
    } else if state.is_running {
        MusicCue::Play
    } else {
        MusicCue::Pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_lane_change_is_a_shift() {
        let prev = GameState::default();
        let next = prev.move_lane(1);
        assert_eq!(diff(&prev, &next), vec![FeedbackEvent::LaneShift]);
    }

    #[test]
    fn test_blocked_move_is_silent() {
        let prev = GameState {
            player_lane: 0,
            ..Default::default()
        };
        let next = prev.move_lane(-1);
        assert!(diff(&prev, &next).is_empty());
    }

    #[test]
    fn test_collision_cue() {
        let prev = GameState {
            obstacles: vec![Obstacle {
                id: 0,
                lane: 1,
                top: 0.75,
            }],
            ..Default::default()
        };
        let next = GameState {
            is_running: false,
            ..prev.clone()
        };
        assert_eq!(diff(&prev, &next), vec![FeedbackEvent::Collision]);
        // Already over: nothing new
        assert!(diff(&next, &next).is_empty());
    }

    #[test]
    fn test_high_score_cue() {
        let prev = GameState {
            score: 4,
            high_score: 4,
            ..Default::default()
        };
        let next = GameState {
            score: 5,
            high_score: 5,
            ..prev.clone()
        };
        assert_eq!(diff(&prev, &next), vec![FeedbackEvent::HighScore]);
    }

    #[test]
    fn test_restart_is_not_a_lane_shift() {
        let prev = GameState {
            player_lane: 0,
            is_running: false,
            ..Default::default()
        };
        let next = prev.restart();
        assert!(diff(&prev, &next).is_empty());
    }

    #[test]
    fn test_music_cue() {
        let running = GameState::default();
        let over = GameState {
            is_running: false,
            ..Default::default()
        };
        assert_eq!(music_cue(true, &running), MusicCue::Stop);
        assert_eq!(music_cue(false, &running), MusicCue::Play);
        assert_eq!(music_cue(false, &over), MusicCue::Pause);
    }
}
