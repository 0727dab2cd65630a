//! Front-end state machine
//!
//! Owns the single state slot and threads every transition through it:
//! read the latest state, compute the next, publish it. Drivers (web or
//! native) feed in frame timestamps and commands and get back the feedback
//! cues to play.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::autopilot;
use crate::feedback::{self, FeedbackEvent, MusicCue};
use crate::highscores::HighScoreTracker;
use crate::platform::{FrameClock, InputAction};
use crate::settings::Settings;
use crate::sim::GameState;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
}

/// Commands a driver can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Leave the menu and begin a run
    Start,
    MoveLeft,
    MoveRight,
    /// New run after a crash
    Restart,
    /// Back to the menu
    OpenMenu,
    /// Flip `Settings::muted` on any screen
    ToggleMute,
}

/// Game instance holding all front-end state
#[derive(Debug, Clone)]
pub struct App {
    state: GameState,
    screen: Screen,
    rng: Pcg32,
    tracker: HighScoreTracker,
    clock: FrameClock,
    settings: Settings,
}

impl App {
    /// App on the menu screen with a persisted high score
    pub fn new(high_score: u32, seed: u64, settings: Settings) -> Self {
        Self::from_state(GameState::new(high_score), seed, settings)
    }

    /// App on the menu screen resuming from an existing state
    pub fn from_state(state: GameState, seed: u64, settings: Settings) -> Self {
        log::debug!("App created with seed {}", seed);
        Self {
            tracker: HighScoreTracker::new(state.high_score),
            state,
            screen: Screen::Menu,
            rng: Pcg32::seed_from_u64(seed),
            clock: FrameClock::new(),
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    /// The current record was set during the current run
    pub fn is_new_record(&self) -> bool {
        self.tracker.is_new_record(&self.state)
    }

    /// Whether the high-score badge should pulse right now
    pub fn is_highlighting(&self) -> bool {
        self.screen == Screen::Playing
            && self.settings.effective_highlight_pulse()
            && self.tracker.is_highlighting()
    }

    /// Background music state for the current screen
    pub fn music_cue(&self) -> MusicCue {
        feedback::music_cue(self.screen == Screen::Menu, &self.state)
    }

    /// What an input action means on the current screen
    pub fn command_for(&self, action: InputAction) -> Option<AppCommand> {
        match (self.screen, action) {
            (_, InputAction::ToggleMute) => Some(AppCommand::ToggleMute),
            (Screen::Menu, InputAction::Confirm) => Some(AppCommand::Start),
            (Screen::Menu, _) => None,
            (Screen::Playing, InputAction::Left) => Some(AppCommand::MoveLeft),
            (Screen::Playing, InputAction::Right) => Some(AppCommand::MoveRight),
            (Screen::Playing, InputAction::Back) => Some(AppCommand::OpenMenu),
            (Screen::Playing, InputAction::Confirm) if self.state.is_game_over() => {
                Some(AppCommand::Restart)
            }
            (Screen::Playing, InputAction::Confirm) => None,
        }
    }

    /// Map and apply an input action
    pub fn handle_input(&mut self, action: InputAction) -> Vec<FeedbackEvent> {
        match self.command_for(action) {
            Some(command) => self.apply(command),
            None => Vec::new(),
        }
    }

    /// Apply a command, returning the cues it produced
    pub fn apply(&mut self, command: AppCommand) -> Vec<FeedbackEvent> {
        match command {
            AppCommand::Start => {
                if self.screen != Screen::Menu {
                    return Vec::new();
                }
                self.screen = Screen::Playing;
                self.begin_run();
                log::info!("Run started (session {})", self.state.session);
                vec![FeedbackEvent::UiConfirm]
            }
            AppCommand::MoveLeft | AppCommand::MoveRight => {
                if self.screen != Screen::Playing {
                    return Vec::new();
                }
                let direction = if command == AppCommand::MoveLeft { -1 } else { 1 };
                let next = self.state.move_lane(direction);
                self.publish(next)
            }
            AppCommand::Restart => {
                if self.screen != Screen::Playing || !self.state.is_game_over() {
                    return Vec::new();
                }
                self.begin_run();
                log::info!("Run restarted (session {})", self.state.session);
                vec![FeedbackEvent::UiConfirm]
            }
            AppCommand::OpenMenu => {
                if self.screen != Screen::Playing {
                    return Vec::new();
                }
                self.screen = Screen::Menu;
                self.tracker.clear_highlight();
                vec![FeedbackEvent::UiCancel]
            }
            AppCommand::ToggleMute => {
                let settings = Settings {
                    muted: !self.settings.muted,
                    ..self.settings.clone()
                };
                log::info!("Sound {}", if settings.muted { "muted" } else { "on" });
                self.set_settings(settings);
                vec![FeedbackEvent::UiConfirm]
            }
        }
    }

    /// Advance one display frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Vec<FeedbackEvent> {
        let dt = self.clock.delta(now_ms);
        self.tracker.tick(dt);
        if self.screen != Screen::Playing || self.state.is_game_over() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.settings.autopilot {
            let direction = autopilot::choose_direction(&self.state);
            if direction != 0 {
                let next = self.state.move_lane(direction);
                events.extend(self.publish(next));
            }
        }

        let next = self.state.advance(dt, &mut self.rng);
        events.extend(self.publish(next));
        if self.state.is_game_over() {
            log::info!(
                "Run over: score {} (level {}, {:.1}s)",
                self.state.score,
                self.state.level,
                self.state.elapsed
            );
        }
        events
    }

    fn begin_run(&mut self) {
        let next = self.state.restart();
        self.publish(next);
        self.clock.reset();
    }

    fn publish(&mut self, next: GameState) -> Vec<FeedbackEvent> {
        let events = feedback::diff(&self.state, &next);
        if self.tracker.observe(&next).raised {
            log::debug!("New high score {}", next.high_score);
        }
        self.state = next;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    fn playing_app() -> App {
        let mut app = App::new(0, 42, Settings::default());
        app.apply(AppCommand::Start);
        app
    }

    fn run_until_crash(app: &mut App) -> Vec<FeedbackEvent> {
        let mut now = 0.0;
        let mut events = Vec::new();
        for _ in 0..200_000 {
            now += 16.0;
            events.extend(app.frame(now));
            if !app.state().is_running {
                break;
            }
        }
        events
    }

    #[test]
    fn test_starts_on_menu() {
        let app = App::new(12, 1, Settings::default());
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.high_score(), 12);
        assert_eq!(app.music_cue(), MusicCue::Stop);
    }

    #[test]
    fn test_menu_ignores_frames_and_moves() {
        let mut app = App::new(0, 1, Settings::default());
        let before = app.state().clone();
        assert!(app.frame(0.0).is_empty());
        assert!(app.frame(100.0).is_empty());
        assert!(app.apply(AppCommand::MoveLeft).is_empty());
        assert_eq!(app.state(), &before);
    }

    #[test]
    fn test_start_begins_a_new_session() {
        let mut app = App::new(5, 1, Settings::default());
        let events = app.apply(AppCommand::Start);
        assert_eq!(events, vec![FeedbackEvent::UiConfirm]);
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.state().session, 1);
        assert_eq!(app.high_score(), 5);
        assert_eq!(app.music_cue(), MusicCue::Play);
    }

    #[test]
    fn test_moves_emit_lane_shift_until_edge() {
        let mut app = playing_app();
        assert_eq!(app.apply(AppCommand::MoveLeft), vec![FeedbackEvent::LaneShift]);
        assert_eq!(app.state().player_lane, 0);
        assert!(app.apply(AppCommand::MoveLeft).is_empty());
        assert_eq!(app.apply(AppCommand::MoveRight), vec![FeedbackEvent::LaneShift]);
    }

    #[test]
    fn test_frames_advance_the_run() {
        let mut app = playing_app();
        app.frame(1000.0);
        assert_eq!(app.state().elapsed, 0.0);
        app.frame(1100.0);
        assert!((app.state().elapsed - 0.1).abs() < 1e-5);
        // A long stall is clamped
        app.frame(60_000.0);
        assert!((app.state().elapsed - 0.26).abs() < 1e-5);
    }

    #[test]
    fn test_crash_then_restart() {
        let mut app = playing_app();
        let events = run_until_crash(&mut app);
        assert!(!app.state().is_running);
        assert!(events.contains(&FeedbackEvent::Collision));
        assert_eq!(app.music_cue(), MusicCue::Pause);

        let frozen = app.state().clone();
        assert!(app.frame(1e9).is_empty());
        assert_eq!(app.state(), &frozen);

        let session = app.state().session;
        assert_eq!(app.apply(AppCommand::Restart), vec![FeedbackEvent::UiConfirm]);
        assert!(app.state().is_running);
        assert_eq!(app.state().session, session + 1);
        assert_eq!(app.high_score(), frozen.high_score);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut app = playing_app();
        assert!(app.apply(AppCommand::Restart).is_empty());
        assert_eq!(app.state().session, 1);
    }

    #[test]
    fn test_high_score_event_and_record_flag() {
        let state = GameState {
            high_score: 3,
            score: 3,
            player_lane: 0,
            obstacles: vec![Obstacle {
                id: 0,
                lane: 2,
                top: 0.99,
            }],
            next_obstacle_id: 1,
            ..Default::default()
        };
        let mut app = App::from_state(state, 9, Settings::default());
        // Resume straight into play without resetting the run
        app.screen = Screen::Playing;
        app.frame(0.0);
        let events = app.frame(100.0);
        assert_eq!(events, vec![FeedbackEvent::HighScore]);
        assert_eq!(app.high_score(), 4);
        assert!(app.is_new_record());
        assert!(app.is_highlighting());

        app.apply(AppCommand::OpenMenu);
        assert!(!app.is_highlighting());
    }

    #[test]
    fn test_reduced_motion_suppresses_highlight() {
        let state = GameState {
            high_score: 0,
            obstacles: vec![Obstacle {
                id: 0,
                lane: 0,
                top: 0.99,
            }],
            next_obstacle_id: 1,
            ..Default::default()
        };
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut app = App::from_state(state, 9, settings);
        app.screen = Screen::Playing;
        app.frame(0.0);
        app.frame(100.0);
        assert!(app.is_new_record());
        assert!(!app.is_highlighting());
    }

    #[test]
    fn test_input_mapping_depends_on_screen() {
        let mut app = App::new(0, 1, Settings::default());
        assert_eq!(app.command_for(InputAction::Left), None);
        assert_eq!(app.command_for(InputAction::Confirm), Some(AppCommand::Start));

        app.handle_input(InputAction::Confirm);
        assert_eq!(app.command_for(InputAction::Left), Some(AppCommand::MoveLeft));
        assert_eq!(app.command_for(InputAction::Confirm), None);
        assert_eq!(app.command_for(InputAction::Back), Some(AppCommand::OpenMenu));

        assert_eq!(app.handle_input(InputAction::Back), vec![FeedbackEvent::UiCancel]);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn test_autopilot_steers() {
        let state = GameState {
            player_lane: 1,
            obstacles: vec![Obstacle {
                id: 0,
                lane: 1,
                top: 0.4,
            }],
            next_obstacle_id: 1,
            ..Default::default()
        };
        let settings = Settings {
            autopilot: true,
            ..Default::default()
        };
        let mut app = App::from_state(state, 3, settings);
        app.screen = Screen::Playing;
        let events = app.frame(0.0);
        assert_eq!(events, vec![FeedbackEvent::LaneShift]);
        assert_ne!(app.state().player_lane, 1);
    }

    #[test]
    fn test_autopilot_runs_are_reproducible() {
        let settings = Settings {
            autopilot: true,
            ..Default::default()
        };
        let mut a = App::new(0, 7, settings.clone());
        let mut b = App::new(0, 7, settings);
        a.apply(AppCommand::Start);
        b.apply(AppCommand::Start);
        for i in 1..=1800 {
            let now = f64::from(i) * 1000.0 / 60.0;
            assert_eq!(a.frame(now), b.frame(now));
        }
        assert_eq!(a.state(), b.state());
        assert!(a.state().elapsed > 0.0);
    }

    #[test]
    fn test_toggle_mute_on_any_screen() {
        let mut app = App::new(0, 1, Settings::default());
        assert_eq!(app.command_for(InputAction::ToggleMute), Some(AppCommand::ToggleMute));
        assert_eq!(app.handle_input(InputAction::ToggleMute), vec![FeedbackEvent::UiConfirm]);
        assert!(app.settings().muted);
        assert_eq!(app.settings().effective_sfx_volume(), 0.0);
        assert_eq!(app.screen(), Screen::Menu);

        app.apply(AppCommand::Start);
        let before = app.state().clone();
        app.handle_input(InputAction::ToggleMute);
        assert!(!app.settings().muted);
        assert!(app.settings().effective_music_volume() > 0.0);
        assert_eq!(app.state(), &before);
    }
}
