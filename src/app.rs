use log::{error, info};

use crate::config::MAX_USERNAME_CHARS;
use crate::effects::GrowthEffects;
use crate::game::{Collision, GridSimulation, StepOutcome};
use crate::input::{Direction, GameInput, InputMode};
use crate::score::{ScoreBackend, ScoreStore};

/// Which screen the driver is showing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    UserSelect,
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Summary of the run that just ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RunSummary {
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
    pub collision: Option<Collision>,
}

/// Drives one [`GridSimulation`] and records finished runs in a [`ScoreStore`].
pub struct App<B> {
    simulation: GridSimulation,
    store: ScoreStore<B>,
    screen: Screen,
    user: Option<String>,
    name_input: String,
    selected: Option<usize>,
    queued_direction: Option<Direction>,
    effects: GrowthEffects,
    last_run: Option<RunSummary>,
    message: Option<String>,
    /// Leaderboard snapshot, refreshed after every store access the driver makes.
    ranked: Vec<(String, u32)>,
    best: u32,
    should_quit: bool,
}

impl<B: ScoreBackend> App<B> {
    #[must_use]
    pub fn new(simulation: GridSimulation, store: ScoreStore<B>) -> Self {
        let mut app = Self {
            simulation,
            store,
            screen: Screen::UserSelect,
            user: None,
            name_input: String::new(),
            selected: None,
            queued_direction: None,
            effects: GrowthEffects::default(),
            last_run: None,
            message: None,
            ranked: Vec::new(),
            best: 0,
            should_quit: false,
        };
        app.refresh_scores();
        app
    }

    /// Key map the current screen wants.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.screen {
            Screen::UserSelect => InputMode::Text,
            _ => InputMode::Game,
        }
    }

    /// Applies one input event to the current screen.
    pub fn handle_input(&mut self, input: GameInput) {
        if input == GameInput::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::UserSelect => self.handle_user_select(input),
            Screen::Ready => match input {
                GameInput::Confirm => self.screen = Screen::Playing,
                GameInput::Direction(direction) => {
                    self.queued_direction = Some(direction);
                    self.screen = Screen::Playing;
                }
                GameInput::SwitchUser => self.open_user_select(),
                _ => {}
            },
            Screen::Playing => match input {
                GameInput::Direction(direction) => self.queued_direction = Some(direction),
                GameInput::Pause => self.screen = Screen::Paused,
                _ => {}
            },
            Screen::Paused => {
                if matches!(input, GameInput::Pause | GameInput::Confirm) {
                    self.screen = Screen::Playing;
                }
            }
            Screen::GameOver => match input {
                GameInput::Confirm => {
                    self.start_run();
                    self.screen = Screen::Playing;
                }
                GameInput::SwitchUser => self.open_user_select(),
                _ => {}
            },
        }
    }

    /// Runs one simulation tick. Does nothing outside the playing screen.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.screen != Screen::Playing {
            return None;
        }

        if let Some(direction) = self.queued_direction.take() {
            self.simulation.request_direction(direction);
        }

        let outcome = self.simulation.step();
        if outcome.ate {
            self.effects.spawn(self.simulation.snake().head());
        }
        if outcome.terminated {
            self.finish_run(outcome);
        }

        Some(outcome)
    }

    /// Advances decorative effects by one animation frame.
    pub fn advance_effects(&mut self) {
        self.effects.advance();
    }

    #[must_use]
    pub fn simulation(&self) -> &GridSimulation {
        &self.simulation
    }

    #[must_use]
    pub fn store(&self) -> &ScoreStore<B> {
        &self.store
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Text typed on the user-select screen.
    #[must_use]
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Index into [`App::ranked`] highlighted on the user-select screen.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn effects(&self) -> &GrowthEffects {
        &self.effects
    }

    #[must_use]
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// Status or error line for the current screen.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Best score of the active user, as of the last store refresh.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best
    }

    /// Users by best score, as of the last store refresh.
    #[must_use]
    pub fn ranked(&self) -> &[(String, u32)] {
        &self.ranked
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn handle_user_select(&mut self, input: GameInput) {
        match input {
            GameInput::Char(c) => {
                if self.name_input.chars().count() < MAX_USERNAME_CHARS {
                    self.name_input.push(c);
                }
                self.selected = None;
            }
            GameInput::Backspace => {
                self.name_input.pop();
                self.selected = None;
            }
            GameInput::SelectPrevious => self.move_selection(-1),
            GameInput::SelectNext => self.move_selection(1),
            GameInput::Confirm => self.confirm_user(),
            _ => {}
        }
    }

    fn move_selection(&mut self, offset: isize) {
        if self.ranked.is_empty() {
            return;
        }

        let last = self.ranked.len() - 1;
        let index = match self.selected {
            None if offset < 0 => last,
            None => 0,
            Some(current) => current.saturating_add_signed(offset).min(last),
        };

        self.selected = Some(index);
        self.name_input.clone_from(&self.ranked[index].0);
    }

    fn confirm_user(&mut self) {
        let name = self.name_input.trim().to_owned();

        match self.store.create(&name) {
            Ok(created) => {
                if !created {
                    info!("selected existing user {name:?}");
                }
                self.user = Some(name);
                self.message = None;
                self.refresh_scores();
                self.start_run();
                self.screen = Screen::Ready;
            }
            Err(e) => {
                error!("could not select user {name:?}: {e}");
                self.message = Some(e.to_string());
            }
        }
    }

    fn open_user_select(&mut self) {
        self.name_input = self.user.clone().unwrap_or_default();
        self.selected = None;
        self.message = None;
        self.refresh_scores();
        self.screen = Screen::UserSelect;
    }

    fn start_run(&mut self) {
        self.simulation.restart();
        self.queued_direction = None;
        self.effects.clear();
        self.last_run = None;
        self.message = None;
    }

    fn finish_run(&mut self, outcome: StepOutcome) {
        self.screen = Screen::GameOver;
        info!(
            "run ended: score {} ({:?}), length {}",
            outcome.score,
            outcome.collision,
            self.simulation.snake().len()
        );

        let Some(user) = self.user.as_deref() else {
            return;
        };

        let new_best = match self.store.record_score(user, outcome.score) {
            Ok(improved) => improved,
            Err(e) => {
                error!("failed to save score for {user:?}: {e}");
                self.message = Some(format!("Could not save score: {e}"));
                false
            }
        };

        self.refresh_scores();
        self.last_run = Some(RunSummary {
            score: outcome.score,
            best: self.best,
            new_best,
            collision: outcome.collision,
        });
    }

    /// Re-reads the store once into the leaderboard and best-score caches.
    fn refresh_scores(&mut self) {
        self.ranked = self.store.ranked();
        self.best = self.user.as_deref().map_or(0, |user| {
            self.ranked
                .iter()
                .find(|(name, _)| name == user)
                .map_or(0, |(_, best)| *best)
        });
    }
}
