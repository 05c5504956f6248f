//! Game session driver.
//!
//! Provides a single entry point: `(game, provider, config) -> GameResult`.
//!
//! The session alternates night and day, evaluating the win condition after
//! each phase, until a faction wins or the round cap is reached.

use serde::Serialize;

use crate::error::SetupError;
use crate::game::{
    DEFAULT_MAX_RUNOFFS, DecisionProvider, Game, GameStatus, LineupProvider, Outcome, PlayerId,
    assert_invariants, conclude, run_day, run_night,
};

/// Configuration for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for role distribution in [`GameConfig::setup`].
    pub seed: u64,
    /// Rounds played before the session gives up without a winner.
    pub max_rounds: u32,
    /// Runoffs allowed per vote before it is declared deadlocked.
    pub max_runoffs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_rounds: 50,
            max_runoffs: DEFAULT_MAX_RUNOFFS,
        }
    }
}

impl GameConfig {
    /// Deal a new game for `names`, shuffling the provider's lineup with
    /// this config's seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no lineup for this table size or
    /// the roster is invalid.
    pub fn setup<S: AsRef<str>>(
        &self,
        names: &[S],
        lineups: &impl LineupProvider,
    ) -> Result<Game, SetupError> {
        Game::with_provider(names, lineups, self.seed)
    }
}

/// One death, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Death {
    /// Who died.
    pub player: PlayerId,
    /// Their name.
    pub name: String,
    /// Round of death.
    pub round: u32,
}

/// Final result of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// How the game ended, or `None` if the round cap was hit.
    pub outcome: Option<Outcome>,
    /// Rounds started, including the last one.
    pub rounds_played: u32,
    /// Deaths in order (first death is index 0).
    pub death_order: Vec<Death>,
    /// Names of the players alive at the end.
    pub survivors: Vec<String>,
}

/// Play `game` to completion.
///
/// The game is started if it is still waiting. A game that is already
/// finished is returned as is.
pub fn run_game(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    config: &GameConfig,
) -> GameResult {
    let mut runner = Runner {
        game,
        provider,
        config: *config,
        death_order: Vec::new(),
    };
    runner.run()
}

struct Runner<'a> {
    game: &'a mut Game,
    provider: &'a mut dyn DecisionProvider,
    config: GameConfig,
    death_order: Vec<Death>,
}

impl Runner<'_> {
    fn run(&mut self) -> GameResult {
        self.game.start();
        let mut outcome = None;

        while self.game.status == GameStatus::Running {
            let night = run_night(self.game, self.provider);
            self.note_deaths(&night.deaths);
            assert_invariants(self.game);
            outcome = conclude(self.game);
            if outcome.is_some() {
                break;
            }

            let day = run_day(self.game, self.provider, self.config.max_runoffs);
            self.note_deaths(&day.deaths);
            assert_invariants(self.game);
            outcome = conclude(self.game);
            if outcome.is_some() {
                break;
            }

            if self.game.round >= self.config.max_rounds {
                tracing::warn!(rounds = self.game.round, "round cap reached without a winner");
                break;
            }
            self.game.round += 1;
        }

        self.build_result(outcome)
    }

    fn note_deaths(&mut self, deaths: &[PlayerId]) {
        let round = self.game.round;
        self.death_order.extend(deaths.iter().map(|&player| Death {
            player,
            name: self.game.name(player).to_string(),
            round,
        }));
    }

    fn build_result(&mut self, outcome: Option<Outcome>) -> GameResult {
        let survivors = self
            .game
            .alive_ids()
            .map(|id| self.game.name(id).to_string())
            .collect();
        GameResult {
            outcome,
            rounds_played: self.game.round,
            death_order: std::mem::take(&mut self.death_order),
            survivors,
        }
    }
}
