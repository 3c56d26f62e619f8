//! Match outcome model driven by team strength ratings.

use crate::cli::types::Score;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Binomial scoring model: each side gets `attempts` independent chances and
/// converts each one with probability `effective_strength / divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeModel {
    /// Scoring attempts per side; also the maximum goals per side.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Upper bound (exclusive) of each uniform draw.
    #[serde(default = "default_divisor")]
    pub divisor: u32,

    /// Strength bonus for the home side.
    #[serde(default = "default_home_advantage")]
    pub home_advantage: i64,
}

fn default_attempts() -> u32 {
    6
}

fn default_divisor() -> u32 {
    140
}

fn default_home_advantage() -> i64 {
    10
}

impl Default for OutcomeModel {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            divisor: default_divisor(),
            home_advantage: default_home_advantage(),
        }
    }
}

impl OutcomeModel {
    /// Simulate one match. Effective strengths are floored at zero.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        home_strength: i64,
        away_strength: i64,
    ) -> Score {
        let home = (home_strength + self.home_advantage).max(0);
        let away = away_strength.max(0);

        let mut score = Score::new(0, 0);
        if self.divisor == 0 {
            return score;
        }
        for _ in 0..self.attempts {
            if (rng.gen_range(0..self.divisor) as i64) < home {
                score.home += 1;
            }
            if (rng.gen_range(0..self.divisor) as i64) < away {
                score.away += 1;
            }
        }
        score
    }
}
