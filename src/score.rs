//! Score and lives bookkeeping for a single run.

use crate::config::{EXTRA_LIFE_EVERY, MAX_LIVES, START_LIVES};
use crate::shop::ShopError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,  // Spendable and displayed
    earned: u32, // Everything ever added this run, drives bonus lives
    lives: u32,
    next_life_at: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        ScoreBoard {
            score: 0,
            earned: 0,
            lives: START_LIVES,
            next_life_at: EXTRA_LIFE_EVERY,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn earned(&self) -> u32 {
        self.earned
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Add points. Returns the new life count if a bonus life threshold was crossed.
    pub fn add_points(&mut self, points: u32) -> Option<u32> {
        self.score = self.score.saturating_add(points);
        self.earned = self.earned.saturating_add(points);

        let mut granted = false;
        while self.earned >= self.next_life_at {
            self.next_life_at = self.next_life_at.saturating_add(EXTRA_LIFE_EVERY);
            if self.lives < MAX_LIVES {
                self.lives += 1;
                granted = true;
            }
        }
        granted.then_some(self.lives)
    }

    /// Remove one life and return how many remain.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Deduct `price` from the score. The only way the score goes down.
    pub fn spend(&mut self, price: u32) -> Result<u32, ShopError> {
        if price > self.score {
            return Err(ShopError::InsufficientScore {
                price,
                balance: self.score,
            });
        }
        self.score -= price;
        Ok(self.score)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
