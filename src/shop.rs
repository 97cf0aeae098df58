//! Cosmetic background shop paid for with score.

use crate::score::ScoreBoard;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShopError {
    #[error("Not enough score: costs {price}, have {balance}")]
    InsufficientScore { price: u32, balance: u32 },
    #[error("No shop item at index {0}")]
    UnknownItem(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    Starfield,
    Nebula,
    Sunset,
    Grid,
}

impl Background {
    pub const ALL: [Background; 4] = [
        Background::Starfield,
        Background::Nebula,
        Background::Sunset,
        Background::Grid,
    ];

    pub fn price(self) -> u32 {
        match self {
            Background::Starfield => 0,
            Background::Nebula => 20,
            Background::Sunset => 40,
            Background::Grid => 60,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Background::Starfield => "Starfield",
            Background::Nebula => "Nebula",
            Background::Sunset => "Sunset",
            Background::Grid => "Grid",
        }
    }

    fn index(self) -> usize {
        Background::ALL
            .iter()
            .position(|b| *b == self)
            .unwrap_or_default()
    }
}

/// What a successful shop action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Bought { item: Background, price: u32 },
    Selected(Background),
}

/// Owned and selected backgrounds. Lives for the whole process, across runs.
#[derive(Debug, Clone)]
pub struct Shop {
    owned: [bool; Background::ALL.len()],
    selected: Background,
}

impl Shop {
    pub fn new() -> Self {
        let mut owned = [false; Background::ALL.len()];
        owned[Background::Starfield.index()] = true;
        Shop {
            owned,
            selected: Background::Starfield,
        }
    }

    pub fn item(&self, index: usize) -> Result<Background, ShopError> {
        Background::ALL
            .get(index)
            .copied()
            .ok_or(ShopError::UnknownItem(index))
    }

    pub fn owns(&self, item: Background) -> bool {
        self.owned[item.index()]
    }

    pub fn selected(&self) -> Background {
        self.selected
    }

    /// Select an owned background, or buy and select one if the score covers it.
    /// On error nothing changes.
    pub fn purchase(
        &mut self,
        index: usize,
        scores: &mut ScoreBoard,
    ) -> Result<Purchase, ShopError> {
        let item = self.item(index)?;
        if self.owns(item) {
            self.selected = item;
            crate::debug_shop!("Selected owned background {}", item.name());
            return Ok(Purchase::Selected(item));
        }
        let price = item.price();
        let balance = scores.spend(price)?;
        self.owned[item.index()] = true;
        self.selected = item;
        crate::debug_shop!(
            "Bought background {} for {}, {} left",
            item.name(),
            price,
            balance
        );
        Ok(Purchase::Bought { item, price })
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}
