use std::fmt;

use log::debug;

use crate::difficulty::Difficulty;

/// How many food cells are on the board at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FoodCount {
    #[default]
    One,
    Two,
    Three,
}

impl FoodCount {
    pub const ALL: [FoodCount; 3] = [FoodCount::One, FoodCount::Two, FoodCount::Three];

    pub const MAX: usize = 3;

    pub fn get(self) -> usize {
        match self {
            FoodCount::One => 1,
            FoodCount::Two => 2,
            FoodCount::Three => 3,
        }
    }

    pub fn from_count(count: usize) -> Option<FoodCount> {
        match count {
            1 => Some(FoodCount::One),
            2 => Some(FoodCount::Two),
            3 => Some(FoodCount::Three),
            _ => None,
        }
    }
}

/// The player's pre-game choices. Survives a trip back to the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuSelection {
    pub difficulty: Option<Difficulty>,
    pub food_count: FoodCount,
}

impl fmt::Display for MenuSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let difficulty = self.difficulty.map_or("None", Difficulty::label);
        write!(
            f,
            "Selected: difficulty={}, foods={}",
            difficulty,
            self.food_count.get()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    SelectDifficulty(Difficulty),
    SelectFoodCount(FoodCount),
    Confirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Updated,
    Confirmed(MenuSelection),
}

#[derive(Clone, Debug, Default)]
pub struct MenuController {
    selection: MenuSelection,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> MenuSelection {
        self.selection
    }

    /// Either half of the selection can change any number of times before
    /// `Confirm`; confirming always succeeds.
    pub fn handle(&mut self, event: MenuEvent) -> MenuOutcome {
        match event {
            MenuEvent::SelectDifficulty(difficulty) => {
                self.selection.difficulty = Some(difficulty);
                debug!("Menu: difficulty {}", difficulty);
                MenuOutcome::Updated
            }
            MenuEvent::SelectFoodCount(count) => {
                self.selection.food_count = count;
                debug!("Menu: food count {}", count.get());
                MenuOutcome::Updated
            }
            MenuEvent::Confirm => MenuOutcome::Confirmed(self.selection),
        }
    }
}
