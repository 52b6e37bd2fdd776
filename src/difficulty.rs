use std::fmt;
use std::time::Duration;

/// Named speed presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Insane,
    ];

    /// Used when the player never picks one.
    pub const DEFAULT: Difficulty = Difficulty::Normal;

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }

    /// Menu slot, 1-based.
    pub fn from_index(index: u8) -> Option<Difficulty> {
        match index {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            4 => Some(Difficulty::Insane),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
            Difficulty::Insane => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tick interval per preset, in milliseconds. Lower is faster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyTable {
    pub easy_ms: u64,
    pub normal_ms: u64,
    pub hard_ms: u64,
    pub insane_ms: u64,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy_ms: 120,
            normal_ms: 80,
            hard_ms: 55,
            insane_ms: 35,
        }
    }
}

impl DifficultyTable {
    pub fn millis(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => self.easy_ms,
            Difficulty::Normal => self.normal_ms,
            Difficulty::Hard => self.hard_ms,
            Difficulty::Insane => self.insane_ms,
        }
    }

    pub fn interval(&self, difficulty: Difficulty) -> Duration {
        Duration::from_millis(self.millis(difficulty))
    }
}

/// Reports how long the scheduler should wait between ticks.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyClock {
    table: DifficultyTable,
    selected: Option<Difficulty>,
}

impl DifficultyClock {
    pub fn new(table: DifficultyTable) -> Self {
        Self {
            table,
            selected: None,
        }
    }

    pub fn select(&mut self, difficulty: Option<Difficulty>) {
        self.selected = difficulty;
    }

    pub fn selected(&self) -> Option<Difficulty> {
        self.selected
    }

    pub fn interval(&self) -> Duration {
        self.table
            .interval(self.selected.unwrap_or(Difficulty::DEFAULT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_intervals() {
        let table = DifficultyTable::default();
        assert_eq!(table.interval(Difficulty::Easy), Duration::from_millis(120));
        assert_eq!(table.interval(Difficulty::Normal), Duration::from_millis(80));
        assert_eq!(table.interval(Difficulty::Hard), Duration::from_millis(55));
        assert_eq!(table.interval(Difficulty::Insane), Duration::from_millis(35));
    }

    #[test]
    fn test_harder_is_faster() {
        let table = DifficultyTable::default();
        for pair in Difficulty::ALL.windows(2) {
            assert!(table.millis(pair[0]) > table.millis(pair[1]));
        }
    }

    #[test]
    fn test_unselected_clock_runs_at_normal() {
        let clock = DifficultyClock::new(DifficultyTable::default());
        assert_eq!(clock.selected(), None);
        assert_eq!(clock.interval(), Duration::from_millis(80));
    }

    #[test]
    fn test_selection_changes_interval() {
        let mut clock = DifficultyClock::new(DifficultyTable::default());
        clock.select(Some(Difficulty::Insane));
        assert_eq!(clock.interval(), Duration::from_millis(35));

        clock.select(None);
        assert_eq!(clock.interval(), Duration::from_millis(80));
    }

    #[test]
    fn test_menu_index_roundtrip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_index(difficulty.index()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_index(0), None);
        assert_eq!(Difficulty::from_index(5), None);
    }
}
