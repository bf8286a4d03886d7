/// Element ladder the battle road climbs, in atomic-number order.
const ELEMENT_LADDER: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe",
];

const STARTING_LIFE: u32 = 2;

/// Campaign progression across the element ladder: each match is fought
/// "against" the current element, a victory advances one element, a defeat
/// costs a life. A retry re-fights the same element with the reduced life.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BattleRoad {
    stage: usize,
    wins: u32,
    life: u32,
    total_wins: u32,
}

impl Default for BattleRoad {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRoad {
    pub fn new() -> Self {
        Self {
            stage: 0,
            wins: 0,
            life: STARTING_LIFE,
            total_wins: 0,
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn total_wins(&self) -> u32 {
        self.total_wins
    }

    /// Symbol of the element currently being fought; `None` once the ladder
    /// is cleared.
    pub fn current_element(&self) -> Option<&'static str> {
        ELEMENT_LADDER.get(self.stage).copied()
    }

    pub fn record_victory(&mut self) {
        self.stage += 1;
        self.wins += 1;
        self.total_wins += 1;
    }

    pub fn record_defeat(&mut self) {
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_defeated(&self) -> bool {
        self.life == 0
    }

    /// The run is cleared once every element through Xe has been beaten.
    pub fn is_clear(&self) -> bool {
        self.stage >= ELEMENT_LADDER.len()
    }

    /// Return-to-title: everything is zeroed, including the lifetime win
    /// counter, so a run cannot be resumed from the title screen.
    pub fn reset_to_title(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_road_starts_at_hydrogen_with_two_lives() {
        let road = BattleRoad::new();
        assert_eq!(road.current_element(), Some("H"));
        assert_eq!(road.life(), 2);
        assert_eq!(road.total_wins(), 0);
        assert!(!road.is_clear());
    }

    #[test]
    fn victory_advances_exactly_one_element() {
        let mut road = BattleRoad::new();
        road.record_victory();

        assert_eq!(road.current_element(), Some("He"));
        assert_eq!(road.wins(), 1);
        assert_eq!(road.total_wins(), 1);
    }

    #[test]
    fn two_defeats_exhaust_the_run() {
        let mut road = BattleRoad::new();
        road.record_defeat();
        assert!(!road.is_defeated());

        road.record_defeat();
        assert!(road.is_defeated());

        // Defeat keeps the stage; a retry re-fights the same element.
        assert_eq!(road.current_element(), Some("H"));
    }

    #[test]
    fn clearing_the_ladder_takes_every_element_through_xenon() {
        let mut road = BattleRoad::new();
        for _ in 0..ELEMENT_LADDER.len() {
            assert!(!road.is_clear());
            road.record_victory();
        }

        assert!(road.is_clear());
        assert_eq!(road.current_element(), None);
        assert_eq!(road.total_wins(), 54);
    }

    #[test]
    fn reset_to_title_zeroes_everything() {
        let mut road = BattleRoad::new();
        road.record_victory();
        road.record_victory();
        road.record_defeat();

        road.reset_to_title();
        assert_eq!(road, BattleRoad::new());
    }
}
