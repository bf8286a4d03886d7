use crate::card::{Card, Unit};
use crate::topic::{Direction, Quantity, Topic};

/// The master card list the game deals from: mole-count cards, molar-mass
/// cards and gas-volume cards for the same small set of substances.
pub fn standard_deck() -> Vec<Card> {
    vec![
        // mol cards
        Card::new("H₂", 2.0, Unit::Moles, -259),
        Card::new("He", 1.0, Unit::Moles, -272),
        Card::new("CH₄", 1.5, Unit::Moles, -182),
        Card::new("H₂O", 3.0, Unit::Moles, 0),
        Card::new("NH₃", 2.5, Unit::Moles, -78),
        Card::new("N₂", 1.0, Unit::Moles, -210),
        Card::new("O₂", 1.2, Unit::Moles, -218),
        Card::new("CO₂", 0.8, Unit::Moles, -57),
        // molar-mass cards (g)
        Card::new("H₂", 2.0, Unit::Grams, -259),
        Card::new("He", 4.0, Unit::Grams, -272),
        Card::new("CH₄", 16.0, Unit::Grams, -182),
        Card::new("H₂O", 18.0, Unit::Grams, 0),
        Card::new("NH₃", 17.0, Unit::Grams, -78),
        Card::new("N₂", 28.0, Unit::Grams, -210),
        Card::new("O₂", 32.0, Unit::Grams, -218),
        Card::new("CO₂", 44.0, Unit::Grams, -57),
        // volume cards (L)
        Card::new("H₂", 44.8, Unit::Liters, -259),
        Card::new("CO₂", 17.92, Unit::Liters, -57),
        Card::new("NH₃", 56.0, Unit::Liters, -78),
        Card::new("O₂", 26.88, Unit::Liters, -218),
        Card::new("N₂", 22.4, Unit::Liters, -210),
        Card::new("CH₄", 33.6, Unit::Liters, -182),
    ]
}

/// The eight round prompts. Quantity and direction are structured here at
/// definition time; the text is display-only.
pub fn standard_topics() -> Vec<Topic> {
    vec![
        Topic::new("最も質量の小さいもの", Quantity::Mass, Direction::SmallestWins),
        Topic::new("最も質量の大きいもの", Quantity::Mass, Direction::LargestWins),
        Topic::new("最もmol数の小さいもの", Quantity::Moles, Direction::SmallestWins),
        Topic::new("最もmol数の大きいもの", Quantity::Moles, Direction::LargestWins),
        Topic::new("最も体積の小さいもの", Quantity::Volume, Direction::SmallestWins),
        Topic::new("最も体積の大きいもの", Quantity::Volume, Direction::LargestWins),
        Topic::new(
            "最も融点の低いもの",
            Quantity::MeltingPoint,
            Direction::SmallestWins,
        ),
        Topic::new(
            "最も融点の高いもの",
            Quantity::MeltingPoint,
            Direction::LargestWins,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem;

    #[test]
    fn deck_covers_two_hands_of_eight() {
        assert!(standard_deck().len() >= 16);
    }

    #[test]
    fn every_deck_formula_has_a_molar_mass() {
        for card in standard_deck() {
            assert!(
                chem::molar_mass(&card.formula).is_some(),
                "missing molar mass for {}",
                card.formula
            );
        }
    }

    #[test]
    fn deck_values_are_non_negative_and_finite() {
        for card in standard_deck() {
            assert!(card.value.is_finite());
            assert!(card.value >= 0.0);
        }
    }

    #[test]
    fn topics_cover_every_quantity_in_both_directions() {
        let topics = standard_topics();
        assert_eq!(topics.len(), 8);

        for quantity in [
            Quantity::Mass,
            Quantity::Moles,
            Quantity::Volume,
            Quantity::MeltingPoint,
        ] {
            for direction in [Direction::SmallestWins, Direction::LargestWins] {
                assert!(
                    topics
                        .iter()
                        .any(|topic| topic.quantity == quantity && topic.direction == direction),
                    "missing topic for {quantity:?} {direction:?}"
                );
            }
        }
    }
}
