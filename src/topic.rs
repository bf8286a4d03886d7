use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::chem::{self, UnknownFormulaPolicy};

/// Derived property a topic compares on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Quantity {
    Mass,
    Moles,
    Volume,
    MeltingPoint,
}

/// Which side of the comparison wins the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    SmallestWins,
    LargestWins,
}

/// A round prompt. `text` is what the screen shows; evaluation reads only
/// the structured `quantity` and `direction` fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Topic {
    pub text: String,
    pub quantity: Quantity,
    pub direction: Direction,
}

impl Topic {
    pub fn new(text: impl Into<String>, quantity: Quantity, direction: Direction) -> Self {
        Self {
            text: text.into(),
            quantity,
            direction,
        }
    }
}

/// Uniform random topic for the next round.
pub fn pick_random_topic<'a, R: Rng + ?Sized>(rng: &mut R, topics: &'a [Topic]) -> Option<&'a Topic> {
    topics.choose(rng)
}

/// Ceiling for mass/mole/volume scores; above any converted card value.
const VALUE_SCORE_CEILING: f64 = 1000.0;
/// Offset keeping melting-point scores positive on both directions.
const MELTING_POINT_OFFSET: f64 = 3000.0;
/// Score for a card that cannot be converted under the active policy.
const INVALID_SCORE: f64 = -1.0;

/// Scores a card against a topic; strictly higher means better for the
/// topic regardless of direction.
///
/// Smallest-wins topics flip the converted value below a fixed ceiling so
/// the judge can keep a single "higher score wins" rule.
pub fn evaluate(card: &Card, topic: &Topic, policy: UnknownFormulaPolicy) -> f64 {
    let Some(converted) = chem::convert_quantity(card, topic.quantity, policy) else {
        return INVALID_SCORE;
    };

    match (topic.quantity, topic.direction) {
        (Quantity::MeltingPoint, Direction::SmallestWins) => MELTING_POINT_OFFSET - converted,
        (Quantity::MeltingPoint, Direction::LargestWins) => converted + MELTING_POINT_OFFSET,
        (_, Direction::SmallestWins) => VALUE_SCORE_CEILING - converted,
        (_, Direction::LargestWins) => converted,
    }
}
