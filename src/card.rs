use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

/// Unit in which a card states its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "mol")]
    Moles,
    #[serde(rename = "L")]
    Liters,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Moles => "mol",
            Unit::Liters => "L",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One playable unit of chemistry data.
///
/// Immutable after creation; hands track instances via [`CardId`] so the
/// same value may legally appear twice in one hand.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Card {
    /// Chemical formula, the key into the molar-mass table.
    pub formula: String,
    /// Declared quantity in `unit`. Non-negative and finite.
    pub value: f64,
    /// Unit the quantity is stated in.
    pub unit: Unit,
    /// Melting point in °C, present regardless of unit.
    pub melting_point: i32,
}

impl Card {
    pub fn new(formula: impl Into<String>, value: f64, unit: Unit, melting_point: i32) -> Self {
        Self {
            formula: formula.into(),
            value,
            unit,
            melting_point,
        }
    }

    /// Compact label such as `H₂O 18g`, used in explanations.
    pub fn display_quantity(&self) -> String {
        format!("{} {}{}", self.formula, self.value, self.unit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (融点 {}℃)", self.display_quantity(), self.melting_point)
    }
}

/// Per-deal instance id. Removal from a hand goes through this id, never
/// through value equality, so duplicate-valued cards stay unambiguous.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct CardId(pub u32);

/// A card together with its id inside an owning hand.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HandCard {
    pub id: CardId,
    pub card: Card,
}

/// One player's cards for the current match.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hand {
    cards: Vec<HandCard>,
}

impl Hand {
    pub fn new(cards: Vec<HandCard>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandCard> {
        self.cards.iter()
    }

    pub fn get(&self, id: CardId) -> Option<&HandCard> {
        self.cards.iter().find(|held| held.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    /// Removes and returns the card with the given id, if held.
    pub fn take(&mut self, id: CardId) -> Option<HandCard> {
        let position = self.cards.iter().position(|held| held.id == id)?;
        Some(self.cards.remove(position))
    }

    /// Uniform random pick, used for the timeout fallback.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&HandCard> {
        self.cards.choose(rng)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DealError {
    #[error("dealing two hands of {hand_size} needs {required} cards but the deck has {available}")]
    DeckTooSmall {
        hand_size: usize,
        required: usize,
        available: usize,
    },
}

/// Shuffles the master list and splits two disjoint hands off the top.
///
/// Ids are assigned per deal, so the two hands never share an instance even
/// when the master list contains duplicate values.
pub fn deal_hands<R: Rng + ?Sized>(
    rng: &mut R,
    master_cards: &[Card],
    hand_size: usize,
) -> Result<(Hand, Hand), DealError> {
    let required = hand_size * 2;
    if master_cards.len() < required {
        return Err(DealError::DeckTooSmall {
            hand_size,
            required,
            available: master_cards.len(),
        });
    }

    let mut deck: Vec<Card> = master_cards.to_vec();
    deck.shuffle(rng);

    let mut next_id = 0u32;
    let mut draw = |cards: &mut Vec<Card>| {
        let mut hand = Vec::with_capacity(hand_size);
        for card in cards.drain(..hand_size) {
            hand.push(HandCard {
                id: CardId(next_id),
                card,
            });
            next_id += 1;
        }
        Hand::new(hand)
    };

    let player = draw(&mut deck);
    let computer = draw(&mut deck);

    Ok((player, computer))
}
