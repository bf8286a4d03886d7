use rand::Rng;

use crate::card::{CardId, Hand};
use crate::chem::UnknownFormulaPolicy;
use crate::topic::{Topic, evaluate};

/// Probability that the computer ignores its best card and plays randomly,
/// derived from the player's current win streak. Long streaks tighten the
/// opponent up to fully deterministic play.
pub fn randomness_for_streak(win_streak: u32) -> f64 {
    match win_streak {
        0..=5 => 0.30,
        6..=10 => 0.25,
        11..=15 => 0.20,
        16..=20 => 0.15,
        21..=25 => 0.10,
        26..=30 => 0.05,
        _ => 0.0,
    }
}

/// Picks the computer's card for the round.
///
/// With probability [`randomness_for_streak`] the pick is uniform random;
/// otherwise it is the highest-scoring card for the topic, ties broken by
/// the first (lowest-index) card found. Returns `None` only for an empty
/// hand.
pub fn select_computer_card<R: Rng + ?Sized>(
    rng: &mut R,
    hand: &Hand,
    topic: &Topic,
    win_streak: u32,
    policy: UnknownFormulaPolicy,
) -> Option<CardId> {
    if hand.is_empty() {
        return None;
    }

    if rng.gen_range(0.0..1.0) < randomness_for_streak(win_streak) {
        return hand.pick_random(rng).map(|held| held.id);
    }

    let mut best: Option<(CardId, f64)> = None;
    for held in hand.iter() {
        let score = evaluate(&held.card, topic, policy);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((held.id, score)),
        }
    }

    best.map(|(id, _)| id)
}
