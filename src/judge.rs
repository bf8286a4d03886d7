use crate::card::{Card, Unit};
use crate::chem::{self, UnknownFormulaPolicy};
use crate::topic::{Direction, Quantity, Topic, evaluate};

/// Who took the round (or the match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Computer,
    Tie,
}

/// Outcome of one judged round.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JudgeResult {
    pub winner: Winner,
    /// Multi-line display text: both conversion chains plus the verdict.
    pub explanation: String,
}

/// Shows a card's value converted toward the topic's quantity, spelling out
/// the intermediate mole step where one exists, e.g.
/// `H₂O 18g = 1.00mol = 22.4L`.
pub fn conversion_display(card: &Card, topic: &Topic, policy: UnknownFormulaPolicy) -> String {
    match topic.quantity {
        Quantity::MeltingPoint => {
            format!("{} 融点 {}℃", card.formula, card.melting_point)
        }
        Quantity::Mass => match card.unit {
            Unit::Grams => format!("{} 質量 {}g", card.formula, card.value),
            _ => match chem::convert(card, Unit::Grams, policy) {
                Some(grams) => {
                    format!("{} = {}g", card.display_quantity(), trim(grams))
                }
                None => unknown_display(card),
            },
        },
        Quantity::Moles => match card.unit {
            Unit::Moles => format!("{} {}mol", card.formula, card.value),
            _ => match chem::convert(card, Unit::Moles, policy) {
                Some(moles) => {
                    format!("{} = {}mol", card.display_quantity(), trim(moles))
                }
                None => unknown_display(card),
            },
        },
        Quantity::Volume => match card.unit {
            Unit::Liters => format!("{} {}L", card.formula, card.value),
            Unit::Moles => {
                let liters = card.value * chem::MOLAR_VOLUME_L;
                format!("{} = {}L", card.display_quantity(), trim(liters))
            }
            Unit::Grams => match chem::convert(card, Unit::Moles, policy) {
                Some(moles) => {
                    let liters = moles * chem::MOLAR_VOLUME_L;
                    format!(
                        "{} = {}mol = {}L",
                        card.display_quantity(),
                        trim(moles),
                        trim(liters)
                    )
                }
                None => unknown_display(card),
            },
        },
    }
}

fn unknown_display(card: &Card) -> String {
    format!("{} (換算不可)", card.display_quantity())
}

/// Formats a converted value with at most two decimals, dropping a trailing
/// `.00` so whole litres read naturally.
fn trim(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn verdict_phrase(quantity: Quantity, direction: Direction) -> &'static str {
    match (quantity, direction) {
        (Quantity::Mass, Direction::SmallestWins) => "の方が質量が小さい",
        (Quantity::Mass, Direction::LargestWins) => "の方が質量が大きい",
        (Quantity::Moles, Direction::SmallestWins) => "の方がmol数が少ない",
        (Quantity::Moles, Direction::LargestWins) => "の方がmol数が多い",
        (Quantity::Volume, Direction::SmallestWins) => "の方が体積が小さい",
        (Quantity::Volume, Direction::LargestWins) => "の方が体積が大きい",
        (Quantity::MeltingPoint, Direction::SmallestWins) => "の方が融点が低い",
        (Quantity::MeltingPoint, Direction::LargestWins) => "の方が融点が高い",
    }
}

/// Pure round judgment: scores both cards against the topic and declares a
/// winner. Equal scores are a legitimate tie, not an error. Score, streak
/// and hand bookkeeping belong to the match controller.
pub fn judge(
    player_card: &Card,
    computer_card: &Card,
    topic: &Topic,
    policy: UnknownFormulaPolicy,
) -> JudgeResult {
    let player_score = evaluate(player_card, topic, policy);
    let computer_score = evaluate(computer_card, topic, policy);

    let winner = if player_score > computer_score {
        Winner::Player
    } else if computer_score > player_score {
        Winner::Computer
    } else {
        Winner::Tie
    };

    let mut explanation = format!(
        "あなた: {}\nコンピューター: {}",
        conversion_display(player_card, topic, policy),
        conversion_display(computer_card, topic, policy),
    );

    match winner {
        Winner::Player => {
            explanation.push_str(&format!(
                "\n→ {} {}",
                player_card.formula,
                verdict_phrase(topic.quantity, topic.direction)
            ));
        }
        Winner::Computer => {
            explanation.push_str(&format!(
                "\n→ {} {}",
                computer_card.formula,
                verdict_phrase(topic.quantity, topic.direction)
            ));
        }
        Winner::Tie => explanation.push_str("\n→ 引き分け"),
    }

    JudgeResult {
        winner,
        explanation,
    }
}
