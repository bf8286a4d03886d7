pub mod ai;
pub mod card;
pub mod chem;
pub mod data;
pub mod game;
pub mod judge;
pub mod road;
pub mod topic;
pub mod wasm;

pub use ai::{randomness_for_streak, select_computer_card};
pub use card::{Card, CardId, DealError, Hand, HandCard, Unit, deal_hands};
pub use chem::{MOLAR_VOLUME_L, UnknownFormulaPolicy, convert, convert_quantity, molar_mass};
pub use data::{standard_deck, standard_topics};
pub use game::{FinalResult, Game, GameConfig, MatchSnapshot, Phase, RoundOutcome};
pub use judge::{JudgeResult, Winner, conversion_display, judge};
pub use road::BattleRoad;
pub use topic::{Direction, Quantity, Topic, evaluate, pick_random_topic};
