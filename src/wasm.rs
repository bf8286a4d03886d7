#![cfg(target_arch = "wasm32")]

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

use crate::card::{Card, CardId};
use crate::data::{standard_deck, standard_topics};
use crate::game::{Game, GameConfig};
use crate::topic::Topic;

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Browser-facing handle over one running match. Every method returns the
/// post-mutation state as JSON so the screen layer can render without
/// reaching into engine types.
#[wasm_bindgen]
pub struct GameHandle {
    game: Game,
    rng: StdRng,
    deck: Vec<Card>,
    topics: Vec<Topic>,
}

#[wasm_bindgen]
impl GameHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GameHandle {
        console_error_panic_hook::set_once();
        GameHandle {
            game: Game::new(GameConfig::default()),
            rng: StdRng::from_entropy(),
            deck: standard_deck(),
            topics: standard_topics(),
        }
    }

    pub fn deal(&mut self) -> String {
        let _ = self.game.deal(&mut self.rng, &self.deck);
        self.snapshot()
    }

    /// Opens a round; the returned snapshot carries the topic and the timer
    /// epoch the page's interval must echo back into `tick`.
    pub fn start_round(&mut self) -> String {
        let _ = self.game.start_round(&mut self.rng, &self.topics);
        self.snapshot()
    }

    pub fn timer_epoch(&self) -> u64 {
        self.game.timer_epoch()
    }

    pub fn select_player_card(&mut self, card_id: u32) -> bool {
        self.game.select_player_card(CardId(card_id))
    }

    /// One-second countdown step. Returns the round outcome as JSON when
    /// the timeout fired, otherwise `null`.
    pub fn tick(&mut self, epoch: u64) -> String {
        to_json(&self.game.tick(&mut self.rng, epoch))
    }

    pub fn play_round(&mut self) -> String {
        to_json(&self.game.play_round(&mut self.rng))
    }

    pub fn check_match_end(&mut self) -> bool {
        self.game.check_match_end()
    }

    pub fn final_result(&self) -> String {
        to_json(&self.game.final_result())
    }

    pub fn reset(&mut self) -> String {
        let _ = self.game.reset(&mut self.rng, &self.deck);
        self.snapshot()
    }

    pub fn full_reset(&mut self) -> String {
        self.game.full_reset();
        self.snapshot()
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.game.snapshot())
    }
}

impl Default for GameHandle {
    fn default() -> Self {
        Self::new()
    }
}
