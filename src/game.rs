use rand::Rng;

use crate::ai::select_computer_card;
use crate::card::{Card, CardId, DealError, Hand, HandCard, deal_hands};
use crate::chem::UnknownFormulaPolicy;
use crate::judge::{JudgeResult, Winner, judge};
use crate::topic::{Topic, pick_random_topic};

/// Tunable match parameters. Everything the round loop reads comes from
/// here rather than from constants buried in the logic.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    /// First to this many round wins takes the match.
    pub target_score: u32,
    /// Cards dealt to each side.
    pub hand_size: usize,
    /// Countdown length for the thinking phase, in seconds.
    pub round_seconds: u32,
    /// How conversions treat formulas missing from the molar-mass table.
    pub unknown_formula: UnknownFormulaPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 3,
            hand_size: 8,
            round_seconds: 10,
            unknown_formula: UnknownFormulaPolicy::default(),
        }
    }
}

/// Linear-with-loop round lifecycle. `Revealing` loops back through
/// `start_round` until a terminal condition moves the match to `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waiting,
    Thinking,
    Revealing,
    Finished,
}

/// Everything the presentation layer needs after a judged round.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundOutcome {
    pub player_card: HandCard,
    pub computer_card: HandCard,
    pub result: JudgeResult,
    pub player_score: u32,
    pub computer_score: u32,
}

/// Match verdict once the terminal phase is reached.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FinalResult {
    pub winner: Winner,
    pub message: String,
}

/// Read-only view of the match for rendering, produced after every mutation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchSnapshot<'a> {
    pub phase: Phase,
    pub player_score: u32,
    pub computer_score: u32,
    pub win_streak: u32,
    pub time_left: u32,
    pub current_topic: Option<&'a Topic>,
    pub player_selection: Option<CardId>,
    pub player_hand: &'a Hand,
    pub computer_hand: &'a Hand,
}

/// The round orchestrator: two hands, cumulative scores, the win streak and
/// the in-flight round. All mutation goes through the named transitions
/// below; there is no other way to touch the state.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    player_hand: Hand,
    computer_hand: Hand,
    player_score: u32,
    computer_score: u32,
    win_streak: u32,
    phase: Phase,
    current_topic: Option<Topic>,
    player_selection: Option<CardId>,
    time_left: u32,
    // Bumped on every transition that invalidates the running countdown, so
    // a late tick from a cancelled timer cannot fire a second auto-pick.
    timer_epoch: u64,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            player_hand: Hand::default(),
            computer_hand: Hand::default(),
            player_score: 0,
            computer_score: 0,
            win_streak: 0,
            phase: Phase::Waiting,
            current_topic: None,
            player_selection: None,
            time_left: 0,
            timer_epoch: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    pub fn win_streak(&self) -> u32 {
        self.win_streak
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn current_topic(&self) -> Option<&Topic> {
        self.current_topic.as_ref()
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn computer_hand(&self) -> &Hand {
        &self.computer_hand
    }

    /// Epoch expected by [`Game::tick`]; a countdown started earlier than
    /// the last invalidation carries a stale epoch and is ignored.
    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    pub fn snapshot(&self) -> MatchSnapshot<'_> {
        MatchSnapshot {
            phase: self.phase,
            player_score: self.player_score,
            computer_score: self.computer_score,
            win_streak: self.win_streak,
            time_left: self.time_left,
            current_topic: self.current_topic.as_ref(),
            player_selection: self.player_selection,
            player_hand: &self.player_hand,
            computer_hand: &self.computer_hand,
        }
    }

    /// Shuffles the master list and deals both hands fresh.
    pub fn deal<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        master_cards: &[Card],
    ) -> Result<(), DealError> {
        let (player, computer) = deal_hands(rng, master_cards, self.config.hand_size)?;
        self.player_hand = player;
        self.computer_hand = computer;
        self.current_topic = None;
        self.player_selection = None;
        self.time_left = 0;
        self.timer_epoch += 1;
        self.phase = Phase::Waiting;
        Ok(())
    }

    /// Opens the next round: picks a random topic, arms the countdown and
    /// moves to `Thinking`. Returns the timer epoch the caller must pass to
    /// [`Game::tick`], or `None` when no further round can start (the match
    /// is finished, a round is already running, or a hand ran dry — the
    /// latter flips the phase to `Finished` on the spot).
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        topics: &[Topic],
    ) -> Option<u64> {
        match self.phase {
            Phase::Waiting | Phase::Revealing => {}
            Phase::Thinking | Phase::Finished => return None,
        }

        if self.player_hand.is_empty() || self.computer_hand.is_empty() {
            self.phase = Phase::Finished;
            return None;
        }

        let topic = pick_random_topic(rng, topics)?.clone();
        self.current_topic = Some(topic);
        self.player_selection = None;
        self.time_left = self.config.round_seconds;
        self.timer_epoch += 1;
        self.phase = Phase::Thinking;
        Some(self.timer_epoch)
    }

    /// Records the player's pick during the thinking phase. Returns whether
    /// the selection was accepted.
    pub fn select_player_card(&mut self, id: CardId) -> bool {
        if self.phase != Phase::Thinking || !self.player_hand.contains(id) {
            return false;
        }
        self.player_selection = Some(id);
        true
    }

    /// One-second countdown callback. Calls carrying a stale epoch, or
    /// arriving outside the thinking phase, are ignored; reaching zero
    /// plays the round through the timeout fallback exactly once.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, epoch: u64) -> Option<RoundOutcome> {
        if epoch != self.timer_epoch || self.phase != Phase::Thinking {
            return None;
        }

        if self.time_left > 1 {
            self.time_left -= 1;
            return None;
        }

        self.time_left = 0;
        self.play_round(rng)
    }

    /// Fixes both cards, judges the round and applies the outcome: winner
    /// score +1, streak update, both played cards removed from their hands.
    /// A defensive no-op (`None`) when no round is in flight.
    pub fn play_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RoundOutcome> {
        if self.phase != Phase::Thinking {
            return None;
        }
        let topic = self.current_topic.clone()?;

        let player_id = self
            .player_selection
            .filter(|id| self.player_hand.contains(*id))
            .or_else(|| self.player_hand.pick_random(rng).map(|held| held.id))?;
        let computer_id = select_computer_card(
            rng,
            &self.computer_hand,
            &topic,
            self.win_streak,
            self.config.unknown_formula,
        )?;

        let player_card = self.player_hand.take(player_id)?;
        let computer_card = self.computer_hand.take(computer_id)?;

        let result = judge(
            &player_card.card,
            &computer_card.card,
            &topic,
            self.config.unknown_formula,
        );

        match result.winner {
            Winner::Player => {
                self.player_score += 1;
                self.win_streak += 1;
            }
            Winner::Computer => {
                self.computer_score += 1;
                self.win_streak = 0;
            }
            Winner::Tie => self.win_streak = 0,
        }

        self.player_selection = None;
        self.time_left = 0;
        self.timer_epoch += 1;
        self.phase = Phase::Revealing;

        Some(RoundOutcome {
            player_card,
            computer_card,
            result,
            player_score: self.player_score,
            computer_score: self.computer_score,
        })
    }

    /// Moves to `Finished` the instant either score reaches the target or
    /// either hand is exhausted. Returns whether the match is over.
    pub fn check_match_end(&mut self) -> bool {
        if self.phase == Phase::Finished {
            return true;
        }

        let score_reached = self.player_score >= self.config.target_score
            || self.computer_score >= self.config.target_score;
        let hand_exhausted = self.player_hand.is_empty() || self.computer_hand.is_empty();

        if score_reached || hand_exhausted {
            self.timer_epoch += 1;
            self.phase = Phase::Finished;
            return true;
        }

        false
    }

    /// Match verdict. On hand exhaustion the cumulative scores decide, and
    /// equal scores are an honest tie.
    pub fn final_result(&self) -> FinalResult {
        if self.player_score >= self.config.target_score {
            FinalResult {
                winner: Winner::Player,
                message: "🎊 おめでとうございます！\nあなたの勝利です！".to_string(),
            }
        } else if self.computer_score >= self.config.target_score {
            FinalResult {
                winner: Winner::Computer,
                message: "💻 コンピューターの勝利です。\n次回頑張りましょう！".to_string(),
            }
        } else if self.player_score > self.computer_score {
            FinalResult {
                winner: Winner::Player,
                message: "🎊 カードが尽きました！\nスコア勝ちです！".to_string(),
            }
        } else if self.computer_score > self.player_score {
            FinalResult {
                winner: Winner::Computer,
                message: "💻 カードが尽きました。\nコンピューターのスコア勝ちです。".to_string(),
            }
        } else {
            FinalResult {
                winner: Winner::Tie,
                message: "🤝 カードが尽きました。\n引き分けです！".to_string(),
            }
        }
    }

    /// Fresh match within the same sitting: scores and hands are rebuilt,
    /// the win streak carries over.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        master_cards: &[Card],
    ) -> Result<(), DealError> {
        self.player_score = 0;
        self.computer_score = 0;
        self.deal(rng, master_cards)
    }

    /// Return-to-title reset: additionally zeroes the win streak so the
    /// adaptive difficulty cannot be farmed across sittings.
    pub fn full_reset(&mut self) {
        self.player_score = 0;
        self.computer_score = 0;
        self.win_streak = 0;
        self.player_hand.clear();
        self.computer_hand.clear();
        self.current_topic = None;
        self.player_selection = None;
        self.time_left = 0;
        self.timer_epoch += 1;
        self.phase = Phase::Waiting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{standard_deck, standard_topics};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dealt_game(seed: u64) -> (Game, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(GameConfig::default());
        game.deal(&mut rng, &standard_deck()).expect("standard deck fills two hands");
        (game, rng)
    }

    #[test]
    fn new_game_starts_waiting_with_zeroed_scores() {
        let game = Game::new(GameConfig::default());
        assert_eq!(game.phase(), Phase::Waiting);
        assert_eq!(game.player_score(), 0);
        assert_eq!(game.computer_score(), 0);
        assert!(game.current_topic().is_none());
    }

    #[test]
    fn start_round_arms_the_countdown() {
        let (mut game, mut rng) = dealt_game(11);
        let topics = standard_topics();

        let epoch = game.start_round(&mut rng, &topics).expect("round should open");
        assert_eq!(game.phase(), Phase::Thinking);
        assert_eq!(game.time_left(), 10);
        assert_eq!(epoch, game.timer_epoch());
        assert!(game.current_topic().is_some());
    }

    #[test]
    fn start_round_refuses_while_thinking() {
        let (mut game, mut rng) = dealt_game(11);
        let topics = standard_topics();

        game.start_round(&mut rng, &topics).expect("round should open");
        assert!(game.start_round(&mut rng, &topics).is_none());
    }

    #[test]
    fn selection_requires_thinking_phase_and_held_card() {
        let (mut game, mut rng) = dealt_game(12);
        let topics = standard_topics();

        let held = game.player_hand().iter().next().expect("hand was dealt").id;
        assert!(!game.select_player_card(held), "waiting phase rejects picks");

        game.start_round(&mut rng, &topics).expect("round should open");
        assert!(game.select_player_card(held));
        assert!(!game.select_player_card(CardId(9999)));
    }

    #[test]
    fn tick_counts_down_and_fires_timeout_once() {
        let (mut game, mut rng) = dealt_game(13);
        let topics = standard_topics();
        let epoch = game.start_round(&mut rng, &topics).expect("round should open");

        for expected in (1..10).rev() {
            assert!(game.tick(&mut rng, epoch).is_none());
            assert_eq!(game.time_left(), expected);
        }

        let outcome = game.tick(&mut rng, epoch);
        assert!(outcome.is_some(), "final tick plays the round");
        assert_eq!(game.phase(), Phase::Revealing);

        // The firing tick invalidated the epoch; a straggler does nothing.
        assert!(game.tick(&mut rng, epoch).is_none());
    }

    #[test]
    fn stale_epoch_after_manual_play_is_ignored() {
        let (mut game, mut rng) = dealt_game(14);
        let topics = standard_topics();
        let epoch = game.start_round(&mut rng, &topics).expect("round should open");

        let held = game.player_hand().iter().next().expect("hand was dealt").id;
        game.select_player_card(held);
        game.play_round(&mut rng).expect("manual play resolves the round");
        assert_eq!(game.phase(), Phase::Revealing);

        assert!(game.tick(&mut rng, epoch).is_none());
        assert_eq!(game.phase(), Phase::Revealing);
    }

    #[test]
    fn play_round_removes_exactly_one_card_per_side() {
        let (mut game, mut rng) = dealt_game(15);
        let topics = standard_topics();
        game.start_round(&mut rng, &topics).expect("round should open");

        let outcome = game.play_round(&mut rng).expect("round should resolve");
        assert_eq!(game.player_hand().len(), 7);
        assert_eq!(game.computer_hand().len(), 7);
        assert!(!game.player_hand().contains(outcome.player_card.id));
        assert!(!game.computer_hand().contains(outcome.computer_card.id));
    }

    #[test]
    fn play_round_without_topic_is_a_no_op() {
        let (mut game, mut rng) = dealt_game(16);
        assert!(game.play_round(&mut rng).is_none());
        assert_eq!(game.phase(), Phase::Waiting);
    }

    #[test]
    fn streak_resets_on_computer_win_or_tie() {
        let (mut game, _) = dealt_game(17);
        game.win_streak = 4;

        // Exercise the bookkeeping directly through judged outcomes.
        game.phase = Phase::Thinking;
        game.current_topic = Some(standard_topics()[0].clone());

        let mut rng = StdRng::seed_from_u64(17);
        let outcome = game.play_round(&mut rng).expect("round should resolve");
        match outcome.result.winner {
            Winner::Player => assert_eq!(game.win_streak(), 5),
            Winner::Computer | Winner::Tie => assert_eq!(game.win_streak(), 0),
        }
    }

    #[test]
    fn reset_preserves_streak_and_full_reset_clears_it() {
        let (mut game, mut rng) = dealt_game(18);
        game.win_streak = 7;
        game.player_score = 2;

        game.reset(&mut rng, &standard_deck()).expect("reset redeals");
        assert_eq!(game.win_streak(), 7);
        assert_eq!(game.player_score(), 0);
        assert_eq!(game.player_hand().len(), 8);

        game.full_reset();
        assert_eq!(game.win_streak(), 0);
        assert!(game.player_hand().is_empty());
        assert_eq!(game.phase(), Phase::Waiting);
    }

    #[test]
    fn match_ends_at_target_score() {
        let (mut game, _) = dealt_game(19);
        game.player_score = 3;

        assert!(game.check_match_end());
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.final_result().winner, Winner::Player);
    }

    #[test]
    fn exhausted_hands_fall_back_to_score_comparison() {
        let mut game = Game::new(GameConfig::default());
        game.player_score = 2;
        game.computer_score = 1;

        assert!(game.check_match_end(), "empty hands end the match");
        let result = game.final_result();
        assert_eq!(result.winner, Winner::Player);
        assert!(result.message.contains("カードが尽きました"));
    }

    #[test]
    fn equal_scores_at_exhaustion_are_a_tie() {
        let mut game = Game::new(GameConfig::default());
        assert!(game.check_match_end());
        assert_eq!(game.final_result().winner, Winner::Tie);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let (mut game, mut rng) = dealt_game(20);
        let topics = standard_topics();
        game.start_round(&mut rng, &topics).expect("round should open");

        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, Phase::Thinking);
        assert_eq!(snapshot.time_left, 10);
        assert_eq!(snapshot.player_hand.len(), 8);
        assert!(snapshot.current_topic.is_some());

        let json = serde_json::to_string(&snapshot).expect("snapshot should serialize");
        assert!(json.contains("\"phase\":\"thinking\""));
    }
}
