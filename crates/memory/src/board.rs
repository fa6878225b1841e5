/// Face of a memory card: either the word or the class it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFace {
    Word(&'static str),
    Class(&'static str),
}

impl CardFace {
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Word(text) | Self::Class(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCard {
    pub pair: usize,
    pub face: CardFace,
    pub face_up: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipResult {
    /// Card was already up, locked, or two cards are waiting to be judged.
    Ignored,
    First,
    Matched { completed: bool },
    Mismatched,
}

/// The table of cards and the turn in progress.
#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    cards: Vec<BoardCard>,
    face_up: Vec<usize>,
}

impl MemoryBoard {
    /// Lays out two cards per pair (word and class), in `order`.
    pub fn new(pairs: &[(&'static str, &'static str)], order: &[usize]) -> Self {
        let mut cards = Vec::with_capacity(pairs.len() * 2);
        for (pair, (word, class)) in pairs.iter().enumerate() {
            cards.push(BoardCard {
                pair,
                face: CardFace::Word(word),
                face_up: false,
                locked: false,
            });
            cards.push(BoardCard {
                pair,
                face: CardFace::Class(class),
                face_up: false,
                locked: false,
            });
        }
        let cards = order
            .iter()
            .filter_map(|&index| cards.get(index).cloned())
            .collect();
        Self {
            cards,
            face_up: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[BoardCard] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&BoardCard> {
        self.cards.get(index)
    }

    pub fn show_all(&mut self, face_up: bool) {
        for card in &mut self.cards {
            card.face_up = face_up || card.locked;
        }
    }

    /// Two unmatched cards are up and waiting to be turned back.
    pub fn awaiting_flip_back(&self) -> bool {
        self.face_up.len() == 2
    }

    pub fn flip(&mut self, index: usize) -> FlipResult {
        if self.awaiting_flip_back() {
            return FlipResult::Ignored;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipResult::Ignored;
        };
        if card.face_up || card.locked {
            return FlipResult::Ignored;
        }
        card.face_up = true;
        self.face_up.push(index);

        let [first, second] = self.face_up[..] else {
            return FlipResult::First;
        };
        let same_pair = self
            .cards
            .get(first)
            .zip(self.cards.get(second))
            .is_some_and(|(a, b)| a.pair == b.pair);

        if same_pair {
            for index in self.face_up.drain(..) {
                if let Some(card) = self.cards.get_mut(index) {
                    card.locked = true;
                }
            }
            FlipResult::Matched {
                completed: self.all_matched(),
            }
        } else {
            FlipResult::Mismatched
        }
    }

    pub fn flip_back_unmatched(&mut self) {
        for index in self.face_up.drain(..) {
            if let Some(card) = self.cards.get_mut(index) {
                if !card.locked {
                    card.face_up = false;
                }
            }
        }
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.locked)
    }
}

#[cfg(test)]
mod tests {
    use morfo_core::round::{GameKind, GameRoundState, LifeRule};

    use super::*;

    const PAIRS: &[(&str, &str)] = &[("casa", "substantivo"), ("correr", "verbo")];

    // word0, class0, word1, class1
    fn board() -> MemoryBoard {
        MemoryBoard::new(PAIRS, &[0, 1, 2, 3])
    }

    #[test]
    fn matching_pair_locks_and_completes() {
        let mut board = board();
        assert_eq!(board.flip(0), FlipResult::First);
        assert_eq!(board.flip(1), FlipResult::Matched { completed: false });
        assert!(board.card(0).unwrap().locked);

        board.flip(2);
        assert_eq!(board.flip(3), FlipResult::Matched { completed: true });
        assert!(board.all_matched());
    }

    #[test]
    fn mismatch_waits_for_flip_back() {
        let mut board = board();
        board.flip(0);
        assert_eq!(board.flip(3), FlipResult::Mismatched);
        assert_eq!(board.flip(1), FlipResult::Ignored);

        board.flip_back_unmatched();
        assert!(!board.card(0).unwrap().face_up);
        assert!(!board.card(3).unwrap().face_up);
        assert_eq!(board.flip(1), FlipResult::First);
    }

    #[test]
    fn flipping_the_same_card_twice_is_ignored() {
        let mut board = board();
        board.flip(2);
        assert_eq!(board.flip(2), FlipResult::Ignored);
        assert_eq!(board.flip(42), FlipResult::Ignored);
    }

    #[test]
    fn preview_reveal_keeps_locked_cards_up() {
        let mut board = board();
        board.show_all(true);
        assert!(board.cards().iter().all(|card| card.face_up));

        board.show_all(false);
        board.flip(0);
        board.flip(1);
        board.show_all(false);
        assert!(board.card(0).unwrap().face_up);
        assert!(!board.card(2).unwrap().face_up);
    }

    #[test]
    fn ten_mismatches_cost_one_star() {
        let mut board = board();
        let mut round = GameRoundState::new(
            GameKind::Memory,
            1,
            LifeRule::EveryNErrors(10),
            core::time::Duration::ZERO,
        );

        for attempt in 1..=25 {
            board.flip(0);
            assert_eq!(board.flip(3), FlipResult::Mismatched);
            round.record_error();
            board.flip_back_unmatched();

            let expected = 3 - attempt / 10;
            assert_eq!(round.remaining_lives, expected, "after {attempt} errors");
        }
    }

    #[test]
    fn order_shuffles_the_layout() {
        let board = MemoryBoard::new(PAIRS, &[3, 2, 1, 0]);
        assert_eq!(board.card(0).unwrap().face, CardFace::Class("verbo"));
        assert_eq!(board.card(3).unwrap().face, CardFace::Word("casa"));
    }
}
