use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене — просто упорядоченный список карт.
/// Перемешивание делает engine (через RandomSource из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Каноническая 36-карточная колода для свары в порядке:
    /// Clubs 6..A, Diamonds 6..A, Hearts 6..A, Spades 6..A.
    /// Джокер отдельно не добавляется — им помечена сама 7♣.
    pub fn svara_36() -> Self {
        let mut cards = Vec::with_capacity(36);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Взять n карт сверху. None, если карт не хватает —
    /// вызывающий код превращает это в `EngineError::DeckExhausted`.
    pub fn draw_n(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.cards.len() < n {
            return None;
        }
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.cards.pop()?);
        }
        Some(taken)
    }
}
