use crate::deck::{Card, Deck};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Direction(s) in which cards are quizzed.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum StudyMode {
    #[strum(serialize = "word -> translation")]
    WordToTranslation,
    #[strum(serialize = "translation -> word")]
    TranslationToWord,
    #[strum(serialize = "both directions")]
    Both,
}

impl StudyMode {
    /// Map a numeric menu choice to a mode. Anything unrecognized is `None`;
    /// the caller decides the fallback.
    pub fn parse_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::WordToTranslation),
            "2" => Some(Self::TranslationToWord),
            "3" => Some(Self::Both),
            _ => None,
        }
    }
}

/// A single directional question/answer pair derived from a card for one
/// session. `source` is the index of the originating card in the deck,
/// kept for traceability only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyCard {
    pub question: String,
    pub answer: String,
    pub source: usize,
}

impl StudyCard {
    fn forward(source: usize, card: &Card) -> Self {
        Self {
            question: card.word.clone(),
            answer: card.translation.clone(),
            source,
        }
    }

    fn reverse(source: usize, card: &Card) -> Self {
        Self {
            question: card.translation.clone(),
            answer: card.word.clone(),
            source,
        }
    }

    pub fn source_card<'a>(&self, deck: &'a Deck) -> Option<&'a Card> {
        deck.cards.get(self.source)
    }
}

/// Expand a deck into study cards for the chosen mode. Pure and
/// deterministic; in `Both` mode each card contributes its forward pair
/// immediately followed by its reverse pair.
pub fn expand(deck: &Deck, mode: StudyMode) -> Vec<StudyCard> {
    let mut study_cards = Vec::new();

    for (idx, card) in deck.cards.iter().enumerate() {
        match mode {
            StudyMode::WordToTranslation => study_cards.push(StudyCard::forward(idx, card)),
            StudyMode::TranslationToWord => study_cards.push(StudyCard::reverse(idx, card)),
            StudyMode::Both => {
                study_cards.push(StudyCard::forward(idx, card));
                study_cards.push(StudyCard::reverse(idx, card));
            }
        }
    }

    study_cards
}
