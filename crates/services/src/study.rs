//! Flashcard and cheat-sheet views over a generated question set.

use serde::Serialize;

use study_core::model::{Cheatsheet, Flashcard, QuestionInstance, Section, TemplateId};

/// Flashcards with circular navigation and a flip state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    current: usize,
    flipped: bool,
}

impl FlashcardDeck {
    #[must_use]
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            current: 0,
            flipped: false,
        }
    }

    /// Deck holding the flashcard of every question, in queue order.
    #[must_use]
    pub fn from_questions(questions: &[QuestionInstance]) -> Self {
        Self::new(questions.iter().map(|q| q.flashcard().clone()).collect())
    }

    /// Start at `index`, wrapped into the deck.
    #[must_use]
    pub fn starting_at(mut self, index: usize) -> Self {
        if !self.cards.is_empty() {
            self.current = index % self.cards.len();
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Text on the visible side of the current card.
    #[must_use]
    pub fn visible_face(&self) -> Option<&str> {
        let card = self.current()?;
        Some(if self.flipped { &card.back } else { &card.front })
    }

    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Move forward, wrapping from the last card to the first.
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.cards.len();
        self.flipped = false;
    }

    /// Move back, wrapping from the first card to the last.
    pub fn previous(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = (self.current + self.cards.len() - 1) % self.cards.len();
        self.flipped = false;
    }

    /// One-based position label such as `"3 / 28"`; `"0 / 0"` for an empty deck.
    #[must_use]
    pub fn position_label(&self) -> String {
        if self.cards.is_empty() {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.current + 1, self.cards.len())
    }
}

/// One cheat-sheet row with the template it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheatsheetEntry {
    pub template_id: TemplateId,
    pub section: Section,
    pub tags: Vec<&'static str>,
    pub sheet: Cheatsheet,
}

/// Cheat-sheet entries for `questions`, sorted by section then template id.
#[must_use]
pub fn cheatsheet_entries(questions: &[QuestionInstance]) -> Vec<CheatsheetEntry> {
    let mut entries: Vec<_> = questions
        .iter()
        .map(|q| CheatsheetEntry {
            template_id: q.template_id(),
            section: q.section(),
            tags: q.tags().to_vec(),
            sheet: q.cheatsheet().clone(),
        })
        .collect();
    entries.sort_by_key(|e| (e.section.as_str(), e.template_id));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(n: usize) -> Flashcard {
        Flashcard {
            front: format!("front {n}"),
            back: format!("back {n}"),
        }
    }

    fn deck(len: usize) -> FlashcardDeck {
        FlashcardDeck::new((0..len).map(card).collect())
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut deck = deck(3);
        assert_eq!(deck.position_label(), "1 / 3");
        deck.previous();
        assert_eq!(deck.position_label(), "3 / 3");
        deck.next();
        deck.next();
        assert_eq!(deck.current(), Some(&card(1)));
    }

    #[test]
    fn flip_shows_back_and_resets_on_move() {
        let mut deck = deck(2);
        assert_eq!(deck.visible_face(), Some("front 0"));
        deck.flip();
        assert!(deck.is_flipped());
        assert_eq!(deck.visible_face(), Some("back 0"));
        deck.next();
        assert!(!deck.is_flipped());
        assert_eq!(deck.visible_face(), Some("front 1"));
    }

    #[test]
    fn empty_deck_is_inert() {
        let mut deck = deck(0);
        deck.next();
        deck.previous();
        deck.flip();
        assert!(deck.current().is_none());
        assert!(!deck.is_flipped());
        assert_eq!(deck.position_label(), "0 / 0");
    }

    #[test]
    fn starting_index_wraps() {
        assert_eq!(deck(4).starting_at(6).position_label(), "3 / 4");
    }
}
