//! Display content for a single card row.

use crate::api::types::Card;

pub const STARRED_MARKER: &str = "⭐️";

/// Primary and secondary text for one card row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCell {
    pub text: String,
    pub secondary_text: Option<String>,
}

impl From<&Card> for CardCell {
    fn from(card: &Card) -> Self {
        Self {
            text: card.name.clone(),
            secondary_text: card.starred.as_ref().map(|starred| format!("{STARRED_MARKER} {starred}")),
        }
    }
}

impl std::fmt::Display for CardCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.secondary_text {
            Some(secondary) => write!(f, "{}  {secondary}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

#[must_use]
pub fn cells(cards: &[Card]) -> Vec<CardCell> {
    cards.iter().map(CardCell::from).collect()
}

#[cfg(test)]
#[path = "cell_test.rs"]
mod tests;
