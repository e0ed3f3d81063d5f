//! Core card-related types: Card, Orientation, SpreadPosition, SelectedCard

use serde::{Deserialize, Serialize};

/// Stable deck-wide card identifier (0..=77).
pub type CardId = u8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    Major,
    Minor,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Page,
    Knight,
    Queen,
    King,
}

impl Rank {
    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Page => "Page",
            Rank::Knight => "Knight",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

impl Suit {
    pub fn label(self) -> &'static str {
        match self {
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
        }
    }
}

/// One immutable deck entry, loaded once from the static deck source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub arcana: Arcana,
    pub name: String,
    pub keywords: Vec<String>,
    /// Asset path for the shell; the engine never reads it.
    pub image: String,
    pub upright_meaning: String,
    pub reversed_meaning: String,
}

/// Drawn orientation of a selected card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Upright,
    Reversed,
}

/// Slot a confirmed card occupies in the three-card spread.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadPosition {
    Past,
    Present,
    Future,
}

impl SpreadPosition {
    /// Positions in spread order; index matches selection order.
    pub const ALL: [SpreadPosition; 3] = [
        SpreadPosition::Past,
        SpreadPosition::Present,
        SpreadPosition::Future,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpreadPosition::Past => "past",
            SpreadPosition::Present => "present",
            SpreadPosition::Future => "future",
        }
    }
}

/// A card in the current selection set, with its drawn orientation.
///
/// `position` stays `None` until the selection is confirmed; confirmation
/// fixes positions in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCard {
    pub card: Card,
    pub orientation: Orientation,
    pub position: Option<SpreadPosition>,
}

impl SelectedCard {
    /// The meaning matching the drawn orientation.
    pub fn meaning(&self) -> &str {
        match self.orientation {
            Orientation::Upright => &self.card.upright_meaning,
            Orientation::Reversed => &self.card.reversed_meaning,
        }
    }
}
