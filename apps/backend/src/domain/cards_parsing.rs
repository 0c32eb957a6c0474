//! Card parsing from alias tokens (e.g., "3C", "10H", "QS")

use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_error(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.alias() == s)
            .ok_or_else(|| parse_error(s))
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Suit::Hearts),
            "D" => Ok(Suit::Diamonds),
            "C" => Ok(Suit::Clubs),
            "S" => Ok(Suit::Spades),
            _ => Err(parse_error(s)),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    /// Aliases are case-sensitive: rank token followed by a single suit letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(2..=3).contains(&s.len()) || !s.is_ascii() {
            return Err(parse_error(s));
        }
        let (rank_tok, suit_tok) = s.split_at(s.len() - 1);
        let rank = rank_tok.parse::<Rank>().map_err(|_| parse_error(s))?;
        let suit = suit_tok.parse::<Suit>().map_err(|_| parse_error(s))?;
        Ok(Card { suit, rank })
    }
}

/// Non-panicking helper to parse alias tokens into cards.
/// Fails on the first invalid token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

/// Lenient parse for user-entered config values ("3c", " 10h ").
pub fn parse_card_lenient(s: &str) -> Result<Card, DomainError> {
    s.trim().to_ascii_uppercase().parse::<Card>()
}
