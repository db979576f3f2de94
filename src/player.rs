// player.rs
// Player identifier entered by the user to look up their cards.

use crate::defs::PLAYER_ID_LEN;

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerIdError {
    #[error("player ID is empty")]
    Empty,
    #[error("player ID must be 6 characters, got {0}")]
    Length(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Trim surrounding whitespace and require exactly six characters.
    pub fn parse(input: &str) -> Result<Self, PlayerIdError> {
        let trimmed = input.trim();
        match trimmed.chars().count() {
            0 => Err(PlayerIdError::Empty),
            PLAYER_ID_LEN => Ok(Self(trimmed.to_string())),
            n => Err(PlayerIdError::Length(n)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = PlayerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_id_is_trimmed() {
        let id = PlayerId::parse("  ab12CD \n").unwrap();
        assert_eq!(id.as_str(), "ab12CD");
        assert_eq!(id.to_string(), "ab12CD");
    }

    #[test]
    fn test_empty_id() {
        assert_eq!(PlayerId::parse(""), Err(PlayerIdError::Empty));
        assert_eq!(PlayerId::parse("   "), Err(PlayerIdError::Empty));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(PlayerId::parse("abc"), Err(PlayerIdError::Length(3)));
        assert_eq!(PlayerId::parse("abcdefg"), Err(PlayerIdError::Length(7)));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(PlayerId::parse("ñandú1").is_ok());
    }

    #[test]
    fn test_from_str() {
        let id: PlayerId = "XY9876".parse().unwrap();
        assert_eq!(id.as_str(), "XY9876");
    }
}
