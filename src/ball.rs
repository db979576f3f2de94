// ball.rs
// Drawn balls as served by the balls endpoint, and the set of drawn numbers derived from them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ball number as sent by the API: an integer or its decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BallNumber {
    Int(u32),
    Text(String),
}

impl fmt::Display for BallNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallNumber::Int(n) => write!(f, "{n}"),
            BallNumber::Text(s) => f.write_str(s),
        }
    }
}

/// A ball record. Two payload shapes exist in the wild: the detailed one is tried first.
/// A record carrying `id`, `drawn` or `drawn_at` is never read as a simple ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ball {
    Detailed {
        id: i64,
        number: BallNumber,
        drawn: bool,
        drawn_at: String,
    },
    Simple(SimpleBall),
}

/// Bare `{ "number": "…" }` record. Any other field makes it a malformed ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimpleBall {
    pub number: String,
}

impl Ball {
    pub fn simple(number: &str) -> Self {
        Ball::Simple(SimpleBall {
            number: number.to_string(),
        })
    }

    /// The ball number as it appears in card cells.
    pub fn number(&self) -> String {
        match self {
            Ball::Detailed { number, .. } => number.to_string(),
            Ball::Simple(ball) => ball.number.clone(),
        }
    }

    /// Simple records only list drawn balls; detailed ones carry an explicit flag.
    pub fn is_drawn(&self) -> bool {
        match self {
            Ball::Detailed { drawn, .. } => *drawn,
            Ball::Simple(_) => true,
        }
    }
}

/// Set of drawn ball numbers, compared against cell numbers as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawnNumbers(HashSet<String>);

impl DrawnNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_balls(balls: &[Ball]) -> Self {
        Self(
            balls
                .iter()
                .filter(|ball| ball.is_drawn())
                .map(Ball::number)
                .collect(),
        )
    }

    pub fn contains(&self, number: &str) -> bool {
        self.0.contains(number)
    }

    pub fn insert(&mut self, number: &str) -> bool {
        self.0.insert(number.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_subset(&self, other: &DrawnNumbers) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Drawn numbers in ascending numeric order; non-numeric values sort last.
    pub fn sorted(&self) -> Vec<String> {
        let mut numbers: Vec<String> = self.0.iter().cloned().collect();
        numbers.sort_by_key(|n| (n.parse::<u64>().unwrap_or(u64::MAX), n.clone()));
        numbers
    }
}

impl<S: AsRef<str>> FromIterator<S> for DrawnNumbers {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| s.as_ref().to_string()).collect())
    }
}
