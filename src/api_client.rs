// src/api_client.rs
// HTTP API client for the cards and drawn-balls endpoints.
//
// Every payload goes through a strict parse step before it is handed out: a body that
// does not match the expected structure fails the whole fetch, nothing is salvaged.

use crate::ball::Ball;
use crate::card::Card;
use crate::config::ClientConfig;
use crate::error::{FetchError, ValidationError};
use crate::logging::log_debug;
use crate::player::PlayerId;

// ============================================================================
// Payload validation
// ============================================================================

/// Parse a cards collection and check that every grid is a non-empty rectangle.
pub fn parse_cards(body: &[u8]) -> Result<Vec<Card>, ValidationError> {
    let cards: Vec<Card> = serde_json::from_slice(body)?;
    for card in &cards {
        check_grid_shape(card)?;
    }
    Ok(cards)
}

/// Parse a drawn-balls collection.
pub fn parse_balls(body: &[u8]) -> Result<Vec<Ball>, ValidationError> {
    Ok(serde_json::from_slice(body)?)
}

fn check_grid_shape(card: &Card) -> Result<(), ValidationError> {
    let expected = card.columns();
    if expected == 0 {
        return Err(ValidationError::EmptyGrid { card_id: card.card_id.clone() });
    }
    for (row, cells) in card.grid.iter().enumerate() {
        if cells.len() != expected {
            return Err(ValidationError::RaggedGrid {
                card_id: card.card_id.clone(),
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// HTTP client
// ============================================================================

#[derive(Debug, Clone)]
pub struct ApiClient {
    cards_url: String,
    balls_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            cards_url: config.cards_url(),
            balls_url: config.balls_url(),
            http_client,
        })
    }

    pub fn cards_url(&self) -> &str {
        &self.cards_url
    }

    pub fn balls_url(&self) -> &str {
        &self.balls_url
    }

    /// Get the cards assigned to a player
    pub async fn fetch_cards(&self, player: &PlayerId) -> Result<Vec<Card>, FetchError> {
        let request = self
            .http_client
            .get(&self.cards_url)
            .query(&[("search", player.as_str())]);
        self.get_validated(&self.cards_url, request, parse_cards).await
    }

    /// Get the balls drawn so far
    pub async fn fetch_balls(&self) -> Result<Vec<Ball>, FetchError> {
        let request = self.http_client.get(&self.balls_url);
        self.get_validated(&self.balls_url, request, parse_balls).await
    }

    async fn get_validated<T>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
        parse: fn(&[u8]) -> Result<T, ValidationError>,
    ) -> Result<T, FetchError> {
        log_debug(&format!("GET {url}"));

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        log_debug(&format!("GET {url}: {} bytes", body.len()));

        parse(&body).map_err(|source| FetchError::Validation {
            url: url.to_string(),
            source,
        })
    }
}
