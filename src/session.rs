// session.rs
// Watch state for one player: cards and drawn balls as fetched, reconciled on every change
// of the drawn numbers, plus the win notice shown to the user.

use crate::api_client::ApiClient;
use crate::ball::{Ball, DrawnNumbers};
use crate::card::{Card, CardId};
use crate::error::FetchError;
use crate::logging::{log_debug, log_info, log_warning};
use crate::player::PlayerId;
use crate::reconcile::{carry_over_crossed, reconcile};
use crate::resource::Resource;

use std::collections::HashSet;
use std::time::{Duration, Instant};

// ============================================================================
// Poll schedule
// ============================================================================

/// Fixed-period schedule. The caller passes the current instant in.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    period: Duration,
    last: Instant,
}

impl Poller {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, last: now }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last) >= self.period
    }

    /// Time left before the next refresh, zero when overdue.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period.saturating_sub(now.saturating_duration_since(self.last))
    }

    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}

// ============================================================================
// Session
// ============================================================================

/// Cards that reached a full card since the notice was last dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinNotice {
    pub card_ids: Vec<CardId>,
}

/// What the front-end should display.
#[derive(Debug)]
pub enum View<'a> {
    Error(&'a FetchError),
    Loading,
    NoCards,
    Cards {
        cards: &'a [Card],
        drawn: Option<&'a DrawnNumbers>,
    },
}

#[derive(Debug)]
pub struct Session {
    player: PlayerId,
    cards: Resource<Vec<Card>>,
    balls: Resource<Vec<Ball>>,
    drawn: Option<DrawnNumbers>,
    announced: HashSet<CardId>,
    notice: Option<WinNotice>,
}

impl Session {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            cards: Resource::new(),
            balls: Resource::new(),
            drawn: None,
            announced: HashSet::new(),
            notice: None,
        }
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn cards(&self) -> &Resource<Vec<Card>> {
        &self.cards
    }

    pub fn balls(&self) -> &Resource<Vec<Ball>> {
        &self.balls
    }

    pub fn drawn(&self) -> Option<&DrawnNumbers> {
        self.drawn.as_ref()
    }

    pub fn win_notice(&self) -> Option<&WinNotice> {
        self.notice.as_ref()
    }

    /// Hide the win notice. Cards already announced are not announced again.
    pub fn dismiss_win(&mut self) {
        self.notice = None;
    }

    /// Mark both collections as in flight, so the loading state can be shown before awaiting.
    pub fn begin_refresh(&mut self) {
        self.cards.begin();
        self.balls.begin();
    }

    pub fn view(&self) -> View<'_> {
        if let Some(error) = self.cards.error().or(self.balls.error()) {
            return View::Error(error);
        }
        if self.cards.is_loading() || self.balls.is_loading() {
            return View::Loading;
        }
        match self.cards.data() {
            Some(cards) if !cards.is_empty() => View::Cards {
                cards,
                drawn: self.drawn.as_ref(),
            },
            _ => View::NoCards,
        }
    }

    /// Fetch the player's cards and reconcile them with the numbers drawn so far.
    pub async fn load_cards(&mut self, api: &ApiClient) -> Vec<CardId> {
        self.cards.begin();
        let outcome = api.fetch_cards(&self.player).await;
        if let Err(e) = &outcome {
            log_warning(&format!("Failed to load cards for {}: {e}", self.player));
        }
        self.apply_cards(outcome)
    }

    /// Fetch the drawn balls, reconciling only when the drawn numbers changed.
    pub async fn refresh_balls(&mut self, api: &ApiClient) -> Vec<CardId> {
        self.balls.begin();
        let outcome = api.fetch_balls().await;
        if let Err(e) = &outcome {
            log_warning(&format!("Failed to refresh drawn balls: {e}"));
        }
        self.apply_balls(outcome)
    }

    /// Manual retry after an error: reload both collections.
    pub async fn retry(&mut self, api: &ApiClient) -> Vec<CardId> {
        log_info(&format!("Retrying for player {}", self.player));
        let mut won = self.refresh_balls(api).await;
        won.extend(self.load_cards(api).await);
        won
    }

    /// Record a cards fetch outcome. Returns the cards that newly reached a win.
    /// Cells crossed in the previous snapshot stay crossed in the reloaded one.
    pub fn apply_cards(&mut self, outcome: Result<Vec<Card>, FetchError>) -> Vec<CardId> {
        let loaded = outcome.is_ok();
        let outcome = match self.cards.data() {
            Some(previous) => outcome.map(|fresh| carry_over_crossed(previous, fresh)),
            None => outcome,
        };
        self.cards.settle(outcome);
        if !loaded {
            return Vec::new();
        }
        if let Some(cards) = self.cards.data() {
            log_info(&format!("Loaded {} card(s) for player {}", cards.len(), self.player));
        }
        self.reconcile_cards()
    }

    /// Record a balls fetch outcome. Returns the cards that newly reached a win.
    pub fn apply_balls(&mut self, outcome: Result<Vec<Ball>, FetchError>) -> Vec<CardId> {
        let fresh = outcome.as_ref().ok().map(|balls| DrawnNumbers::from_balls(balls));
        self.balls.settle(outcome);

        match fresh {
            Some(drawn) if self.drawn.as_ref() != Some(&drawn) => {
                log_debug(&format!("Drawn numbers changed: {} drawn", drawn.len()));
                self.drawn = Some(drawn);
                self.reconcile_cards()
            }
            _ => Vec::new(),
        }
    }

    fn reconcile_cards(&mut self) -> Vec<CardId> {
        let (Some(cards), Some(drawn)) = (self.cards.data(), self.drawn.as_ref()) else {
            return Vec::new();
        };

        let result = reconcile(cards, drawn);
        if result.changed {
            log_debug("Cards updated with newly drawn numbers");
            self.cards.mutate(result.cards);
        }

        let newly_won: Vec<CardId> = result
            .winners
            .into_iter()
            .filter(|id| !self.announced.contains(id))
            .collect();
        if newly_won.is_empty() {
            return newly_won;
        }

        for card_id in &newly_won {
            log_info(&format!("TOMBOLA on card {card_id} for player {}", self.player));
            self.announced.insert(card_id.clone());
        }
        self.notice
            .get_or_insert_with(|| WinNotice { card_ids: Vec::new() })
            .card_ids
            .extend(newly_won.iter().cloned());
        newly_won
    }
}
