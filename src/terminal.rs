// bingo_watch/src/terminal.rs
// This module handles terminal input/output for the bingo watcher.

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};

use crate::ball::DrawnNumbers;
use crate::card::{Card, CardId};
use crate::defs::{CELL_WIDTH, Colors};
use crate::player::PlayerId;
use crate::session::{Session, View};

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Retry,
    Dismiss,
}

// ============================================================================
// Rendering
// ============================================================================

fn border(left: &str, join: &str, right: &str, columns: usize) -> String {
    let segments = vec!["─".repeat(CELL_WIDTH); columns.max(1)];
    format!("{left}{}{right}\n", segments.join(join))
}

fn format_cell(number: &str, crossed_out: bool, blank: bool) -> String {
    if blank {
        return " ".repeat(CELL_WIDTH);
    }
    let shown: String = number.chars().take(CELL_WIDTH).collect();
    let text = format!("{shown:^CELL_WIDTH$}");
    if crossed_out {
        format!("{}{}{text}{}", Colors::green(), Colors::reversed(), Colors::reset())
    } else {
        text
    }
}

/// Draw one card as a boxed grid. Crossed cells are highlighted, blank cells stay empty.
pub fn format_card(card: &Card) -> String {
    let columns = card.columns();
    let inner_width = columns.max(1) * (CELL_WIDTH + 1) - 1;

    let title = if card.is_complete() {
        format!(" Card {} - TOMBOLA!", card.card_id)
    } else {
        format!(" Card {} - {}/{}", card.card_id, card.crossed_cells(), card.playable_cells())
    };
    let padding = inner_width.saturating_sub(title.chars().count());

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(inner_width)));
    out.push_str(&format!("│{title}{}│\n", " ".repeat(padding)));
    out.push_str(&border("├", "┬", "┤", columns));

    for row in &card.grid {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| format_cell(&cell.number, cell.crossed_out, cell.is_blank()))
            .collect();
        out.push_str(&format!("│{}│\n", cells.join("│")));
    }

    out.push_str(&border("└", "┴", "┘", columns));
    out
}

pub fn format_drawn(drawn: Option<&DrawnNumbers>) -> String {
    match drawn {
        Some(drawn) if !drawn.is_empty() => {
            format!("🎯 Drawn numbers ({}): {}", drawn.len(), drawn.sorted().join(" "))
        }
        _ => "🎯 No numbers drawn yet".to_string(),
    }
}

pub fn format_win_banner(card_ids: &[CardId]) -> String {
    let ids: Vec<String> = card_ids.iter().map(CardId::to_string).collect();
    let label = if ids.len() == 1 { "card" } else { "cards" };
    format!(
        "🏆 {}TOMBOLA! Every number on {label} {} is crossed out!{} 🏆\n   Press ENTER to dismiss",
        Colors::green(),
        ids.join(", "),
        Colors::reset()
    )
}

/// Build the whole screen for the current session state.
pub fn render(session: &Session, poll_period: Duration) -> String {
    let mut out = String::new();
    out.push_str(&format!("🕐 Last update: {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("👤 Player: {}\n\n", session.player()));

    match session.view() {
        View::Error(error) => {
            out.push_str(&format!(
                "{}There was an error loading the cards.{} {error}\n",
                Colors::red(),
                Colors::reset()
            ));
            out.push_str("\nPress R to retry or ESC to exit\n");
            return out;
        }
        View::Loading => {
            out.push_str(&format!("⏳ Loading cards for {}...\n", session.player()));
            return out;
        }
        View::NoCards => {
            out.push_str("No cards found.\n");
        }
        View::Cards { cards, drawn } => {
            out.push_str(&format_drawn(drawn));
            out.push('\n');
            for card in cards {
                out.push('\n');
                out.push_str(&format_card(card));
            }
        }
    }

    if let Some(notice) = session.win_notice() {
        out.push('\n');
        out.push_str(&format_win_banner(&notice.card_ids));
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{}Refreshing every {}s · R reload · ESC quit{}\n",
        Colors::dim(),
        poll_period.as_secs(),
        Colors::reset()
    ));
    out
}

// ============================================================================
// Input
// ============================================================================

/// Ask for a player ID until a valid one is entered. `None` on end of input.
pub fn read_player_id() -> io::Result<Option<PlayerId>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("Enter your ID (6 characters): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match PlayerId::parse(&line) {
            Ok(id) => return Ok(Some(id)),
            Err(e) => println!("{}{e}{}", Colors::yellow(), Colors::reset()),
        }
    }
}

pub fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Retry),
        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Dismiss),
        _ => None,
    }
}

/// Wait up to `timeout` for a meaningful key press.
pub fn wait_for_key(timeout: Duration) -> io::Result<Option<KeyAction>> {
    enable_raw_mode()?;
    let result = read_key_until(Instant::now() + timeout);
    disable_raw_mode()?;
    result
}

fn read_key_until(deadline: Instant) -> io::Result<Option<KeyAction>> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(None);
        }
        // Only process key press events, not key release events
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(action) = key_action(key) {
                    return Ok(Some(action));
                }
            }
        }
    }
}
