// reconcile.rs
// Marks drawn numbers on a set of cards and detects which cards are complete.

use crate::ball::DrawnNumbers;
use crate::card::{Card, CardId, Cell};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Updated copy of the input cards, same order and shape.
    pub cards: Vec<Card>,
    /// Cards that are complete after the pass, in input order.
    pub winners: Vec<CardId>,
    /// At least one cell was crossed out by this pass.
    pub changed: bool,
}

impl Reconciliation {
    pub fn won(&self) -> bool {
        !self.winners.is_empty()
    }

    /// Every playable cell of every card is crossed out (vacuously true without cards).
    pub fn all_complete(&self) -> bool {
        self.cards
            .iter()
            .flat_map(Card::cells)
            .all(|cell| cell.is_blank() || cell.crossed_out)
    }
}

/// Cross out every playable cell whose number has been drawn.
///
/// Cells are visited row by row. Already crossed cells and blank cells are left as they are,
/// so crossing is monotonic and a second pass with the same numbers changes nothing.
/// The input cards are never modified.
pub fn reconcile(cards: &[Card], drawn: &DrawnNumbers) -> Reconciliation {
    let mut changed = false;
    let mut winners = Vec::new();

    let cards: Vec<Card> = cards
        .iter()
        .map(|card| {
            let mut complete = true;
            let grid = card
                .grid
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| {
                            if cell.crossed_out || cell.is_blank() {
                                return cell.clone();
                            }
                            if drawn.contains(&cell.number) {
                                changed = true;
                                return Cell {
                                    number: cell.number.clone(),
                                    crossed_out: true,
                                };
                            }
                            complete = false;
                            cell.clone()
                        })
                        .collect()
                })
                .collect();

            let updated = Card {
                card_id: card.card_id.clone(),
                grid,
            };
            // a card made only of blanks stays incomplete
            if complete && updated.playable_cells() > 0 {
                winners.push(updated.card_id.clone());
            }
            updated
        })
        .collect();

    Reconciliation {
        cards,
        winners,
        changed,
    }
}

/// Keep the crossings of a previous snapshot on freshly fetched cards.
///
/// Cells are matched by card id and grid position, and only when they still hold the same
/// number. Crossings made in the fresh copy are kept too, nothing is ever un-crossed.
pub fn carry_over_crossed(previous: &[Card], fresh: Vec<Card>) -> Vec<Card> {
    fresh
        .into_iter()
        .map(|mut card| {
            let Some(old) = previous.iter().find(|old| old.card_id == card.card_id) else {
                return card;
            };
            for (row, old_row) in card.grid.iter_mut().zip(&old.grid) {
                for (cell, old_cell) in row.iter_mut().zip(old_row) {
                    if old_cell.crossed_out && old_cell.number == cell.number && cell.is_playable() {
                        cell.crossed_out = true;
                    }
                }
            }
            card
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn drawn(numbers: &[&str]) -> DrawnNumbers {
        numbers.iter().collect()
    }

    fn sample_card() -> Card {
        Card::from_numbers(1, &[&["1", "2"], &["0", "3"]])
    }

    fn random_card(rng: &mut impl Rng, id: i64) -> Card {
        let grid = (0..3)
            .map(|_| {
                (0..5)
                    .map(|_| {
                        if rng.random_bool(0.3) {
                            Cell::new("0")
                        } else {
                            Cell::new(&rng.random_range(1..=90).to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Card::new(id, grid)
    }

    fn random_drawn(rng: &mut impl Rng, count: usize) -> DrawnNumbers {
        (0..count).map(|_| rng.random_range(1..=90).to_string()).collect()
    }

    #[test]
    fn test_full_card_wins() {
        let result = reconcile(&[sample_card()], &drawn(&["1", "2", "3"]));

        assert!(result.won());
        assert_eq!(result.winners, vec![CardId::Number(1)]);
        assert!(result.changed);
        assert!(result.cards[0].is_complete());
    }

    #[test]
    fn test_partial_card_does_not_win() {
        let result = reconcile(&[sample_card()], &drawn(&["1", "2"]));

        assert!(!result.won());
        let grid = &result.cards[0].grid;
        assert!(grid[0][0].crossed_out);
        assert!(grid[0][1].crossed_out);
        assert!(!grid[1][1].crossed_out);
    }

    #[test]
    fn test_blank_cells_never_crossed() {
        let card = Card::from_numbers(1, &[&["0", "5"], &["0", "0"]]);
        let result = reconcile(&[card], &drawn(&["0", "5"]));

        for cell in result.cards[0].cells().filter(|c| c.is_blank()) {
            assert!(!cell.crossed_out);
        }
        assert!(result.won());
    }

    #[test]
    fn test_blank_only_card_is_not_a_win() {
        let card = Card::from_numbers(9, &[&["0", "0"], &["0", "0"]]);
        let result = reconcile(&[card], &drawn(&["1", "2", "3"]));

        assert!(!result.won());
        assert!(!result.changed);
        // the collection-wide check is vacuously satisfied
        assert!(result.all_complete());
    }

    #[test]
    fn test_winners_are_per_card() {
        let done = Card::from_numbers(1, &[&["1", "2"]]);
        let open = Card::from_numbers(2, &[&["3", "4"]]);
        let result = reconcile(&[done, open], &drawn(&["1", "2", "3"]));

        assert_eq!(result.winners, vec![CardId::Number(1)]);
        assert!(result.won());
        assert!(!result.all_complete());
    }

    #[test]
    fn test_previously_crossed_cells_stay_crossed() {
        let mut card = sample_card();
        card.grid[1][1].crossed_out = true;
        let result = reconcile(&[card], &DrawnNumbers::new());

        assert!(result.cards[0].grid[1][1].crossed_out);
        assert!(!result.changed);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let cards = vec![sample_card()];
        let before = cards.clone();
        let _ = reconcile(&cards, &drawn(&["1", "2", "3"]));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_carry_over_keeps_previous_crossings() {
        let mut previous = sample_card();
        previous.grid[0][0].crossed_out = true;
        let mut fresh = sample_card();
        fresh.grid[0][1].crossed_out = true;

        let merged = carry_over_crossed(&[previous], vec![fresh]);
        assert!(merged[0].grid[0][0].crossed_out);
        assert!(merged[0].grid[0][1].crossed_out);
        assert!(!merged[0].grid[1][1].crossed_out);
    }

    #[test]
    fn test_carry_over_matches_id_and_number() {
        let mut previous = Card::from_numbers(1, &[&["7", "8"]]);
        previous.grid[0][0].crossed_out = true;
        previous.grid[0][1].crossed_out = true;
        let fresh = vec![
            Card::from_numbers(1, &[&["7", "9"]]),
            Card::from_numbers(2, &[&["7", "8"]]),
        ];

        let merged = carry_over_crossed(&[previous], fresh);
        assert!(merged[0].grid[0][0].crossed_out);
        // the number at that position changed
        assert!(!merged[0].grid[0][1].crossed_out);
        // other card, nothing to carry
        assert!(merged[1].cells().all(|c| !c.crossed_out));
    }

    #[test]
    fn test_empty_collection() {
        let result = reconcile(&[], &drawn(&["1"]));
        assert!(result.cards.is_empty());
        assert!(!result.won());
        assert!(!result.changed);
    }

    #[test]
    fn test_drawn_cells_get_crossed_on_random_cards() {
        let mut rng = rand::rng();
        for round in 0..50 {
            let cards: Vec<Card> = (0..4).map(|id| random_card(&mut rng, id)).collect();
            let numbers = random_drawn(&mut rng, 30);
            let result = reconcile(&cards, &numbers);

            for (before, after) in cards.iter().zip(&result.cards) {
                assert_eq!(before.card_id, after.card_id);
                for (old, new) in before.cells().zip(after.cells()) {
                    assert_eq!(old.number, new.number);
                    if old.is_blank() {
                        assert!(!new.crossed_out, "round {round}: blank cell crossed");
                    } else if numbers.contains(&old.number) {
                        assert!(new.crossed_out, "round {round}: drawn {} not crossed", old.number);
                    } else {
                        assert_eq!(new.crossed_out, old.crossed_out);
                    }
                }
                assert_eq!(result.winners.contains(&after.card_id), after.is_complete());
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let cards: Vec<Card> = (0..3).map(|id| random_card(&mut rng, id)).collect();
            let numbers = random_drawn(&mut rng, 40);

            let first = reconcile(&cards, &numbers);
            let second = reconcile(&first.cards, &numbers);

            assert_eq!(first.cards, second.cards);
            assert_eq!(first.winners, second.winners);
            assert!(!second.changed);
        }
    }

    #[test]
    fn test_monotonic_over_growing_draws() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let cards: Vec<Card> = (0..3).map(|id| random_card(&mut rng, id)).collect();
            let small = random_drawn(&mut rng, 20);
            let mut large = small.clone();
            for extra in random_drawn(&mut rng, 20).sorted() {
                large.insert(&extra);
            }
            assert!(small.is_subset(&large));

            let with_small = reconcile(&cards, &small);
            let with_large = reconcile(&cards, &large);

            for (a, b) in with_small.cards.iter().zip(&with_large.cards) {
                for (cell_a, cell_b) in a.cells().zip(b.cells()) {
                    if cell_a.crossed_out {
                        assert!(cell_b.crossed_out);
                    }
                }
            }
            for winner in &with_small.winners {
                assert!(with_large.winners.contains(winner));
            }
        }
    }
}
