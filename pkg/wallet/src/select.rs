use join_split::NoteWithMeta;

use crate::{Error, Result};

/// Pick notes to cover `target`
///
/// Zero-amount notes are never picked. The policy is fixed, so the result only depends on the
/// order of `unspent`:
///  1. first fit: take notes in order until the total reaches `target`, at most `max` of them
///  2. otherwise the first single note worth at least `target`
///  3. otherwise, when `max >= 2`, the first pair (in order of the first note, then the second)
///     that covers `target`
///
/// The selection isn't minimal, first fit may take two notes where a later one would do alone.
///
/// # Errors
///
/// Returns [`Error::InsufficientBalance`] if no selection of at most `max` notes covers
/// `target`. `have` is the most that `max` notes could add up to.
pub fn select_notes<'a>(
    unspent: impl IntoIterator<Item = &'a NoteWithMeta>,
    target: u64,
    max: usize,
) -> Result<Vec<NoteWithMeta>> {
    let spendable: Vec<NoteWithMeta> = unspent
        .into_iter()
        .filter(|note| !note.note.is_padding())
        .copied()
        .collect();
    let target_value = u128::from(target);
    let covers = |total: u128| total >= target_value;

    let mut selected = Vec::with_capacity(max);
    let mut total: u128 = 0;

    for note in spendable.iter().take(max) {
        total += u128::from(note.value());
        selected.push(*note);

        if covers(total) {
            return Ok(selected);
        }
    }

    if max >= 1 {
        if let Some(note) = spendable.iter().find(|note| covers(u128::from(note.value()))) {
            tracing::debug!(index = note.leaf_index, "first fit fell short, using a single note");
            return Ok(vec![*note]);
        }
    }

    if max >= 2 {
        for (i, first) in spendable.iter().enumerate() {
            let second = spendable[i + 1..]
                .iter()
                .find(|second| covers(u128::from(first.value()) + u128::from(second.value())));

            if let Some(second) = second {
                tracing::debug!(
                    first = first.leaf_index,
                    second = second.leaf_index,
                    "first fit fell short, using a pair of notes"
                );
                return Ok(vec![*first, *second]);
            }
        }
    }

    Err(Error::InsufficientBalance {
        need: target,
        have: best_total(&spendable, max),
    })
}

/// The sum of the `max` most valuable notes
fn best_total(notes: &[NoteWithMeta], max: usize) -> u128 {
    let mut values: Vec<u128> = notes.iter().map(|note| u128::from(note.value())).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.into_iter().take(max).sum()
}

#[cfg(test)]
mod tests {
    use join_split::{Element, Note};

    use super::*;

    fn notes(amounts: &[u64]) -> Vec<NoteWithMeta> {
        amounts
            .iter()
            .zip(0..)
            .map(|(amount, index)| {
                Note::restore(Element::ONE, Element::new(*amount), Element::new(index))
                    .with_meta(index, Element::ONE)
            })
            .collect()
    }

    fn values(selected: &[NoteWithMeta]) -> Vec<u64> {
        selected.iter().map(NoteWithMeta::value).collect()
    }

    #[test]
    fn stops_once_covered() {
        let notes = notes(&[1000, 2000, 3000]);
        let selected = select_notes(&notes, 1000, 2).unwrap();

        assert_eq!(values(&selected), [1000]);
    }

    #[test]
    fn takes_second_note_when_needed() {
        let notes = notes(&[1000, 2000, 3000]);
        let selected = select_notes(&notes, 2500, 2).unwrap();

        assert_eq!(values(&selected), [1000, 2000]);
    }

    #[test]
    fn skips_zero_amount_notes() {
        let notes = notes(&[0, 0, 700]);
        let selected = select_notes(&notes, 500, 2).unwrap();

        assert_eq!(values(&selected), [700]);
    }

    #[test]
    fn limited_to_max_notes() {
        let notes = notes(&[100, 100, 100]);
        let error = select_notes(&notes, 300, 2).unwrap_err();

        assert!(matches!(
            error,
            Error::InsufficientBalance {
                need: 300,
                have: 200
            }
        ));
    }

    #[test]
    fn later_note_covers_when_first_fit_falls_short() {
        let notes = notes(&[100, 100, 5000]);
        let selected = select_notes(&notes, 1000, 2).unwrap();

        assert_eq!(values(&selected), [5000]);
    }

    #[test]
    fn first_covering_single_note_wins() {
        let notes = notes(&[100, 200, 1500, 9000]);
        let selected = select_notes(&notes, 1000, 2).unwrap();

        assert_eq!(values(&selected), [1500]);
    }

    #[test]
    fn falls_back_to_first_covering_pair() {
        let notes = notes(&[100, 100, 600, 700]);
        let selected = select_notes(&notes, 1000, 2).unwrap();

        assert_eq!(values(&selected), [600, 700]);
    }

    #[test]
    fn shortfall_reports_best_reachable_total() {
        let notes = notes(&[100, 400, 300, 200]);
        let error = select_notes(&notes, 1000, 2).unwrap_err();

        assert!(matches!(
            error,
            Error::InsufficientBalance {
                need: 1000,
                have: 700
            }
        ));
    }

    #[test]
    fn empty_wallet() {
        let error = select_notes(&[], 1500, 2).unwrap_err();

        expect_test::expect!["insufficient balance: need 1500, have 0"]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn zero_target_still_needs_a_note() {
        assert!(select_notes(&[], 0, 2).is_err());
        assert_eq!(values(&select_notes(&notes(&[5]), 0, 2).unwrap()), [5]);
    }
}
