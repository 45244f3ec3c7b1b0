//! Score-based record selection.

use serde::{Deserialize, Serialize};

/// How the running maximum is seeded when picking the best record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Seed the maximum with the score type's `Default` (zero for numbers).
    ///
    /// A record is only picked if it scores strictly above zero, so an
    /// all-non-positive store yields nothing even though it has a maximum.
    #[default]
    ZeroFloor,

    /// Seed the maximum with the first record's score, so the true maximum
    /// wins even when it is zero or negative.
    TrueMax,
}

/// Pick the record with the strictly greatest score.
///
/// Records are scanned in iteration order. A later record replaces the
/// current best only when its score is strictly greater, so ties resolve to
/// the earliest maximal record. Scores that are not comparable with
/// themselves (NaN) are never selected.
pub fn select_best<T, S, I, F>(records: I, policy: SelectionPolicy, mut score: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> S,
    S: PartialOrd + Default,
{
    let mut best: Option<(S, T)> = None;
    let mut floor = match policy {
        SelectionPolicy::ZeroFloor => Some(S::default()),
        SelectionPolicy::TrueMax => None,
    };

    for record in records {
        let candidate = score(&record);
        if candidate.partial_cmp(&candidate).is_none() {
            continue;
        }

        let beats = match (&best, &floor) {
            (Some((current, _)), _) => *current < candidate,
            (None, Some(floor)) => *floor < candidate,
            (None, None) => true,
        };

        if beats {
            best = Some((candidate, record));
            floor = None;
        }
    }

    best.map(|(_, record)| record)
}
