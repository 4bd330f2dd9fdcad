//! Per-viewer ordering of opponents' submissions for the voting screen.
//!
//! The order must not depend on the order the server returns submissions in,
//! must be stable across refetches of the same round, and must differ between
//! viewers and rounds so nobody can coordinate on positions.

use uuid::Uuid;

use crate::entities::{Round, Submission};

/// Separator that cannot appear in server ids
const KEY_SEPARATOR: char = '\u{1f}';

/// Stable sort key for one submission as seen by one viewer in one round.
///
/// Name-based UUID (v5, SHA-1), so the value is identical across runs,
/// platforms and builds.
#[must_use]
pub fn ordering_key(round_id: &str, viewer_id: &str, submission_id: &str) -> u128 {
    let name = format!("{round_id}{KEY_SEPARATOR}{viewer_id}{KEY_SEPARATOR}{submission_id}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).as_u128()
}

/// Submissions by everyone except the viewer, in the viewer's voting order.
///
/// Ties on the key fall back to ascending submission id.
#[must_use]
pub fn other_submissions<'a>(round: &'a Round, viewer_id: &str) -> Vec<&'a Submission> {
    let mut keyed: Vec<(u128, &Submission)> = round
        .submissions
        .iter()
        .filter(|submission| submission.player_id != viewer_id)
        .map(|submission| {
            (
                ordering_key(&round.id, viewer_id, &submission.id),
                submission,
            )
        })
        .collect();

    keyed.sort_by(|(key_a, sub_a), (key_b, sub_b)| {
        key_a.cmp(key_b).then_with(|| sub_a.id.cmp(&sub_b.id))
    });

    keyed.into_iter().map(|(_, submission)| submission).collect()
}
