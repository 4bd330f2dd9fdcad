//! End-of-round and end-of-game report derivations.
//!
//! Everything here is a pure function of snapshots; `GameRoomModel` exposes
//! them bound to its own state.

use std::collections::HashSet;

use crate::dto::{ReportKind, ReportRequest};
use crate::entities::{Game, Round};
use crate::errors::ClientError;

/// A phrase the viewer may flag as offensive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportablePhrase {
    pub submission_id: String,
    pub round_number: u32,
    pub player_id: String,
    pub player_name: String,
    pub phrase: String,
}

/// Completed rounds plus the current one, deduplicated by id, ascending by number.
///
/// When a round appears twice the completed copy wins.
#[must_use]
pub fn report_rounds<'a>(completed: &'a [Round], current: Option<&'a Round>) -> Vec<&'a Round> {
    let mut seen = HashSet::new();
    let mut rounds: Vec<&Round> = completed
        .iter()
        .chain(current)
        .filter(|round| seen.insert(round.id.as_str()))
        .collect();
    rounds.sort_by_key(|round| round.number);
    rounds
}

/// Player ids in report order: everyone else by display name, then the viewer.
///
/// Uses the game's participants; when the snapshot has none, identities are
/// collected from the submissions in `rounds` instead.
#[must_use]
pub fn ordered_player_ids(game: &Game, viewer_id: &str, rounds: &[&Round]) -> Vec<String> {
    let mut players: Vec<(String, String)> = if game.participants.is_empty() {
        let mut seen = HashSet::new();
        rounds
            .iter()
            .flat_map(|round| &round.submissions)
            .filter(|submission| seen.insert(submission.player_id.as_str()))
            .map(|submission| (submission.player_id.clone(), submission.player_name.clone()))
            .collect()
    } else {
        game.participants
            .iter()
            .map(|participant| {
                (
                    participant.player.id.clone(),
                    participant.player.display_name.clone(),
                )
            })
            .collect()
    };

    let viewer_present = players.iter().any(|(id, _)| id == viewer_id);
    players.retain(|(id, _)| id != viewer_id);
    players.sort_by(|(id_a, name_a), (id_b, name_b)| {
        name_a
            .to_lowercase()
            .cmp(&name_b.to_lowercase())
            .then_with(|| id_a.cmp(id_b))
    });

    let mut ordered: Vec<String> = players.into_iter().map(|(id, _)| id).collect();
    if viewer_present {
        ordered.push(viewer_id.to_string());
    }
    ordered
}

/// The round the game was won in.
///
/// With a winning round number: that completed round if cached, else the
/// current round. Without one: the highest-numbered completed round, else the
/// current round.
#[must_use]
pub fn winning_round<'a>(
    game: &Game,
    completed: &'a [Round],
    current: Option<&'a Round>,
) -> Option<&'a Round> {
    let cached = match game.winning_round_number {
        Some(number) => completed.iter().find(|round| round.number == number),
        None => completed.iter().max_by_key(|round| round.number),
    };
    cached.or(current)
}

/// First non-empty goal word revealed in any submission's feedback.
#[must_use]
pub fn goal_word(rounds: &[&Round]) -> Option<String> {
    rounds
        .iter()
        .flat_map(|round| &round.submissions)
        .filter_map(|submission| submission.feedback.as_ref()?.goal.as_deref())
        .map(str::trim)
        .find(|goal| !goal.is_empty())
        .map(str::to_string)
}

/// Correct guessers holding the top score among correct guessers.
#[must_use]
pub fn winner_ids(game: &Game, round: &Round) -> Vec<String> {
    let mut seen = HashSet::new();
    let scored: Vec<(&str, i32)> = round
        .submissions
        .iter()
        .filter(|submission| submission.guessed_correctly())
        .filter(|submission| seen.insert(submission.player_id.as_str()))
        .map(|submission| {
            (
                submission.player_id.as_str(),
                game.score_for(&submission.player_id),
            )
        })
        .collect();

    let Some(best) = scored.iter().map(|(_, score)| *score).max() else {
        return Vec::new();
    };

    scored
        .into_iter()
        .filter(|(_, score)| *score == best)
        .map(|(player_id, _)| player_id.to_string())
        .collect()
}

/// Other players' phrases, newest round first, then by player name.
#[must_use]
pub fn reportable_phrases(rounds: &[&Round], viewer_id: &str) -> Vec<ReportablePhrase> {
    let mut seen = HashSet::new();
    let mut phrases: Vec<ReportablePhrase> = rounds
        .iter()
        .flat_map(|round| {
            round
                .submissions
                .iter()
                .map(move |submission| (round.number, submission))
        })
        .filter(|(_, submission)| submission.player_id != viewer_id)
        .filter_map(|(round_number, submission)| {
            let phrase = submission.trimmed_phrase()?;
            seen.insert(submission.id.clone()).then(|| ReportablePhrase {
                submission_id: submission.id.clone(),
                round_number,
                player_id: submission.player_id.clone(),
                player_name: submission.player_name.clone(),
                phrase: phrase.to_string(),
            })
        })
        .collect();

    phrases.sort_by(|a, b| {
        b.round_number
            .cmp(&a.round_number)
            .then_with(|| a.player_name.to_lowercase().cmp(&b.player_name.to_lowercase()))
    });
    phrases
}

/// Build a player report, rejecting a blank description.
///
/// # Errors
///
/// Returns `ClientError::Validation` when the description is blank.
pub fn player_report(player_id: &str, description: &str) -> Result<ReportRequest, ClientError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ClientError::Validation(
            "Please describe what happened.".to_string(),
        ));
    }

    Ok(ReportRequest {
        kind: ReportKind::Player,
        reported_player_id: Some(player_id.to_string()),
        submission_ids: Vec::new(),
        description: description.to_string(),
    })
}

/// Build a phrase report, rejecting an empty selection.
///
/// # Errors
///
/// Returns `ClientError::Validation` when no phrase is selected.
pub fn phrase_report(
    submission_ids: &[String],
    description: &str,
) -> Result<ReportRequest, ClientError> {
    if submission_ids.is_empty() {
        return Err(ClientError::Validation(
            "Select at least one phrase to report.".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    Ok(ReportRequest {
        kind: ReportKind::Phrase,
        reported_player_id: None,
        submission_ids: submission_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect(),
        description: description.trim().to_string(),
    })
}
