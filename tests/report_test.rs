//! End-of-game report derivations through `GameRoomModel`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::{
    FakeGameApi, VIEWER, closed_round, game, open_round, participant, revealed, submission,
};
use wordsmoke_client::dto::ReportKind;
use wordsmoke_client::entities::GameStatus;

/// Completed game with two closed rounds; round 2 solved by ann and Bob.
async fn finished_game(
    ann_score: i32,
    bob_score: i32,
) -> (FakeGameApi, wordsmoke_client::GameRoomModel) {
    let mut finished = game(None);
    finished.status = GameStatus::Completed;
    finished.participants = vec![
        participant(VIEWER, "Vera", 3),
        participant("p-ann", "ann", ann_score),
        participant("p-bob", "Bob", bob_score),
    ];
    finished.winning_round_number = Some(2);
    let server = FakeGameApi::new(finished);

    let mut first = closed_round("r1", 1);
    first.submissions = vec![
        revealed("s1-a", "p-ann", "ann", "crane", "smoke"),
        revealed("s1-b", "p-bob", "Bob", "smile", "smoke"),
        revealed("s1-v", VIEWER, "Vera", "stoke", "smoke"),
    ];
    let mut second = closed_round("r2", 2);
    second.submissions = vec![
        revealed("s2-a", "p-ann", "ann", "smoke", "smoke"),
        revealed("s2-b", "p-bob", "Bob", "smoke", "smoke"),
        revealed("s2-v", VIEWER, "Vera", "spoke", "smoke"),
    ];
    server.put_round(second);
    server.put_round(first);

    let mut model = server.model();
    model.refresh_round().await;
    (server, model)
}

// ─────────────────────────────────────────────────────────────────────────────
// Rounds and winners
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_rounds_are_ascending_and_deduplicated() {
    let (_server, model) = finished_game(5, 5).await;

    let ids: Vec<&str> = model.report_rounds().iter().map(|r| r.id.as_str()).collect();

    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn winning_round_uses_game_round_number() {
    let (_server, model) = finished_game(5, 5).await;

    assert_eq!(model.winning_round().map(|r| r.id.as_str()), Some("r2"));
}

#[tokio::test]
async fn tied_winners_are_all_returned() {
    let (_server, model) = finished_game(5, 5).await;
    let round = model.winning_round().cloned().unwrap();

    let mut winners = model.winner_ids(&round);
    winners.sort();

    assert_eq!(winners, vec!["p-ann".to_string(), "p-bob".to_string()]);
}

#[tokio::test]
async fn higher_score_wins_among_correct_guessers() {
    let (_server, model) = finished_game(4, 7).await;
    let round = model.winning_round().cloned().unwrap();

    assert_eq!(model.winner_ids(&round), vec!["p-bob".to_string()]);
}

#[tokio::test]
async fn round_without_correct_guess_has_no_winner() {
    let (_server, model) = finished_game(5, 5).await;
    let first = model.completed_rounds()[0].clone();

    assert!(model.winner_ids(&first).is_empty());
}

#[tokio::test]
async fn goal_word_comes_from_revealed_feedback() {
    let (_server, model) = finished_game(5, 5).await;

    assert_eq!(model.goal_word(), Some("smoke".to_string()));
}

#[tokio::test]
async fn goal_word_is_none_before_reveal() {
    let server = FakeGameApi::new(game(Some("r1")));
    let mut open = open_round("r1", 1);
    open.submissions.push(submission("s1", "p-ann", "ann"));
    server.put_round(open);
    let mut model = server.model();
    model.refresh_round().await;

    assert_eq!(model.goal_word(), None);
    assert_eq!(model.report_rounds().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Player ordering
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn players_sorted_by_name_with_viewer_last() {
    let (_server, model) = finished_game(5, 5).await;
    let rounds = model.report_rounds();

    assert_eq!(
        model.ordered_player_ids_for_report(&rounds),
        vec![
            "p-ann".to_string(),
            "p-bob".to_string(),
            VIEWER.to_string()
        ]
    );
}

#[tokio::test]
async fn player_order_falls_back_to_submissions() {
    let mut anonymous = game(None);
    anonymous.participants.clear();
    let server = FakeGameApi::new(anonymous);
    let mut closed = closed_round("r1", 1);
    closed.submissions = vec![
        submission("s1", "p-zed", "Zed"),
        submission("s2", VIEWER, "Vera"),
        submission("s3", "p-amy", "amy"),
    ];
    server.put_round(closed);
    let mut model = server.model();
    model.refresh_round().await;

    let rounds = model.report_rounds();

    assert_eq!(
        model.ordered_player_ids_for_report(&rounds),
        vec!["p-amy".to_string(), "p-zed".to_string(), VIEWER.to_string()]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Reports
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reportable_phrases_newest_round_first() {
    let (_server, model) = finished_game(5, 5).await;

    let phrases: Vec<(u32, String)> = model
        .reportable_phrases()
        .into_iter()
        .map(|p| (p.round_number, p.submission_id))
        .collect();

    assert_eq!(
        phrases,
        vec![
            (2, "s2-a".to_string()),
            (2, "s2-b".to_string()),
            (1, "s1-a".to_string()),
            (1, "s1-b".to_string()),
        ]
    );
}

#[tokio::test]
async fn player_report_is_sent() {
    let (server, model) = finished_game(5, 5).await;

    model
        .report_player("p-bob", "  offensive nickname ")
        .await
        .unwrap();

    let reports = server.state().reports.clone();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ReportKind::Player);
    assert_eq!(reports[0].reported_player_id.as_deref(), Some("p-bob"));
    assert_eq!(reports[0].description, "offensive nickname");
}

#[tokio::test]
async fn blank_player_report_is_rejected_locally() {
    let (server, model) = finished_game(5, 5).await;

    let err = model.report_player("p-bob", "   ").await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Please describe what happened.");
    assert!(server.state().reports.is_empty());
    assert_eq!(model.error_message(), None);
}

#[tokio::test]
async fn phrase_report_needs_a_selection() {
    let (server, model) = finished_game(5, 5).await;

    let err = model.report_phrases(&[], "spam").await.unwrap_err();
    assert_eq!(err.to_string(), "Select at least one phrase to report.");
    assert!(server.state().reports.is_empty());

    model
        .report_phrases(&["s2-a".to_string(), "s1-b".to_string()], "")
        .await
        .unwrap();
    let reports = server.state().reports.clone();
    assert_eq!(reports[0].kind, ReportKind::Phrase);
    assert_eq!(
        reports[0].submission_ids,
        vec!["s2-a".to_string(), "s1-b".to_string()]
    );
}
