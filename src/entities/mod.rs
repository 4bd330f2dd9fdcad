//! Server snapshot value types.
//!
//! Snapshots are never mutated after decoding; the reconciler only swaps a
//! held snapshot for a new one when the two differ.

pub mod game;
pub mod game_status;
pub mod player;
pub mod round;

pub use game::{Game, RoundSummary};
pub use game_status::{GameStatus, ParticipantRole, RoundStage, RoundStatus};
pub use player::{InvitedPlayer, Participant, Player};
pub use round::{Mark, Round, Submission, SubmissionFeedback, VIRTUAL_PLAYER_ID_PREFIX};
