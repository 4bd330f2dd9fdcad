pub mod game;
pub mod round;

pub use game::{
    ReportKind, ReportRequest, UpdateGameStatusRequest, ValidateWordRequest, ValidateWordResponse,
};
pub use round::{SubmitGuessRequest, SubmitVotesRequest};
