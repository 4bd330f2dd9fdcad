pub mod feedback;
pub mod ordering;
pub mod reconciler;
pub mod report;

pub use feedback::marks;
pub use reconciler::{GameRoomModel, RefreshMode};
pub use report::ReportablePhrase;
