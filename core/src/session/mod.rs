//! Interactive session: selection state machine and turn driver

pub mod controller;
pub mod messages;
pub mod session;

pub use controller::{InputEvent, SelectionController, SelectionState};
pub use session::{FileOpener, QueryRunner, Session, TurnOutcome};
