//! Stateful scheduling-board session layer.
//!
//! Owns the loaded schedule snapshot and the controllers that mutate it:
//! drag-and-drop assignment, the shift detail editor, and the
//! reload-on-success flow that keeps the board convergent while commands
//! interleave. All mutation goes out through [`transport::CommandTransport`]
//! and comes back as a wholesale re-fetch; nothing patches the snapshot
//! in place.

pub mod dragdrop;
pub mod editor;
pub mod error;
pub mod session;
pub mod transport;
pub mod views;

pub use error::BoardError;
pub use session::ScheduleBoard;
