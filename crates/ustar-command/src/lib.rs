//! Undoable edits for ustar songs. Separate from `ustar-lib` because it's not strictly needed to
//! store a song.

use ustar_lib::{Song, SongError};

pub mod note;
pub mod sentence;
mod tracker;
pub use tracker::CommandTracker;

/// An edit that can be applied to a [`Song`] and taken back.
///
/// `rollback` is only ever called after a successful `execute`, and the other way around.
pub trait SongCommand: 'static + Send {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError>;
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError>;
}
