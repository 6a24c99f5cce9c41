use ustar_lib::{Song, SongError};

use crate::SongCommand;

/// Undo/redo history. Executing a new command forgets everything that could have been redone.
#[derive(Default)]
pub struct CommandTracker {
    undo: Vec<Box<dyn SongCommand>>,
    redo: Vec<Box<dyn SongCommand>>,
}

impl CommandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `command` and records it. Commands that fail aren't recorded.
    pub fn execute(
        &mut self,
        song: &mut Song,
        mut command: impl SongCommand,
    ) -> Result<(), SongError> {
        command.execute(song)?;
        self.undo.push(Box::new(command));
        self.redo.clear();
        Ok(())
    }

    /// Returns `Ok(false)` when there's nothing to undo.
    pub fn undo(&mut self, song: &mut Song) -> Result<bool, SongError> {
        let Some(mut command) = self.undo.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.rollback(song) {
            tracing::warn!("undo failed: {err}");
            self.undo.push(command);
            return Err(err);
        }
        self.redo.push(command);
        Ok(true)
    }

    /// Returns `Ok(false)` when there's nothing to redo.
    pub fn redo(&mut self, song: &mut Song) -> Result<bool, SongError> {
        let Some(mut command) = self.redo.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.execute(song) {
            tracing::warn!("redo failed: {err}");
            self.redo.push(command);
            return Err(err);
        }
        self.undo.push(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
