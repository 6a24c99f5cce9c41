use std::collections::BTreeSet;

use crate::{Id, Note, Range};

/// One displayed line of lyrics.
///
/// A sentence only holds handles to its notes, keyed by start beat. The notes themselves live in
/// the [`Song`](crate::Song), which keeps both sides in sync.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentence {
    // None until the sentence has seen its first note (or was given explicit bounds)
    range: Option<Range>,
    /// Beat of the line break that ends this sentence, as written in a song file.
    pub linebreak_beat: Option<i64>,

    // Notes sorted by starting position
    notes: BTreeSet<(i64, Id<Note>)>,
}

impl Sentence {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn with_range(range: Range) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }

    pub fn range(&self) -> Option<Range> {
        self.range
    }
    pub fn min_beat(&self) -> Option<i64> {
        self.range.map(|r| r.start)
    }
    pub fn max_beat(&self) -> Option<i64> {
        self.range.map(|r| r.end)
    }

    pub fn notes(&self) -> impl DoubleEndedIterator<Item = Id<Note>> + '_ {
        self.notes.iter().map(|&(_, id)| id)
    }
    pub fn contains(&self, note_start: i64, note_id: Id<Note>) -> bool {
        self.notes.contains(&(note_start, note_id))
    }
    pub fn len(&self) -> usize {
        self.notes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub(crate) fn add_note(&mut self, note_id: Id<Note>, note_range: Range) {
        let newly_added = self.notes.insert((note_range.start, note_id));
        debug_assert!(newly_added, "{note_id:?} already in sentence");
        self.expand_start_and_end_beat(note_range);
    }

    /// Removes the note, then shrinks the bounds to the remaining notes. A sentence that becomes
    /// empty keeps its last bounds.
    pub(crate) fn remove_note(
        &mut self,
        note_id: Id<Note>,
        note_start: i64,
        remaining_range: impl Fn(Id<Note>) -> Range,
    ) {
        let removed = self.notes.remove(&(note_start, note_id));
        assert!(removed, "{note_id:?} isn't part of this sentence");
        if !self.notes.is_empty() {
            self.fit_to_notes(remaining_range);
        }
    }

    pub(crate) fn clear_notes(&mut self) {
        self.notes.clear();
    }

    /// Re-keys a member whose start beat changed.
    pub(crate) fn rekey_note(&mut self, note_id: Id<Note>, old_start: i64, new_start: i64) {
        if old_start == new_start {
            return;
        }
        let removed = self.notes.remove(&(old_start, note_id));
        assert!(removed, "{note_id:?} isn't part of this sentence");
        self.notes.insert((new_start, note_id));
    }

    /// Grows the bounds so they cover `note_range`. Never shrinks them.
    pub fn expand_start_and_end_beat(&mut self, note_range: Range) {
        let expanded = match self.range {
            None => note_range,
            Some(range) => range.union(note_range),
        };
        if self.range != Some(expanded) {
            tracing::debug!("sentence range expanded to {expanded:?}");
            self.range = Some(expanded);
        }
    }

    /// Sets the bounds to exactly cover the member notes. Leaves them alone when there are none.
    pub fn fit_to_notes(&mut self, note_range: impl Fn(Id<Note>) -> Range) {
        self.range = self
            .notes()
            .map(note_range)
            .reduce(|a, b| a.union(b))
            .or(self.range);
    }
}
