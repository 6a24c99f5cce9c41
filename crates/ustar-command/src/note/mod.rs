use ustar_lib::{Id, Note, NoteType, Range, Sentence, Song, SongError};

use crate::SongCommand;

pub struct NoteMove {
    note_id: Id<Note>,
    delta_beats: i64,
    pitch_offset: i32,
}

impl NoteMove {
    pub fn new(note_id: Id<Note>, delta_beats: i64, pitch_offset: i32) -> Self {
        Self {
            note_id,
            delta_beats,
            pitch_offset,
        }
    }
}

impl SongCommand for NoteMove {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError> {
        song.move_note(self.note_id, self.delta_beats, self.pitch_offset)
    }
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError> {
        song.move_note(self.note_id, -self.delta_beats, -self.pitch_offset)
    }
}

/// Changes a note's start and end. The owning sentence only ever grows, so undoing a resize
/// restores the note but not the sentence bounds.
pub struct NoteResize {
    note_id: Id<Note>,
    range: Range,
}

impl NoteResize {
    pub fn new(note_id: Id<Note>, new_range: Range) -> Self {
        Self {
            note_id,
            range: new_range,
        }
    }

    fn swap(&mut self, song: &mut Song) -> Result<(), SongError> {
        let old_range = song
            .note(self.note_id)
            .ok_or(SongError::NoSuchNote(self.note_id))?
            .range();
        song.set_note_range(self.note_id, self.range)?;
        self.range = old_range;
        Ok(())
    }
}

impl SongCommand for NoteResize {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
}

pub struct NoteRetext {
    note_id: Id<Note>,
    text: String,
}

impl NoteRetext {
    pub fn new(note_id: Id<Note>, text: impl Into<String>) -> Self {
        Self {
            note_id,
            text: text.into(),
        }
    }

    fn swap(&mut self, song: &mut Song) -> Result<(), SongError> {
        let old_text = song
            .note(self.note_id)
            .ok_or(SongError::NoSuchNote(self.note_id))?
            .text()
            .to_owned();
        song.set_note_text(self.note_id, std::mem::replace(&mut self.text, old_text))
    }
}

impl SongCommand for NoteRetext {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
}

pub struct NoteRetype {
    note_id: Id<Note>,
    note_type: NoteType,
}

impl NoteRetype {
    pub fn new(note_id: Id<Note>, note_type: NoteType) -> Self {
        Self { note_id, note_type }
    }

    fn swap(&mut self, song: &mut Song) -> Result<(), SongError> {
        let old_type = song
            .note(self.note_id)
            .ok_or(SongError::NoSuchNote(self.note_id))?
            .note_type();
        song.set_note_type(self.note_id, self.note_type)?;
        self.note_type = old_type;
        Ok(())
    }
}

impl SongCommand for NoteRetype {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
}

/// Moves a note into another sentence, or out of any sentence with `None`.
pub struct NoteReassign {
    note_id: Id<Note>,
    sentence: Option<Id<Sentence>>,
}

impl NoteReassign {
    pub fn new(note_id: Id<Note>, sentence: Option<Id<Sentence>>) -> Self {
        Self { note_id, sentence }
    }

    fn swap(&mut self, song: &mut Song) -> Result<(), SongError> {
        let old_sentence = song
            .note(self.note_id)
            .ok_or(SongError::NoSuchNote(self.note_id))?
            .sentence();
        song.set_note_sentence(self.note_id, self.sentence)?;
        self.sentence = old_sentence;
        Ok(())
    }
}

impl SongCommand for NoteReassign {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.swap(song)
    }
}

pub struct NoteAddOrRemove {
    id: Id<Note>,
    sentence: Option<Id<Sentence>>,
    data: Option<Note>,
    is_removal: bool,
}

impl NoteAddOrRemove {
    pub fn addition(id: Id<Note>, data: Note, sentence: Option<Id<Sentence>>) -> Self {
        Self {
            id,
            sentence,
            data: Some(data),
            is_removal: false,
        }
    }
    pub fn removal(id: Id<Note>) -> Self {
        Self {
            id,
            sentence: None,
            data: None,
            is_removal: true,
        }
    }

    pub fn id(&self) -> Id<Note> {
        self.id
    }
    pub fn is_removal(&self) -> bool {
        self.is_removal
    }

    fn execute_add(&mut self, song: &mut Song) -> Result<(), SongError> {
        if let Some(sentence) = self.sentence {
            if song.sentence(sentence).is_none() {
                return Err(SongError::NoSuchSentence(sentence));
            }
        }
        if song.note(self.id).is_some() {
            return Err(SongError::DuplicateNote(self.id));
        }
        let note_data = self
            .data
            .take()
            .expect("called execute_add on empty NoteAddOrRemove");

        song.insert_note(self.id, note_data)?;
        song.set_note_sentence(self.id, self.sentence)
    }
    fn execute_remove(&mut self, song: &mut Song) -> Result<(), SongError> {
        self.sentence = song
            .note(self.id)
            .ok_or(SongError::NoSuchNote(self.id))?
            .sentence();
        let note_data = song.remove_note(self.id)?;

        if self.data.replace(note_data).is_some() {
            panic!("called execute_remove on nonempty NoteAddOrRemove");
        }
        Ok(())
    }
}

impl SongCommand for NoteAddOrRemove {
    fn execute(&mut self, song: &mut Song) -> Result<(), SongError> {
        if self.is_removal {
            self.execute_remove(song)
        } else {
            self.execute_add(song)
        }
    }
    fn rollback(&mut self, song: &mut Song) -> Result<(), SongError> {
        if self.is_removal {
            self.execute_add(song)
        } else {
            self.execute_remove(song)
        }
    }
}

#[cfg(test)]
mod tests {
    use ustar_lib::{Id, Note, NoteType, Range, Sentence, Song, SongError};

    use super::{NoteAddOrRemove, NoteMove, NoteReassign, NoteResize, NoteRetext, NoteRetype};
    use crate::CommandTracker;

    fn song_with_note() -> (Song, Id<Sentence>, Id<Note>) {
        let mut song = Song::new();
        let sentence = song.add_sentence(Sentence::empty());
        let note = song.add_note(Note::new(NoteType::Normal, 4, 2, 0, "la").unwrap());
        song.set_note_sentence(note, Some(sentence)).unwrap();
        (song, sentence, note)
    }

    #[test]
    fn test_add_and_remove() {
        let (mut song, sentence, _) = song_with_note();
        let mut tracker = CommandTracker::new();

        let id = Id::arbitrary();
        let note = Note::new(NoteType::Golden, 8, 4, 2, "lo").unwrap();
        tracker
            .execute(&mut song, NoteAddOrRemove::addition(id, note, Some(sentence)))
            .unwrap();
        assert_eq!(song.sentence(sentence).unwrap().len(), 2);
        assert_eq!(song.sentence(sentence).unwrap().range(), Some(Range::new(4, 12)));

        assert_eq!(tracker.undo(&mut song), Ok(true));
        assert!(song.note(id).is_none());
        assert_eq!(song.sentence(sentence).unwrap().range(), Some(Range::new(4, 6)));

        assert_eq!(tracker.redo(&mut song), Ok(true));
        assert_eq!(song.note(id).unwrap().sentence(), Some(sentence));

        tracker
            .execute(&mut song, NoteAddOrRemove::removal(id))
            .unwrap();
        assert!(song.note(id).is_none());
        assert!(!tracker.can_redo());
        tracker.undo(&mut song).unwrap();
        assert_eq!(song.note(id).unwrap().text(), "lo");
        assert_eq!(song.note(id).unwrap().sentence(), Some(sentence));
    }

    #[test]
    fn test_add_existing_id() {
        let (mut song, _, note) = song_with_note();
        let mut tracker = CommandTracker::new();
        let duplicate = Note::new(NoteType::Normal, 0, 1, 0, "oops").unwrap();

        assert_eq!(
            tracker.execute(&mut song, NoteAddOrRemove::addition(note, duplicate, None)),
            Err(SongError::DuplicateNote(note))
        );
        assert_eq!(song.note(note).unwrap().text(), "la");
        assert!(!tracker.can_undo());
    }

    #[test]
    fn test_failed_commands_are_not_recorded() {
        let (mut song, _, _) = song_with_note();
        let mut tracker = CommandTracker::new();
        let missing = Id::arbitrary();

        assert_eq!(
            tracker.execute(&mut song, NoteMove::new(missing, 1, 0)),
            Err(SongError::NoSuchNote(missing))
        );
        assert!(!tracker.can_undo());
        assert_eq!(tracker.undo(&mut song), Ok(false));
    }

    #[test]
    fn test_move_and_resize() {
        let (mut song, _, note) = song_with_note();
        let mut tracker = CommandTracker::new();

        tracker
            .execute(&mut song, NoteMove::new(note, 3, -2))
            .unwrap();
        assert_eq!(song.note(note).unwrap().range(), Range::new(7, 9));
        assert_eq!(song.note(note).unwrap().txt_pitch(), -2);

        tracker
            .execute(&mut song, NoteResize::new(note, Range::new(0, 1)))
            .unwrap();
        assert_eq!(song.note(note).unwrap().range(), Range::new(0, 1));

        assert!(
            tracker
                .execute(&mut song, NoteResize::new(note, Range::new(3, 2)))
                .is_err()
        );

        tracker.undo(&mut song).unwrap();
        assert_eq!(song.note(note).unwrap().range(), Range::new(7, 9));
        tracker.undo(&mut song).unwrap();
        assert_eq!(song.note(note).unwrap().range(), Range::new(4, 6));
        assert_eq!(song.note(note).unwrap().txt_pitch(), 0);
        assert_eq!(tracker.undo(&mut song), Ok(false));
    }

    #[test]
    fn test_swaps() {
        let (mut song, sentence, note) = song_with_note();
        let other = song.add_sentence(Sentence::empty());
        let mut tracker = CommandTracker::new();

        tracker
            .execute(&mut song, NoteRetext::new(note, "lu"))
            .unwrap();
        tracker
            .execute(&mut song, NoteRetype::new(note, NoteType::Freestyle))
            .unwrap();
        tracker
            .execute(&mut song, NoteReassign::new(note, Some(other)))
            .unwrap();
        let n = song.note(note).unwrap();
        assert_eq!((n.text(), n.is_freestyle(), n.sentence()), ("lu", true, Some(other)));

        while tracker.undo(&mut song).unwrap() {}
        let n = song.note(note).unwrap();
        assert_eq!((n.text(), n.is_normal(), n.sentence()), ("la", true, Some(sentence)));
        assert!(song.sentence(other).unwrap().is_empty());

        while tracker.redo(&mut song).unwrap() {}
        assert_eq!(song.note(note).unwrap().text(), "lu");
        assert_eq!(song.note(note).unwrap().sentence(), Some(other));
    }
}
