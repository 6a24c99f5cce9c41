use ustar_lib::{Id, Note, Sentence, Song, SongError};

use crate::SongCommand;

// Removing a sentence detaches its notes but keeps them in the song, so undoing a removal can
// reattach the same notes.
pub struct SentenceAddOrRemove {
    id: Id<Sentence>,
    data: Option<Sentence>,
    voice: usize,
    position: usize,
    notes: Vec<Id<Note>>,
    is_removal: bool,
}

impl SentenceAddOrRemove {
    /// Appends `data` to the end of `voice`.
    pub fn addition(id: Id<Sentence>, data: Sentence, voice: usize) -> Self {
        Self {
            id,
            data: Some(data),
            voice,
            position: usize::MAX,
            notes: Vec::new(),
            is_removal: false,
        }
    }
    pub fn removal(id: Id<Sentence>) -> Self {
        Self {
            id,
            data: None,
            voice: 0,
            position: usize::MAX,
            notes: Vec::new(),
            is_removal: true,
        }
    }

    pub fn id(&self) -> Id<Sentence> {
        self.id
    }
    pub fn is_removal(&self) -> bool {
        self.is_removal
    }

    fn execute_add(&mut self, song: &mut Song) -> Result<(), SongError> {
        // everything that can fail is checked up front, so a failure leaves the song untouched
        song.voice(self.voice)?;
        if song.sentence(self.id).is_some() {
            return Err(SongError::DuplicateSentence(self.id));
        }
        if let Some(&missing) = self.notes.iter().find(|&&note| song.note(note).is_none()) {
            return Err(SongError::NoSuchNote(missing));
        }
        let data = self
            .data
            .take()
            .expect("execute() called on empty SentenceAddOrRemove");

        song.insert_sentence(self.id, data)?;
        song.insert_sentence_into_voice(self.voice, self.position, self.id)?;
        for note in std::mem::take(&mut self.notes) {
            song.set_note_sentence(note, Some(self.id))?;
        }
        Ok(())
    }
    fn execute_remove(&mut self, song: &mut Song) -> Result<(), SongError> {
        let sentence = song
            .sentence(self.id)
            .ok_or(SongError::NoSuchSentence(self.id))?;
        self.notes = sentence.notes().collect();
        if let Some((voice, position)) = song.voice_of(self.id) {
            self.voice = voice;
            self.position = position;
        }

        if self.data.replace(song.remove_sentence(self.id)?).is_some() {
            panic!("called execute_remove on nonempty SentenceAddOrRemove");
        }
        Ok(())
    }
}

impl SongCommand for SentenceAddOrRemove {
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
