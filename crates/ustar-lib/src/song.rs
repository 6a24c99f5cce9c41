use crate::{Id, IdMap, Note, NoteError, NoteType, Range, Sentence, SongError, Voice};

/// Owns every note, sentence and voice of a song.
///
/// Notes point back at their sentence with a plain [`Id`], and sentences only hold note ids, so
/// anything that touches both sides goes through here.
#[derive(Clone, Debug, Default)]
pub struct Song {
    notes: IdMap<Note>,
    sentences: IdMap<Sentence>,
    voices: Vec<Voice>,
}

impl Song {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&self, id: Id<Note>) -> Option<&Note> {
        self.notes.get(id)
    }
    pub fn notes(&self) -> impl Iterator<Item = (Id<Note>, &Note)> {
        self.notes.iter()
    }
    pub fn sentence(&self, id: Id<Sentence>) -> Option<&Sentence> {
        self.sentences.get(id)
    }
    pub fn sentences(&self) -> impl Iterator<Item = (Id<Sentence>, &Sentence)> {
        self.sentences.iter()
    }
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }
    pub fn voice(&self, index: usize) -> Result<&Voice, SongError> {
        self.voices.get(index).ok_or(SongError::NoSuchVoice(index))
    }

    fn try_note(&self, id: Id<Note>) -> Result<&Note, SongError> {
        self.notes.get(id).ok_or(SongError::NoSuchNote(id))
    }
    fn try_note_mut(&mut self, id: Id<Note>) -> Result<&mut Note, SongError> {
        self.notes.get_mut(id).ok_or(SongError::NoSuchNote(id))
    }
    fn check_sentence(&self, id: Id<Sentence>) -> Result<(), SongError> {
        if self.sentences.has(id) {
            Ok(())
        } else {
            Err(SongError::NoSuchSentence(id))
        }
    }

    pub fn add_note(&mut self, mut note: Note) -> Id<Note> {
        let id = Id::arbitrary();
        note.sentence = None;
        self.notes.insert(id, note);
        id
    }
    /// Inserts a detached note under a known id.
    pub fn insert_note(&mut self, id: Id<Note>, mut note: Note) -> Result<(), SongError> {
        if self.notes.has(id) {
            return Err(SongError::DuplicateNote(id));
        }
        note.sentence = None;
        self.notes.insert(id, note);
        Ok(())
    }
    /// Removes the note, detaching it from its sentence first.
    pub fn remove_note(&mut self, id: Id<Note>) -> Result<Note, SongError> {
        self.set_note_sentence(id, None)?;
        self.notes.remove(id).ok_or(SongError::NoSuchNote(id))
    }

    pub fn add_sentence(&mut self, mut sentence: Sentence) -> Id<Sentence> {
        let id = Id::arbitrary();
        sentence.clear_notes();
        self.sentences.insert(id, sentence);
        id
    }
    /// Inserts a sentence under a known id. Any note memberships it carries are dropped; attach
    /// notes with [`Song::set_note_sentence`].
    pub fn insert_sentence(
        &mut self,
        id: Id<Sentence>,
        mut sentence: Sentence,
    ) -> Result<(), SongError> {
        if self.sentences.has(id) {
            return Err(SongError::DuplicateSentence(id));
        }
        sentence.clear_notes();
        self.sentences.insert(id, sentence);
        Ok(())
    }
    /// Removes the sentence. Its notes stay in the song, detached.
    pub fn remove_sentence(&mut self, id: Id<Sentence>) -> Result<Sentence, SongError> {
        let sentence = self
            .sentences
            .remove(id)
            .ok_or(SongError::NoSuchSentence(id))?;
        for note_id in sentence.notes() {
            self.notes.force_get_mut(note_id).sentence = None;
        }
        for voice in &mut self.voices {
            voice.sentences.retain(|&s| s != id);
        }
        tracing::debug!("removed {id:?} with {} notes", sentence.len());
        Ok(sentence)
    }

    pub fn set_sentence_linebreak(
        &mut self,
        id: Id<Sentence>,
        linebreak_beat: Option<i64>,
    ) -> Result<(), SongError> {
        self.sentences
            .get_mut(id)
            .ok_or(SongError::NoSuchSentence(id))?
            .linebreak_beat = linebreak_beat;
        Ok(())
    }

    /// Moves a note to another sentence (or to none). Does nothing if it's already there.
    pub fn set_note_sentence(
        &mut self,
        note_id: Id<Note>,
        sentence_id: Option<Id<Sentence>>,
    ) -> Result<(), SongError> {
        let note = self.try_note(note_id)?;
        if let Some(sentence_id) = sentence_id {
            self.check_sentence(sentence_id)?;
        }
        if note.sentence == sentence_id {
            return Ok(());
        }
        let (old_sentence, range) = (note.sentence, note.range());

        let notes = &self.notes;
        if let Some(old_sentence) = old_sentence {
            self.sentences
                .force_get_mut(old_sentence)
                .remove_note(note_id, range.start, |other| {
                    notes.force_get(other).range()
                });
        }
        if let Some(sentence_id) = sentence_id {
            self.sentences
                .force_get_mut(sentence_id)
                .add_note(note_id, range);
        }
        self.notes.force_get_mut(note_id).sentence = sentence_id;

        tracing::debug!("{note_id:?} moved from {old_sentence:?} to {sentence_id:?}");
        Ok(())
    }

    fn on_note_position_changed(&mut self, note_id: Id<Note>, old_start: i64) {
        let note = self.notes.force_get(note_id);
        let Some(sentence_id) = note.sentence else {
            return;
        };
        let range = note.range();
        let sentence = self.sentences.force_get_mut(sentence_id);
        sentence.rekey_note(note_id, old_start, range.start);
        sentence.expand_start_and_end_beat(range);
    }

    fn change_position(
        &mut self,
        note_id: Id<Note>,
        f: impl FnOnce(&mut Note) -> Result<bool, SongError>,
    ) -> Result<bool, SongError> {
        let note = self.try_note_mut(note_id)?;
        let old_start = note.start_beat();
        let changed = f(note)?;
        if changed {
            self.on_note_position_changed(note_id, old_start);
        } else {
            tracing::trace!("{note_id:?} position unchanged");
        }
        Ok(changed)
    }

    pub fn set_note_start_beat(
        &mut self,
        id: Id<Note>,
        start_beat: i64,
    ) -> Result<bool, SongError> {
        self.change_position(id, |note| Ok(note.set_start_beat(start_beat)?))
    }
    pub fn set_note_end_beat(&mut self, id: Id<Note>, end_beat: i64) -> Result<bool, SongError> {
        self.change_position(id, |note| Ok(note.set_end_beat(end_beat)?))
    }
    pub fn set_note_length(&mut self, id: Id<Note>, length: i64) -> Result<bool, SongError> {
        self.change_position(id, |note| Ok(note.set_length(length)?))
    }
    /// Sets both ends at once. The range is checked as a whole, so a note can be moved past its
    /// own old end in one step.
    pub fn set_note_range(&mut self, id: Id<Note>, range: Range) -> Result<bool, SongError> {
        self.change_position(id, |note| Ok(note.set_range(range)?))
    }
    /// Shifts a note in time and pitch.
    pub fn move_note(
        &mut self,
        id: Id<Note>,
        delta_beats: i64,
        pitch_offset: i32,
    ) -> Result<(), SongError> {
        self.change_position(id, |note| {
            let midi_note = note
                .midi_note()
                .checked_add(pitch_offset)
                .ok_or(NoteError::OutOfRange { field: "pitch" })?;
            // work on a copy so a failure leaves the note untouched
            let mut moved = note.clone();
            moved.set_midi_note(midi_note)?;
            let changed = moved.move_by(delta_beats)?;
            *note = moved;
            Ok(changed)
        })?;
        Ok(())
    }

    pub fn set_note_text(
        &mut self,
        id: Id<Note>,
        text: impl Into<String>,
    ) -> Result<(), SongError> {
        self.try_note_mut(id)?.set_text(text);
        Ok(())
    }
    pub fn set_note_type(&mut self, id: Id<Note>, note_type: NoteType) -> Result<(), SongError> {
        self.try_note_mut(id)?.set_type(note_type);
        Ok(())
    }
    pub fn set_note_txt_pitch(&mut self, id: Id<Note>, pitch: i32) -> Result<(), SongError> {
        Ok(self.try_note_mut(id)?.set_txt_pitch(pitch)?)
    }
    pub fn set_note_midi_note(&mut self, id: Id<Note>, midi_note: i32) -> Result<(), SongError> {
        Ok(self.try_note_mut(id)?.set_midi_note(midi_note)?)
    }

    pub fn add_voice(&mut self, name: impl Into<String>) -> usize {
        self.voices.push(Voice::new(name));
        self.voices.len() - 1
    }

    /// Which voice a sentence belongs to, as `(voice index, position within the voice)`.
    pub fn voice_of(&self, sentence_id: Id<Sentence>) -> Option<(usize, usize)> {
        self.voices.iter().enumerate().find_map(|(voice_index, voice)| {
            voice
                .sentences
                .iter()
                .position(|&s| s == sentence_id)
                .map(|pos| (voice_index, pos))
        })
    }

    /// Appends a sentence to a voice, taking it out of whatever voice it was in before.
    pub fn push_sentence_to_voice(
        &mut self,
        voice: usize,
        sentence_id: Id<Sentence>,
    ) -> Result<(), SongError> {
        let len = self.voice(voice)?.sentences.len();
        self.insert_sentence_into_voice(voice, len, sentence_id)
    }

    /// Like [`Song::push_sentence_to_voice`], but at a given position. Positions past the end
    /// append.
    pub fn insert_sentence_into_voice(
        &mut self,
        voice: usize,
        position: usize,
        sentence_id: Id<Sentence>,
    ) -> Result<(), SongError> {
        self.voice(voice)?;
        self.check_sentence(sentence_id)?;
        for v in &mut self.voices {
            v.sentences.retain(|&s| s != sentence_id);
        }
        let sentences = &mut self.voices[voice].sentences;
        sentences.insert(position.min(sentences.len()), sentence_id);
        Ok(())
    }

    /// The voice's sentences ordered by start beat. Sentences without a range come first.
    pub fn voice_sentences(&self, voice: usize) -> Result<Vec<Id<Sentence>>, SongError> {
        let mut sentences = self.voice(voice)?.sentences.clone();
        sentences.sort_by_key(|&id| self.sentences.force_get(id).min_beat());
        Ok(sentences)
    }

    /// Every note sung by the voice, sentence by sentence.
    pub fn voice_notes(&self, voice: usize) -> Result<Vec<Id<Note>>, SongError> {
        Ok(self
            .voice_sentences(voice)?
            .into_iter()
            .flat_map(|id| self.sentences.force_get(id).notes())
            .collect())
    }
}
