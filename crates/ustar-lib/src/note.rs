use std::cmp::Ordering;

use crate::{Id, NoteError, Range, Sentence};

/// How a note is scored and displayed.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteType {
    #[default]
    Normal,
    Golden,
    Freestyle,
    Rap,
    RapGolden,
}

impl NoteType {
    pub const ALL: [NoteType; 5] = [
        NoteType::Normal,
        NoteType::Golden,
        NoteType::Freestyle,
        NoteType::Rap,
        NoteType::RapGolden,
    ];

    pub fn is_golden(self) -> bool {
        matches!(self, Self::Golden | Self::RapGolden)
    }
    pub fn is_normal(self) -> bool {
        matches!(self, Self::Normal | Self::Rap)
    }
    pub fn is_freestyle(self) -> bool {
        matches!(self, Self::Freestyle)
    }
    pub fn is_rap(self) -> bool {
        matches!(self, Self::Rap | Self::RapGolden)
    }

    /// The character that starts a note line in a song file.
    pub fn txt_marker(self) -> char {
        match self {
            Self::Normal => ':',
            Self::Golden => '*',
            Self::Freestyle => 'F',
            Self::Rap => 'R',
            Self::RapGolden => 'G',
        }
    }
    pub fn from_txt_marker(marker: char) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.txt_marker() == marker)
    }
}

/// A single timed, pitched syllable of lyrics.
///
/// Notes that live inside a [`Song`](crate::Song) must have their beat range changed through the
/// song so that the owning sentence gets to see the change; the setters here only keep the
/// note itself consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    note_type: NoteType,
    range: Range,
    // Stored as a MIDI note. A pitch of 0 in a song file is middle C, which is MIDI note 60 (C4).
    midi_note: i32,
    text: String,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) sentence: Option<Id<Sentence>>,
}

impl Note {
    pub const MIDDLE_C: i32 = 60;

    pub fn new(
        note_type: NoteType,
        start_beat: i64,
        length: i64,
        txt_pitch: i32,
        text: impl Into<String>,
    ) -> Result<Self, NoteError> {
        if length < 0 {
            return Err(NoteError::NegativeLength { start_beat, length });
        }
        let end_beat = start_beat
            .checked_add(length)
            .ok_or(NoteError::OutOfRange { field: "end beat" })?;
        Ok(Self {
            note_type,
            range: Range::new(start_beat, end_beat),
            midi_note: Self::midi_from_txt_pitch(txt_pitch)?,
            text: text.into(),
            sentence: None,
        })
    }

    // both pitch views have to fit in an i32
    fn midi_from_txt_pitch(txt_pitch: i32) -> Result<i32, NoteError> {
        txt_pitch
            .checked_add(Self::MIDDLE_C)
            .ok_or(NoteError::OutOfRange { field: "pitch" })
    }
    fn check_midi_note(midi_note: i32) -> Result<i32, NoteError> {
        midi_note
            .checked_sub(Self::MIDDLE_C)
            .map(|_| midi_note)
            .ok_or(NoteError::OutOfRange { field: "pitch" })
    }
    fn checked_length(start_beat: i64, end_beat: i64) -> Result<i64, NoteError> {
        end_beat
            .checked_sub(start_beat)
            .ok_or(NoteError::OutOfRange { field: "length" })
    }

    pub fn note_type(&self) -> NoteType {
        self.note_type
    }
    pub fn is_golden(&self) -> bool {
        self.note_type.is_golden()
    }
    pub fn is_normal(&self) -> bool {
        self.note_type.is_normal()
    }
    pub fn is_freestyle(&self) -> bool {
        self.note_type.is_freestyle()
    }
    pub fn is_rap(&self) -> bool {
        self.note_type.is_rap()
    }

    #[inline]
    pub fn start_beat(&self) -> i64 {
        self.range.start
    }
    #[inline]
    pub fn end_beat(&self) -> i64 {
        self.range.end
    }
    #[inline]
    pub fn length(&self) -> i64 {
        self.range.length()
    }
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn txt_pitch(&self) -> i32 {
        self.midi_note - Self::MIDDLE_C
    }
    pub fn midi_note(&self) -> i32 {
        self.midi_note
    }
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The sentence this note belongs to, if any.
    pub fn sentence(&self) -> Option<Id<Sentence>> {
        self.sentence
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
    pub fn set_txt_pitch(&mut self, pitch: i32) -> Result<(), NoteError> {
        self.midi_note = Self::midi_from_txt_pitch(pitch)?;
        Ok(())
    }
    pub fn set_midi_note(&mut self, midi_note: i32) -> Result<(), NoteError> {
        self.midi_note = Self::check_midi_note(midi_note)?;
        Ok(())
    }
    pub fn set_type(&mut self, note_type: NoteType) {
        self.note_type = note_type;
    }

    /// Moves the start, keeping the end. Returns whether anything changed.
    pub fn set_start_beat(&mut self, start_beat: i64) -> Result<bool, NoteError> {
        if start_beat > self.range.end {
            return Err(NoteError::StartAfterEnd {
                start_beat,
                end_beat: self.range.end,
            });
        }
        if start_beat == self.range.start {
            return Ok(false);
        }
        Self::checked_length(start_beat, self.range.end)?;
        self.range.start = start_beat;
        Ok(true)
    }

    /// Moves the end, keeping the start. Returns whether anything changed.
    pub fn set_end_beat(&mut self, end_beat: i64) -> Result<bool, NoteError> {
        if end_beat < self.range.start {
            return Err(NoteError::EndBeforeStart {
                start_beat: self.range.start,
                end_beat,
            });
        }
        if end_beat == self.range.end {
            return Ok(false);
        }
        Self::checked_length(self.range.start, end_beat)?;
        self.range.end = end_beat;
        Ok(true)
    }

    /// Changes the length, keeping the start. Returns whether anything changed.
    pub fn set_length(&mut self, length: i64) -> Result<bool, NoteError> {
        if length < 0 {
            return Err(NoteError::NegativeLength {
                start_beat: self.range.start,
                length,
            });
        }
        if length == self.range.length() {
            return Ok(false);
        }
        self.range.end = self
            .range
            .start
            .checked_add(length)
            .ok_or(NoteError::OutOfRange { field: "end beat" })?;
        Ok(true)
    }

    /// Sets both ends at once, so a note can jump past its own old end in one step.
    pub fn set_range(&mut self, range: Range) -> Result<bool, NoteError> {
        if range.end < range.start {
            return Err(NoteError::EndBeforeStart {
                start_beat: range.start,
                end_beat: range.end,
            });
        }
        Self::checked_length(range.start, range.end)?;
        if range == self.range {
            return Ok(false);
        }
        self.range = range;
        Ok(true)
    }

    /// Shifts the note in time, keeping its length. Returns whether anything changed.
    pub fn move_by(&mut self, delta_beats: i64) -> Result<bool, NoteError> {
        let out_of_range = NoteError::OutOfRange { field: "start beat" };
        let start = self.range.start.checked_add(delta_beats).ok_or(out_of_range)?;
        let end = self.range.end.checked_add(delta_beats).ok_or(out_of_range)?;
        self.range = Range::new(start, end);
        Ok(delta_beats != 0)
    }
}

impl Default for Note {
    fn default() -> Self {
        Self {
            note_type: NoteType::Normal,
            range: Range::EMPTY,
            midi_note: Self::MIDDLE_C,
            text: String::new(),
            sentence: None,
        }
    }
}

/// Orders notes by start beat. Missing notes sort before present ones.
pub fn compare_by_start_beat(a: Option<&Note>, b: Option<&Note>) -> Ordering {
    a.map(Note::start_beat).cmp(&b.map(Note::start_beat))
}
