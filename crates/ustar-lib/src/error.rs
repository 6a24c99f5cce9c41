use thiserror::Error;

use crate::{Id, Note, Sentence};

/// Invalid arguments to a [`Note`] constructor or setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("illegal note length {length} for note starting at beat {start_beat}")]
    NegativeLength { start_beat: i64, length: i64 },
    #[error("start beat {start_beat} must be less or equal to end beat {end_beat}")]
    StartAfterEnd { start_beat: i64, end_beat: i64 },
    #[error("end beat {end_beat} must be greater or equal to start beat {start_beat}")]
    EndBeforeStart { start_beat: i64, end_beat: i64 },
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SongError {
    #[error("no note with {0:?} in this song")]
    NoSuchNote(Id<Note>),
    #[error("no sentence with {0:?} in this song")]
    NoSuchSentence(Id<Sentence>),
    #[error("no voice at index {0}")]
    NoSuchVoice(usize),
    #[error("{0:?} is already in this song")]
    DuplicateNote(Id<Note>),
    #[error("{0:?} is already in this song")]
    DuplicateSentence(Id<Sentence>),
    #[error(transparent)]
    Note(#[from] NoteError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct TxtError {
    pub line: usize,
    pub kind: TxtErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxtErrorKind {
    #[error("unknown line marker {0:?}")]
    UnknownMarker(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not an integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },
    #[error(transparent)]
    Note(#[from] NoteError),
}
