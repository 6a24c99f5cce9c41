use crate::{Id, Sentence};

/// One singer's part. A duet has two.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voice {
    pub name: String,
    pub(crate) sentences: Vec<Id<Sentence>>,
}

impl Voice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sentences: Vec::new(),
        }
    }

    /// Sentence handles in insertion order. See
    /// [`Song::voice_sentences`](crate::Song::voice_sentences) for the time-ordered list.
    pub fn sentences(&self) -> &[Id<Sentence>] {
        &self.sentences
    }
}
