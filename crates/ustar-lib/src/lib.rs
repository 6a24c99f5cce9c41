mod note;
pub use note::{Note, NoteType, compare_by_start_beat};
mod sentence;
pub use sentence::Sentence;
mod voice;
pub use voice::Voice;
mod song;
pub use song::Song;
mod range;
pub use range::Range;
mod id;
pub use id::{Id, IdMap};
mod error;
pub use error::{NoteError, SongError, TxtError, TxtErrorKind};
mod tempo;
pub use tempo::{BeatClock, FixedTempo};
pub mod overview;
pub mod txt;

pub fn midi_note_to_hertz(midi_note: i32) -> f32 {
    const A4_FREQUENCY: f32 = 440.0;
    const A4_MIDI_NOTE: i32 = 69;

    A4_FREQUENCY * 2f32.powf((midi_note - A4_MIDI_NOTE) as f32 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::midi_note_to_hertz;

    #[test]
    fn test_midi_note_to_hertz() {
        assert!((midi_note_to_hertz(69) - 440.0).abs() < 1e-3);
        assert!((midi_note_to_hertz(60) - 261.6256).abs() < 1e-2);
        assert!((midi_note_to_hertz(81) - 880.0).abs() < 1e-2);
    }
}
