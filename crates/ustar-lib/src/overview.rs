//! Layout of the editor's overview bar: the whole song squeezed into one strip, with alternating
//! sentence backgrounds and a box per note. Produces rectangles in texture pixels; drawing them is
//! up to the caller.

use crate::{BeatClock, Id, Note, Song, SongError};

/// One color per voice, cycled for songs with more voices than colors. RGB.
pub const VOICE_COLORS: [[u8; 3]; 7] = [
    [220, 20, 60],   // crimson
    [34, 139, 34],   // forest green
    [30, 144, 255],  // dodger blue
    [255, 215, 0],   // gold
    [173, 255, 47],  // green yellow
    [250, 128, 114], // salmon
    [238, 130, 238], // violet
];

pub fn voice_color(voice: usize) -> [u8; 3] {
    VOICE_COLORS[voice % VOICE_COLORS.len()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverviewOptions {
    pub width: u32,
    pub height: u32,
    /// Semitones of headroom above the highest and below the lowest note. Values below 1 are
    /// treated as 1, so the highest note still fits inside the texture.
    pub pitch_padding: i32,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 64,
            pitch_padding: 1,
        }
    }
}

impl OverviewOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
    pub fn with_pitch_padding(mut self, pitch_padding: i32) -> Self {
        self.pitch_padding = pitch_padding.max(1);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverviewRectKind {
    /// Spans the whole height. Every other sentence is dark, starting with the first.
    SentenceBackground { dark: bool },
    Note(Id<Note>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverviewRect {
    pub voice: usize,
    pub kind: OverviewRectKind,
    pub x_start: i64,
    pub y_start: i64,
    pub x_end: i64,
    pub y_end: i64,
}

struct XMapper<'a, C: BeatClock> {
    clock: &'a C,
    width: f64,
    duration_millis: f64,
}

impl<C: BeatClock> XMapper<'_, C> {
    fn x(&self, beat: i64) -> i64 {
        (self.width * self.clock.beat_to_millis(beat) / self.duration_millis) as i64
    }
    fn span(&self, start_beat: i64, end_beat: i64) -> (i64, i64) {
        let (a, b) = (self.x(start_beat), self.x(end_beat));
        if b < a { (b, a) } else { (a, b) }
    }
}

/// Lays out every voice of `song`: sentence backgrounds first, then notes, voice by voice.
///
/// Nothing is produced for a song of zero (or negative) duration.
pub fn overview_layout(
    song: &Song,
    clock: &impl BeatClock,
    song_duration_millis: f64,
    options: OverviewOptions,
) -> Result<Vec<OverviewRect>, SongError> {
    let mut rects = Vec::new();
    if song_duration_millis <= 0.0 {
        tracing::warn!("song duration is {song_duration_millis}ms, skipping overview layout");
        return Ok(rects);
    }

    let mapper = XMapper {
        clock,
        width: options.width as f64,
        duration_millis: song_duration_millis,
    };
    let height = options.height as i64;

    for voice in 0..song.voices().len() {
        for (index, sentence_id) in song.voice_sentences(voice)?.into_iter().enumerate() {
            let Some(range) = song.sentence(sentence_id).and_then(|s| s.range()) else {
                continue;
            };
            let (x_start, x_end) = mapper.span(range.start, range.end);
            rects.push(OverviewRect {
                voice,
                kind: OverviewRectKind::SentenceBackground {
                    dark: index % 2 == 0,
                },
                x_start,
                y_start: 0,
                x_end,
                y_end: height,
            });
        }

        let notes: Vec<(Id<Note>, &Note)> = song
            .voice_notes(voice)?
            .into_iter()
            .filter_map(|id| song.note(id).map(|note| (id, note)))
            .collect();
        let (Some(lowest), Some(highest)) = (
            notes.iter().map(|(_, n)| n.midi_note()).min(),
            notes.iter().map(|(_, n)| n.midi_note()).max(),
        ) else {
            continue;
        };
        let padding = options.pitch_padding.max(1) as i64;
        let midi_min = lowest as i64 - padding;
        let midi_max = highest as i64 + padding;
        let midi_span = midi_max - midi_min;
        let note_height = height / midi_span;

        for (id, note) in notes {
            let (x_start, x_end) = mapper.span(note.start_beat(), note.end_beat());
            let y_start = height * (note.midi_note() as i64 - midi_min) / midi_span;
            rects.push(OverviewRect {
                voice,
                kind: OverviewRectKind::Note(id),
                x_start,
                y_start,
                x_end,
                y_end: y_start + note_height,
            });
        }
    }

    Ok(rects)
}

#[cfg(test)]
mod tests {
    use super::{OverviewOptions, OverviewRectKind, overview_layout, voice_color};
    use crate::{FixedTempo, Note, NoteType, Range, Sentence, Song};

    fn two_sentence_song() -> Song {
        let mut song = Song::new();
        let voice = song.add_voice("P1");
        for (start, pitch) in [(0, 0), (4, 2), (10, 4), (14, 0)] {
            let sentence = match song.voice_sentences(voice).unwrap().as_slice() {
                [first, ..] if start < 10 => *first,
                [_, second] => *second,
                _ => {
                    let s = song.add_sentence(Sentence::empty());
                    song.push_sentence_to_voice(voice, s).unwrap();
                    s
                }
            };
            let note = song.add_note(Note::new(NoteType::Normal, start, 2, pitch, "la").unwrap());
            song.set_note_sentence(note, Some(sentence)).unwrap();
        }
        song
    }

    #[test]
    fn test_layout() {
        let song = two_sentence_song();
        // 1 beat == 10ms, 20 beats == 200ms == the whole bar
        let clock = |beat: i64| beat as f64 * 10.0;
        let rects = overview_layout(&song, &clock, 200.0, OverviewOptions::new(100, 60)).unwrap();

        let backgrounds: Vec<_> = rects
            .iter()
            .filter_map(|r| match r.kind {
                OverviewRectKind::SentenceBackground { dark } => Some((dark, r.x_start, r.x_end)),
                _ => None,
            })
            .collect();
        assert_eq!(backgrounds, vec![(true, 0, 30), (false, 50, 80)]);

        let notes: Vec<_> = rects
            .iter()
            .filter(|r| matches!(r.kind, OverviewRectKind::Note(_)))
            .collect();
        assert_eq!(notes.len(), 4);
        for rect in &notes {
            assert!(rect.x_start <= rect.x_end);
            assert!(rect.x_end <= 100);
            assert!(rect.y_start >= 0 && rect.y_end <= 60);
            // pitches 60..=64 padded to 59..=65, 6 semitones over 60 pixels
            assert_eq!(rect.y_end - rect.y_start, 10);
        }
        let lowest = notes.iter().map(|r| r.y_start).min().unwrap();
        let highest = notes.iter().map(|r| r.y_start).max().unwrap();
        assert_eq!((lowest, highest), (10, 50));
    }

    #[test]
    fn test_small_padding_stays_inside() {
        let song = two_sentence_song();
        let clock = |beat: i64| beat as f64 * 10.0;
        let zero = OverviewOptions::new(100, 60).with_pitch_padding(0);
        assert_eq!(zero.pitch_padding, 1);

        let negative = OverviewOptions {
            pitch_padding: -3,
            ..OverviewOptions::new(100, 60)
        };
        for options in [zero, negative] {
            let rects = overview_layout(&song, &clock, 200.0, options).unwrap();
            assert!(rects.iter().all(|r| r.y_start >= 0 && r.y_end <= 60));
            assert!(rects.iter().all(|r| r.y_start <= r.y_end));
        }
    }

    #[test]
    fn test_inverted_clock_swaps_x() {
        let song = two_sentence_song();
        let clock = |beat: i64| 200.0 - beat as f64 * 10.0;
        let rects = overview_layout(&song, &clock, 200.0, OverviewOptions::new(100, 60)).unwrap();
        assert!(rects.iter().all(|r| r.x_start <= r.x_end));
    }

    #[test]
    fn test_empty_cases() {
        let song = two_sentence_song();
        let tempo = FixedTempo::new(300.0, 0.0);
        assert!(
            overview_layout(&song, &tempo, 0.0, OverviewOptions::default())
                .unwrap()
                .is_empty()
        );

        let mut song = Song::new();
        let voice = song.add_voice("P1");
        let s = song.add_sentence(Sentence::with_range(Range::new(0, 8)));
        song.push_sentence_to_voice(voice, s).unwrap();
        let rects = overview_layout(&song, &tempo, 1000.0, OverviewOptions::default()).unwrap();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].kind, OverviewRectKind::SentenceBackground { dark: true });
    }

    #[test]
    fn test_voice_colors_cycle() {
        assert_ne!(voice_color(0), voice_color(1));
        assert_eq!(voice_color(0), voice_color(7));
    }
}
