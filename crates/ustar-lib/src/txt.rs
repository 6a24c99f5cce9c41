//! The note body of an UltraStar song file.
//!
//! ```text
//! #TITLE:Some Song
//! : 0 4 0 la
//! * 4 2 3 lo
//! - 8
//! F 10 2 0 ~
//! E
//! ```
//!
//! Header lines (`#KEY:value`) are skipped here; they are song metadata, not notes.

use std::fmt::Write;

use smallvec::SmallVec;

use crate::{Id, Note, NoteType, Sentence, Song, TxtError, TxtErrorKind};

struct Reader {
    song: Song,
    voice: Option<usize>,
    sentence: Option<Id<Sentence>>,
}

impl Reader {
    fn voice(&mut self) -> usize {
        *self.voice.get_or_insert_with(|| self.song.add_voice("P1"))
    }

    fn sentence(&mut self) -> Id<Sentence> {
        if let Some(sentence) = self.sentence {
            return sentence;
        }
        let voice = self.voice();
        let sentence = self.song.add_sentence(Sentence::empty());
        self.song
            .push_sentence_to_voice(voice, sentence)
            .unwrap_or_else(|_| unreachable!("voice was just looked up"));
        self.sentence = Some(sentence);
        sentence
    }
}

/// Pops the next space-separated field off the front of `rest`. The separator after it stays on
/// `rest`, so a missing syllable can be told apart from an empty one.
fn next_field<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start_matches(' ');
    if trimmed.is_empty() {
        return None;
    }
    let (field, remainder) = trimmed.split_at(trimmed.find(' ').unwrap_or(trimmed.len()));
    *rest = remainder;
    Some(field)
}

fn parse_int<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, TxtErrorKind> {
    value.parse().map_err(|_| TxtErrorKind::NotAnInteger {
        field,
        value: value.to_owned(),
    })
}

fn read_line(reader: &mut Reader, line: &str) -> Result<(), TxtErrorKind> {
    let mut chars = line.chars();
    let Some(marker) = chars.next() else {
        return Ok(());
    };
    let mut rest = chars.as_str();

    if marker == 'P' {
        let name: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        reader.voice = Some(reader.song.add_voice(name));
        reader.sentence = None;
        return Ok(());
    }
    if marker == '-' {
        let beat = next_field(&mut rest).ok_or(TxtErrorKind::MissingField("linebreak beat"))?;
        let beat = parse_int("linebreak beat", beat)?;
        if let Some(sentence) = reader.sentence.take() {
            reader
                .song
                .set_sentence_linebreak(sentence, Some(beat))
                .unwrap_or_else(|_| unreachable!("current sentence is in the song"));
        } else {
            tracing::warn!("linebreak at beat {beat} without any notes before it");
        }
        return Ok(());
    }

    let note_type = NoteType::from_txt_marker(marker)
        .ok_or_else(|| TxtErrorKind::UnknownMarker(marker.to_string()))?;

    const FIELDS: [&str; 3] = ["start beat", "length", "pitch"];
    let mut numbers: SmallVec<[i64; 3]> = SmallVec::new();
    for field in FIELDS {
        let value = next_field(&mut rest).ok_or(TxtErrorKind::MissingField(field))?;
        numbers.push(parse_int(field, value)?);
    }
    let pitch = i32::try_from(numbers[2]).map_err(|_| TxtErrorKind::NotAnInteger {
        field: "pitch",
        value: numbers[2].to_string(),
    })?;
    // exactly one separator; the rest is the syllable, spaces included
    let text = rest.strip_prefix(' ').unwrap_or(rest);

    let note = Note::new(note_type, numbers[0], numbers[1], pitch, text)?;
    let sentence = reader.sentence();
    let note = reader.song.add_note(note);
    reader
        .song
        .set_note_sentence(note, Some(sentence))
        .unwrap_or_else(|_| unreachable!("note and sentence were just added"));
    Ok(())
}

/// Reads a song body into a new [`Song`]. Reading stops at the first `E` line.
pub fn read_song(input: &str) -> Result<Song, TxtError> {
    let mut reader = Reader {
        song: Song::new(),
        voice: None,
        sentence: None,
    };

    for (index, line) in input.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if line.trim() == "E" {
            break;
        }
        read_line(&mut reader, line).map_err(|kind| TxtError {
            line: index + 1,
            kind,
        })?;
    }

    Ok(reader.song)
}

/// Writes the song's notes back out in song-file form, ending with `E`.
///
/// Voice markers are only written for songs with more than one voice. Sentences without notes
/// are left out.
pub fn write_song(song: &Song) -> String {
    let mut out = String::new();
    let multiple_voices = song.voices().len() > 1;

    for (voice_index, voice) in song.voices().iter().enumerate() {
        if multiple_voices {
            // writing to a String never fails
            let _ = writeln!(out, "{}", voice.name);
        }
        let sentences: Vec<&Sentence> = song
            .voice_sentences(voice_index)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| song.sentence(id))
            .filter(|sentence| !sentence.is_empty())
            .collect();

        for (i, sentence) in sentences.iter().enumerate() {
            for note in sentence.notes().filter_map(|id| song.note(id)) {
                let _ = writeln!(
                    out,
                    "{} {} {} {} {}",
                    note.note_type().txt_marker(),
                    note.start_beat(),
                    note.length(),
                    note.txt_pitch(),
                    note.text()
                );
            }
            if i + 1 < sentences.len() {
                let linebreak = sentence
                    .linebreak_beat
                    .or(sentence.max_beat())
                    .unwrap_or_default();
                let _ = writeln!(out, "- {linebreak}");
            }
        }
    }

    out.push_str("E\n");
    out
}

#[cfg(test)]
mod tests {
    use super::{read_song, write_song};
    use crate::{NoteError, NoteType, TxtErrorKind};

    const SOLO: &str = "#TITLE:Test\r
#BPM:300\r
: 0 4 0 la\r
* 4 2 3 lo\r
- 8\r
F 10 2 -2 ~\r
R 12 1 0  spaced \r
G 14 1 0\r
E\r
: 99 1 0 ignored\r
";

    #[test]
    fn test_read_solo() {
        let song = read_song(SOLO).unwrap();
        assert_eq!(song.voices().len(), 1);
        assert_eq!(song.voices()[0].name, "P1");

        let sentences = song.voice_sentences(0).unwrap();
        assert_eq!(sentences.len(), 2);
        let first = song.sentence(sentences[0]).unwrap();
        assert_eq!(first.linebreak_beat, Some(8));
        assert_eq!((first.min_beat(), first.max_beat()), (Some(0), Some(6)));

        let notes: Vec<_> = song
            .voice_notes(0)
            .unwrap()
            .into_iter()
            .map(|id| song.note(id).unwrap())
            .collect();
        assert_eq!(notes.len(), 5);
        assert_eq!(notes[0].text(), "la");
        assert_eq!(notes[1].note_type(), NoteType::Golden);
        assert_eq!(notes[1].midi_note(), 63);
        assert_eq!(notes[2].txt_pitch(), -2);
        assert!(notes[2].is_freestyle());
        assert_eq!(notes[3].text(), " spaced ");
        assert_eq!(notes[4].note_type(), NoteType::RapGolden);
        assert_eq!(notes[4].text(), "");
    }

    #[test]
    fn test_read_duet() {
        let song = read_song("P1\n: 0 1 0 a\n- 2\n: 3 1 0 b\nP 2\n: 0 2 5 c\nE\n").unwrap();
        assert_eq!(song.voices().len(), 2);
        assert_eq!(song.voices()[1].name, "P2");
        assert_eq!(song.voice_sentences(0).unwrap().len(), 2);
        assert_eq!(song.voice_notes(1).unwrap().len(), 1);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = read_song(": 0 4 0 la\nX 1 1 1 x\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, TxtErrorKind::UnknownMarker("X".to_owned()));

        let err = read_song(": 0 four 0 la\n").unwrap_err();
        assert!(matches!(
            err.kind,
            TxtErrorKind::NotAnInteger {
                field: "length",
                ..
            }
        ));

        let err = read_song(": 0 4\n").unwrap_err();
        assert_eq!(err.kind, TxtErrorKind::MissingField("pitch"));

        let err = read_song(": 0 -4 0 la\n").unwrap_err();
        assert!(matches!(err.kind, TxtErrorKind::Note(_)));
    }

    #[test]
    fn test_huge_numbers_are_errors() {
        let err = read_song(": 0 1 0 a\n: 9223372036854775807 1 0 x\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.kind,
            TxtErrorKind::Note(NoteError::OutOfRange { field: "end beat" })
        );

        let err = read_song(": 0 1 2147483647 x\n").unwrap_err();
        assert_eq!(err.kind, TxtErrorKind::Note(NoteError::OutOfRange { field: "pitch" }));

        let err = read_song(": 0 1 2147483648 x\n").unwrap_err();
        assert!(matches!(err.kind, TxtErrorKind::NotAnInteger { field: "pitch", .. }));
    }

    #[test]
    fn test_write_reads_back() {
        let song = read_song(SOLO).unwrap();
        let written = write_song(&song);
        assert_eq!(
            written,
            ": 0 4 0 la\n* 4 2 3 lo\n- 8\nF 10 2 -2 ~\nR 12 1 0  spaced \nG 14 1 0 \nE\n"
        );
        let again = read_song(&written).unwrap();
        assert_eq!(write_song(&again), written);
    }
}
