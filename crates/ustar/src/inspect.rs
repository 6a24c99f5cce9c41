use anyhow::{Context, Result};
use ustar_lib::{Song, midi_note_to_hertz, txt};

use crate::SongFile;

pub fn run(file: &SongFile) -> Result<()> {
    let song = txt::read_song(&file.body).context("couldn't read the notes")?;
    if let Some(title) = &file.title {
        println!("{title}");
    }
    for line in describe(&song)? {
        println!("{line}");
    }
    Ok(())
}

/// One summary line per voice, followed by an indented line per sentence.
pub fn describe(song: &Song) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (index, voice) in song.voices().iter().enumerate() {
        let notes: Vec<_> = song
            .voice_notes(index)?
            .into_iter()
            .filter_map(|id| song.note(id))
            .collect();
        let golden = notes.iter().filter(|note| note.is_golden()).count();
        let mut line = format!(
            "{}: {} sentences, {} notes ({golden} golden)",
            voice.name,
            voice.sentences().len(),
            notes.len()
        );
        let lowest = notes.iter().map(|note| note.midi_note()).min();
        let highest = notes.iter().map(|note| note.midi_note()).max();
        if let (Some(lowest), Some(highest)) = (lowest, highest) {
            line += &format!(
                ", pitch {lowest}..={highest} ({:.1} Hz to {:.1} Hz)",
                midi_note_to_hertz(lowest),
                midi_note_to_hertz(highest)
            );
        }
        lines.push(line);

        for sentence_id in song.voice_sentences(index)? {
            let Some(sentence) = song.sentence(sentence_id) else {
                continue;
            };
            let lyrics: String = sentence
                .notes()
                .filter_map(|id| song.note(id))
                .map(|note| note.text())
                .collect();
            let (min, max) = (
                sentence.min_beat().unwrap_or_default(),
                sentence.max_beat().unwrap_or_default(),
            );
            lines.push(format!("  [{min:>5}..{max:>5}] {}", lyrics.trim()));
        }
    }
    Ok(lines)
}
