use anyhow::{Context, Result, bail};
use ustar_lib::{
    BeatClock, FixedTempo, Song,
    overview::{OverviewOptions, OverviewRect, OverviewRectKind, overview_layout},
    txt,
};

use crate::SongFile;

#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub width: u32,
    pub height: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 80,
            height: 12,
        }
    }
}

pub fn run(file: &SongFile, options: Options) -> Result<()> {
    let Some(bpm) = file.bpm else {
        bail!("the song has no #BPM header");
    };
    let song = txt::read_song(&file.body).context("couldn't read the notes")?;
    let tempo = FixedTempo::new(bpm, file.gap_millis);

    let last_beat = song.notes().map(|(_, note)| note.end_beat()).max().unwrap_or(0);
    let duration = tempo.beat_to_millis(last_beat);
    tracing::info!("song lasts {duration:.0}ms at {bpm} bpm");

    for row in render(&song, &tempo, duration, options)? {
        println!("{row}");
    }
    Ok(())
}

/// Draws the overview bar as text, one string per row with the highest pitch on top. Dark
/// sentence backgrounds are `:` and notes show their voice number.
pub fn render(
    song: &Song,
    tempo: &FixedTempo,
    duration_millis: f64,
    options: Options,
) -> Result<Vec<String>> {
    let (width, height) = (options.width as usize, options.height as usize);
    let mut grid = vec![vec![' '; width]; height];

    let rects = overview_layout(
        song,
        tempo,
        duration_millis,
        OverviewOptions::new(options.width, options.height),
    )?;
    for rect in rects {
        let fill = match rect.kind {
            OverviewRectKind::SentenceBackground { dark: true } => ':',
            OverviewRectKind::SentenceBackground { dark: false } => continue,
            OverviewRectKind::Note(_) => {
                char::from_digit(rect.voice as u32 % 9 + 1, 10).unwrap_or('#')
            }
        };
        fill_rect(&mut grid, &rect, fill);
    }

    Ok(grid
        .into_iter()
        .rev()
        .map(|row| row.into_iter().collect())
        .collect())
}

fn fill_rect(grid: &mut [Vec<char>], rect: &OverviewRect, fill: char) {
    let clamp = |v: i64, len: usize| v.clamp(0, len as i64) as usize;
    // zero-sized rects still get one cell
    let (y_end, x_end) = (rect.y_end.max(rect.y_start + 1), rect.x_end.max(rect.x_start + 1));

    let rows = grid.len();
    for row in &mut grid[clamp(rect.y_start, rows)..clamp(y_end, rows)] {
        let cols = row.len();
        for cell in &mut row[clamp(rect.x_start, cols)..clamp(x_end, cols)] {
            *cell = fill;
        }
    }
}

#[cfg(test)]
mod tests {
    use ustar_lib::{FixedTempo, txt};

    use super::{Options, render};

    #[test]
    fn test_render() {
        // 300 bpm: 50ms per beat, so 20 beats fill 1000ms
        let song = txt::read_song(": 0 5 0 a\n- 6\n: 10 10 4 b\nE\n").unwrap();
        let tempo = FixedTempo::new(300.0, 0.0);
        let rows = render(&song, &tempo, 1000.0, Options { width: 20, height: 6 }).unwrap();

        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.chars().count() == 20));
        // pitches 60 and 64, padded to 59..=65: one row per semitone, highest first
        assert_eq!(rows[0], ":::::     1111111111");
        assert_eq!(rows[2], ":::::               ");
        assert_eq!(rows[4], "11111               ");
        assert_eq!(rows[5], ":::::               ");
    }
}
