use std::hash::BuildHasher;

use ahash::RandomState;

use crate::SongMeta;

/// The song carousel. A fixed row of slots with the selected song in the middle one and its
/// neighbours around it; the song list wraps around in both directions.
#[derive(Clone, Debug)]
pub struct Roulette {
    songs: Vec<SongMeta>,
    selected: Option<usize>,
    slot_count: usize,

    random_state: RandomState,
    rolls: u64,
}

/// What the details panel shows for the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSummary {
    pub artist: String,
    pub title: String,
    /// `"3/12"`, or `"0/0"` when there's nothing to select.
    pub counter: String,
    pub has_video: bool,
    pub is_duet: bool,
}

impl Default for SelectionSummary {
    fn default() -> Self {
        Self {
            artist: String::new(),
            title: String::new(),
            counter: "0/0".to_owned(),
            has_video: false,
            is_duet: false,
        }
    }
}

impl Roulette {
    pub fn new(slot_count: usize) -> Self {
        Self::with_random_state(slot_count, RandomState::new())
    }
    pub fn with_random_state(slot_count: usize, random_state: RandomState) -> Self {
        Self {
            songs: Vec::new(),
            selected: None,
            slot_count,
            random_state,
            rolls: 0,
        }
    }

    pub fn songs(&self) -> &[SongMeta] {
        &self.songs
    }
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }
    pub fn center_slot(&self) -> usize {
        self.slot_count / 2
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }
    pub fn selected_song(&self) -> Option<&SongMeta> {
        self.selected.map(|index| &self.songs[index])
    }

    /// Replaces the song list and selects its first song, if any.
    pub fn set_songs(&mut self, songs: Vec<SongMeta>) {
        self.selected = (!songs.is_empty()).then_some(0);
        self.songs = songs;
        tracing::debug!("roulette now has {} songs", self.songs.len());
    }

    /// The song at `index`, wrapping around the list in both directions.
    pub fn song_at(&self, index: i64) -> Option<&SongMeta> {
        self.wrap(index).map(|index| &self.songs[index])
    }

    fn wrap(&self, index: i64) -> Option<usize> {
        if self.songs.is_empty() {
            return None;
        }
        Some(index.rem_euclid(self.songs.len() as i64) as usize)
    }

    /// Selects the first song with the same title. Returns the new selection, or `None` (leaving
    /// the selection alone) if there's no such song.
    pub fn select_song(&mut self, song: &SongMeta) -> Option<&SongMeta> {
        let Some(index) = self.songs.iter().position(|s| s.title == song.title) else {
            tracing::warn!("can't select {:?}, it isn't in the roulette", song.title);
            return None;
        };
        self.selected = Some(index);
        self.selected_song()
    }

    fn step(&mut self, delta: i64) -> Option<&SongMeta> {
        let next = match self.selected {
            None => 0,
            Some(index) => index as i64 + delta,
        };
        self.selected = self.wrap(next);
        self.selected_song()
    }
    pub fn select_next(&mut self) -> Option<&SongMeta> {
        self.step(1)
    }
    pub fn select_previous(&mut self) -> Option<&SongMeta> {
        self.step(-1)
    }

    /// Selects any song, the current one included.
    pub fn select_random(&mut self) -> Option<&SongMeta> {
        let roll = self.random_state.hash_one(self.rolls);
        self.rolls += 1;
        self.selected = self.wrap((roll % self.songs.len().max(1) as u64) as i64);
        tracing::debug!("random song index: {:?}", self.selected);
        self.selected_song()
    }

    /// Slots that show a song, in left-to-right order. With fewer songs than slots they're
    /// filled from the center outwards, alternating right and left.
    pub fn active_slots(&self) -> Vec<usize> {
        let center = self.center_slot() as i64;
        let mut slots: Vec<usize> = (1..=self.songs.len().min(self.slot_count) as i64)
            .map(|i| {
                // 1, 2, 3, 4, 5, ... -> 0, -1, 1, -2, 2, ...
                let distance = (i / 2) * if i % 2 == 0 { -1 } else { 1 };
                center + distance
            })
            .filter(|&slot| slot >= 0 && slot < self.slot_count as i64)
            .map(|slot| slot as usize)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Which song goes in which slot.
    pub fn visible_songs(&self) -> Vec<(usize, &SongMeta)> {
        let Some(selected) = self.selected else {
            return Vec::new();
        };
        let slots = self.active_slots();
        let center = self.center_slot();
        let Some(active_center) = slots.iter().position(|&slot| slot == center) else {
            return Vec::new();
        };

        slots
            .iter()
            .enumerate()
            .filter_map(|(position, &slot)| {
                let offset = position as i64 - active_center as i64;
                self.song_at(selected as i64 + offset).map(|song| (slot, song))
            })
            .collect()
    }

    pub fn summary(&self) -> SelectionSummary {
        let (Some(index), Some(song)) = (self.selected, self.selected_song()) else {
            return SelectionSummary::default();
        };
        SelectionSummary {
            artist: song.artist.clone(),
            title: song.title.clone(),
            counter: format!("{}/{}", index + 1, self.songs.len()),
            has_video: song.has_video(),
            is_duet: song.is_duet(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ahash::RandomState;

    use super::{Roulette, SelectionSummary};
    use crate::SongMeta;

    fn songs(count: usize) -> Vec<SongMeta> {
        (0..count)
            .map(|i| SongMeta::new(format!("Song {i}"), format!("Artist {i}")))
            .collect()
    }

    fn titles(roulette: &Roulette) -> Vec<(usize, &str)> {
        roulette
            .visible_songs()
            .into_iter()
            .map(|(slot, song)| (slot, song.title.as_str()))
            .collect()
    }

    #[test]
    fn test_set_songs() {
        let mut roulette = Roulette::new(5);
        assert_eq!(roulette.selected_song(), None);
        assert_eq!(roulette.summary(), SelectionSummary::default());

        roulette.set_songs(songs(3));
        assert_eq!(roulette.selected_index(), Some(0));
        assert_eq!(roulette.summary().counter, "1/3");

        roulette.set_songs(Vec::new());
        assert_eq!(roulette.selected_index(), None);
        assert_eq!(roulette.summary().counter, "0/0");
    }

    #[test]
    fn test_wrapping() {
        let mut roulette = Roulette::new(5);
        roulette.set_songs(songs(3));

        assert_eq!(roulette.select_previous().unwrap().title, "Song 2");
        assert_eq!(roulette.select_next().unwrap().title, "Song 0");
        assert_eq!(roulette.select_next().unwrap().title, "Song 1");

        assert_eq!(roulette.song_at(-1).unwrap().title, "Song 2");
        assert_eq!(roulette.song_at(-7).unwrap().title, "Song 2");
        assert_eq!(roulette.song_at(5).unwrap().title, "Song 2");

        let mut empty = Roulette::new(5);
        assert_eq!(empty.select_next(), None);
        assert_eq!(empty.song_at(0), None);
    }

    #[test]
    fn test_select_by_title() {
        let mut roulette = Roulette::new(5);
        roulette.set_songs(songs(4));
        let wanted = SongMeta::new("Song 2", "someone else");
        assert_eq!(roulette.select_song(&wanted).unwrap().artist, "Artist 2");
        assert_eq!(roulette.selected_index(), Some(2));

        assert_eq!(roulette.select_song(&SongMeta::new("Nope", "")), None);
        assert_eq!(roulette.selected_index(), Some(2));
    }

    #[test]
    fn test_random_stays_in_bounds() {
        let mut roulette = Roulette::with_random_state(5, RandomState::with_seeds(1, 2, 3, 4));
        assert_eq!(roulette.select_random(), None);

        roulette.set_songs(songs(4));
        let mut seen = [false; 4];
        for _ in 0..200 {
            roulette.select_random().unwrap();
            seen[roulette.selected_index().unwrap()] = true;
        }
        assert!(seen.iter().filter(|&&s| s).count() > 1);
    }

    #[test]
    fn test_active_slots() {
        let mut roulette = Roulette::new(5);
        assert!(roulette.active_slots().is_empty());

        roulette.set_songs(songs(1));
        assert_eq!(roulette.active_slots(), vec![2]);
        roulette.set_songs(songs(2));
        assert_eq!(roulette.active_slots(), vec![1, 2]);
        roulette.set_songs(songs(3));
        assert_eq!(roulette.active_slots(), vec![1, 2, 3]);
        roulette.set_songs(songs(40));
        assert_eq!(roulette.active_slots(), vec![0, 1, 2, 3, 4]);

        let mut even = Roulette::new(4);
        even.set_songs(songs(10));
        assert_eq!(even.active_slots(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_visible_songs() {
        let mut roulette = Roulette::new(5);
        roulette.set_songs(songs(10));
        assert_eq!(
            titles(&roulette),
            vec![
                (0, "Song 8"),
                (1, "Song 9"),
                (2, "Song 0"),
                (3, "Song 1"),
                (4, "Song 2")
            ]
        );

        roulette.set_songs(songs(2));
        roulette.select_next();
        assert_eq!(titles(&roulette), vec![(1, "Song 0"), (2, "Song 1")]);
    }
}
