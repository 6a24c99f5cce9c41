use crate::{Key, KeyState, PlayerProfile, Roulette, SelectAction, Shortcuts, SongMeta};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    ByTitle,
    ByArtist,
}

impl SearchMode {
    fn matches(self, song: &SongMeta, lowercase_text: &str) -> bool {
        let field = match self {
            Self::ByTitle => &song.title,
            Self::ByArtist => &song.artist,
        };
        field.to_lowercase().contains(lowercase_text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Search {
    mode: SearchMode,
    text: String,
}

/// Everything needed to start singing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingRequest {
    pub song: SongMeta,
    /// The chosen profile, or the first one if none was chosen. `None` only without any profiles.
    pub profile: Option<PlayerProfile>,
}

/// Where the song-select screen wants to go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneChange {
    Main,
    Sing(SingRequest),
}

/// State of the song-select screen: the full library, the carousel over the (possibly filtered)
/// songs, the quick search and the player profile picker.
#[derive(Clone, Debug)]
pub struct SongSelect {
    library: Vec<SongMeta>,
    roulette: Roulette,
    search: Option<Search>,
    selected_before_search: Option<SongMeta>,

    profiles: Vec<PlayerProfile>,
    selected_profile: Option<usize>,
}

impl SongSelect {
    pub fn new(
        library: Vec<SongMeta>,
        profiles: Vec<PlayerProfile>,
        mut roulette: Roulette,
    ) -> Self {
        roulette.set_songs(library.clone());
        Self {
            library,
            roulette,
            search: None,
            selected_before_search: None,
            profiles,
            selected_profile: None,
        }
    }

    pub fn roulette(&self) -> &Roulette {
        &self.roulette
    }
    pub fn roulette_mut(&mut self) -> &mut Roulette {
        &mut self.roulette
    }
    pub fn selected_song(&self) -> Option<&SongMeta> {
        self.roulette.selected_song()
    }

    pub fn profiles(&self) -> &[PlayerProfile] {
        &self.profiles
    }
    /// Returns false (and changes nothing) for an out-of-range index.
    pub fn select_player_profile(&mut self, index: usize) -> bool {
        if index >= self.profiles.len() {
            return false;
        }
        self.selected_profile = Some(index);
        true
    }

    pub fn is_search_enabled(&self) -> bool {
        self.search.is_some()
    }
    pub fn search_mode(&self) -> Option<SearchMode> {
        self.search.as_ref().map(|search| search.mode)
    }
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_ref().map(|search| search.text.as_str())
    }

    /// Opens the search with empty text, remembering the selection to go back to.
    pub fn enable_search(&mut self, mode: SearchMode) {
        self.selected_before_search = self.roulette.selected_song().cloned();
        self.search = Some(Search {
            mode,
            text: String::new(),
        });
        self.set_search_text("");
    }

    /// Clears and closes the search, which brings back the whole library.
    pub fn disable_search(&mut self) {
        if self.search.is_some() {
            self.set_search_text("");
        }
        self.search = None;
    }

    /// Filters the carousel by the current search mode, ignoring case. Empty text restores the
    /// whole library and keeps the song that was selected (or the one from before the search).
    /// Does nothing while the search is closed.
    pub fn set_search_text(&mut self, text: &str) {
        let Some(search) = &mut self.search else {
            tracing::warn!("search text changed while search is disabled");
            return;
        };
        search.text = text.to_owned();
        let mode = search.mode;

        let last_selected = self.roulette.selected_song().cloned();
        let lowercase_text = text.to_lowercase();
        if lowercase_text.is_empty() {
            self.roulette.set_songs(self.library.clone());
            if let Some(song) = last_selected.or_else(|| self.selected_before_search.clone()) {
                self.roulette.select_song(&song);
            }
        } else {
            let matching = self
                .library
                .iter()
                .filter(|song| mode.matches(song, &lowercase_text))
                .cloned()
                .collect();
            self.roulette.set_songs(matching);
        }
    }

    pub fn start_sing(&self) -> Option<SingRequest> {
        let song = self.roulette.selected_song()?.clone();
        let profile = self
            .selected_profile
            .or((!self.profiles.is_empty()).then_some(0))
            .map(|index| self.profiles[index].clone());
        Some(SingRequest { song, profile })
    }

    /// Carries out one action. Returns a scene change if the action leaves this screen.
    pub fn apply(&mut self, action: SelectAction) -> Option<SceneChange> {
        match action {
            SelectAction::NextSong => {
                self.roulette.select_next();
            }
            SelectAction::PreviousSong => {
                self.roulette.select_previous();
            }
            SelectAction::RandomSong => {
                self.roulette.select_random();
            }
            SelectAction::OpenSearch(mode) => self.enable_search(mode),
            SelectAction::CloseSearch => self.disable_search(),
            SelectAction::StartSing => return self.start_sing().map(SceneChange::Sing),
            SelectAction::LeaveScene => return Some(SceneChange::Main),
        }
        None
    }

    pub fn handle_key(
        &mut self,
        shortcuts: &Shortcuts,
        key: Key,
        state: KeyState,
    ) -> Option<SceneChange> {
        let action = shortcuts.action(key, state, self.is_search_enabled())?;
        self.apply(action)
    }
}
