use crate::SearchMode;

/// Keys the song-select screen cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Left,
    Right,
    Return,
    Escape,
    Backspace,
    LeftControl,
    LeftAlt,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectAction {
    NextSong,
    PreviousSong,
    RandomSong,
    StartSing,
    OpenSearch(SearchMode),
    CloseSearch,
    LeaveScene,
}

/// Key bindings. Navigation fires when the key is released, search and random when it's pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortcuts {
    pub next_song: Key,
    pub previous_song: Key,
    pub start_sing: Key,
    pub search_title: Key,
    pub search_artist: Key,
    pub random_song: Key,
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            next_song: Key::Right,
            previous_song: Key::Left,
            start_sing: Key::Return,
            search_title: Key::LeftControl,
            search_artist: Key::LeftAlt,
            random_song: Key::Char('r'),
        }
    }
}

impl Shortcuts {
    /// Escape and Backspace are fixed: Escape closes an open search before it leaves the screen,
    /// and Backspace only leaves while there's no search text to edit.
    pub fn action(&self, key: Key, state: KeyState, search_enabled: bool) -> Option<SelectAction> {
        use KeyState::*;

        let action = match (key, state) {
            (Key::Escape, Released) if search_enabled => SelectAction::CloseSearch,
            (Key::Escape, Released) => SelectAction::LeaveScene,
            (Key::Backspace, Released) if !search_enabled => SelectAction::LeaveScene,
            (key, Released) if key == self.next_song => SelectAction::NextSong,
            (key, Released) if key == self.previous_song => SelectAction::PreviousSong,
            (key, Released) if key == self.start_sing => SelectAction::StartSing,
            (key, Pressed) if key == self.search_artist => {
                SelectAction::OpenSearch(SearchMode::ByArtist)
            }
            (key, Pressed) if key == self.search_title => {
                SelectAction::OpenSearch(SearchMode::ByTitle)
            }
            (key, Pressed) if key == self.random_song => SelectAction::RandomSong,
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyState, SelectAction, Shortcuts};
    use crate::SearchMode;

    #[test]
    fn test_default_bindings() {
        let shortcuts = Shortcuts::default();
        let released = |key, searching| shortcuts.action(key, KeyState::Released, searching);
        let pressed = |key| shortcuts.action(key, KeyState::Pressed, false);

        assert_eq!(released(Key::Right, false), Some(SelectAction::NextSong));
        assert_eq!(released(Key::Left, false), Some(SelectAction::PreviousSong));
        assert_eq!(released(Key::Return, false), Some(SelectAction::StartSing));
        assert_eq!(pressed(Key::Right), None);

        assert_eq!(
            pressed(Key::LeftControl),
            Some(SelectAction::OpenSearch(SearchMode::ByTitle))
        );
        assert_eq!(
            pressed(Key::LeftAlt),
            Some(SelectAction::OpenSearch(SearchMode::ByArtist))
        );
        assert_eq!(pressed(Key::Char('r')), Some(SelectAction::RandomSong));
        assert_eq!(released(Key::Char('r'), false), None);
        assert_eq!(pressed(Key::Char('x')), None);
    }

    #[test]
    fn test_escape_and_backspace() {
        let shortcuts = Shortcuts::default();
        assert_eq!(
            shortcuts.action(Key::Escape, KeyState::Released, true),
            Some(SelectAction::CloseSearch)
        );
        assert_eq!(
            shortcuts.action(Key::Escape, KeyState::Released, false),
            Some(SelectAction::LeaveScene)
        );
        assert_eq!(shortcuts.action(Key::Backspace, KeyState::Released, true), None);
        assert_eq!(
            shortcuts.action(Key::Backspace, KeyState::Released, false),
            Some(SelectAction::LeaveScene)
        );
    }

    #[test]
    fn test_rebinding() {
        let shortcuts = Shortcuts {
            next_song: Key::Char('n'),
            ..Shortcuts::default()
        };
        assert_eq!(
            shortcuts.action(Key::Char('n'), KeyState::Released, false),
            Some(SelectAction::NextSong)
        );
        assert_eq!(shortcuts.action(Key::Right, KeyState::Released, false), None);
    }
}
