//! Song selection: the carousel, quick search, player profiles and keyboard shortcuts of the
//! song-select screen, without any of the drawing.

mod song_meta;
pub use song_meta::{PlayerProfile, SongMeta};
mod roulette;
pub use roulette::{Roulette, SelectionSummary};
mod select;
pub use select::{SceneChange, SearchMode, SingRequest, SongSelect};
mod shortcuts;
pub use shortcuts::{Key, KeyState, SelectAction, Shortcuts};
