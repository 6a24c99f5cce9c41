#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongMeta {
    pub title: String,
    pub artist: String,
    pub video: Option<String>,
    /// Display names of the song's voices, in voice order.
    pub voice_names: Vec<String>,
}

impl SongMeta {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    pub fn has_video(&self) -> bool {
        self.video.as_deref().is_some_and(|video| !video.is_empty())
    }
    pub fn is_duet(&self) -> bool {
        self.voice_names.len() == 2
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub name: String,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::SongMeta;

    #[test]
    fn test_flags() {
        let mut song = SongMeta::new("Title", "Artist");
        assert!(!song.has_video());
        assert!(!song.is_duet());

        song.video = Some(String::new());
        assert!(!song.has_video());
        song.video = Some("clip.mp4".to_owned());
        assert!(song.has_video());

        song.voice_names = vec!["Lead".to_owned(), "Backing".to_owned()];
        assert!(song.is_duet());
    }
}
