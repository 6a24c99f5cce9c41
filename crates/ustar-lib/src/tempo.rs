/// Converts beats to wall-clock time. Whatever drives playback implements this.
pub trait BeatClock {
    fn beat_to_millis(&self, beat: i64) -> f64;
}

impl<F: Fn(i64) -> f64> BeatClock for F {
    fn beat_to_millis(&self, beat: i64) -> f64 {
        self(beat)
    }
}

/// A song with one tempo for its whole length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedTempo {
    /// Song-file BPM. Song files count quarter beats, so one beat lasts `60000 / (bpm * 4)` ms.
    pub bpm: f64,
    /// Time before beat 0.
    pub gap_millis: f64,
}

impl FixedTempo {
    pub fn new(bpm: f64, gap_millis: f64) -> Self {
        Self { bpm, gap_millis }
    }

    pub fn millis_per_beat(&self) -> f64 {
        60_000.0 / (self.bpm * 4.0)
    }
}

impl BeatClock for FixedTempo {
    fn beat_to_millis(&self, beat: i64) -> f64 {
        self.gap_millis + beat as f64 * self.millis_per_beat()
    }
}
