use tracing::trace;

use super::{
    defaults::TuneDefaults,
    pitch::{midi_number, midi_to_freq},
    token::NoteToken,
};

/// A single timed tone. Rests have a frequency of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    /// Pitch in Hz, `0.0` for a rest.
    pub frequency_hz: f64,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Note number the frequency was derived from (`None` for rests).
    pub midi_note: Option<i32>,
}

impl ToneEvent {
    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0.0
    }
}

/// The result of decoding one RTTTL string.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTune {
    name: String,
    defaults: TuneDefaults,
    tones: Vec<ToneEvent>,
}

impl DecodedTune {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn defaults(&self) -> TuneDefaults {
        self.defaults
    }

    /// Tones in source order.
    pub fn tones(&self) -> &[ToneEvent] {
        &self.tones
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    /// An empty tune decoded fine structurally but has nothing to play.
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Sum of all tone durations in seconds, rests included.
    pub fn total_duration(&self) -> f64 {
        self.tones.iter().map(|t| t.duration_secs).sum()
    }
}

/// Decode `name:defaults:notes` text into a tune.
///
/// Returns `None` when the text has fewer than three colon-separated
/// segments. Note tokens that do not match the grammar are skipped, so a
/// structurally valid string can still decode to an empty tune; callers
/// that want to play something should check [`DecodedTune::is_empty`].
pub fn decode(source: &str) -> Option<DecodedTune> {
    let mut parts = source.splitn(3, ':');
    let name = parts.next()?.trim();
    let header = parts.next()?.trim();
    // Everything after the second colon belongs to the notes, extra colons included.
    let notes = parts.next()?.trim();

    let defaults = TuneDefaults::parse(header);
    let whole_note_ms = defaults.whole_note_ms();

    let tones = notes
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let lowered = token.to_ascii_lowercase();
            let parsed = NoteToken::parse(&lowered);
            if parsed.is_none() {
                trace!(token, "skipping note token outside the grammar");
            }
            parsed
        })
        .filter_map(|note| {
            let tone = tone_for(&note, &defaults, whole_note_ms);
            if tone.is_none() {
                trace!(octave = ?note.octave, "skipping note with no representable pitch");
            }
            tone
        })
        .collect();

    Some(DecodedTune {
        name: name.to_string(),
        defaults,
        tones,
    })
}

/// `None` when the note's octave puts it outside the representable note numbers.
fn tone_for(note: &NoteToken, defaults: &TuneDefaults, whole_note_ms: f64) -> Option<ToneEvent> {
    let fraction = explicit_or(note.duration, defaults.duration);
    let octave = explicit_or(note.octave, defaults.octave);

    let mut ms = whole_note_ms / f64::from(fraction);
    if note.dotted {
        ms *= 1.5;
    }

    let midi_note = midi_number(note.letter, note.sharp, octave);
    if midi_note.is_none() && !note.letter.is_pause() {
        return None;
    }
    let frequency_hz = midi_note.map(midi_to_freq).unwrap_or(0.0);

    Some(ToneEvent {
        frequency_hz,
        duration_secs: ms / 1000.0,
        midi_note,
    })
}

/// An explicit value of zero counts as absent.
fn explicit_or(explicit: Option<u32>, default: i32) -> i32 {
    explicit
        .filter(|&v| v != 0)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn rejects_too_few_segments() {
        assert!(decode("").is_none());
        assert!(decode("a:b").is_none());
        assert!(decode("no colons at all").is_none());
    }

    #[test]
    fn minimal_structure_decodes_empty() {
        let tune = decode("::").unwrap();
        assert_eq!(tune.name(), "");
        assert!(tune.is_empty());
        assert_eq!(tune.defaults(), TuneDefaults::default());
    }

    #[test]
    fn quarter_note_at_default_tempo() {
        let tune = decode("t::4c6").unwrap();
        let expected = (60_000.0 / 63.0 * 4.0) / 4.0 / 1000.0;
        assert!((tune.tones()[0].duration_secs - expected).abs() < EPS);
        assert!((tune.tones()[0].duration_secs - 0.952).abs() < 0.001);
    }

    #[test]
    fn header_default_duration_applies() {
        let tune = decode("t:d=8,b=120:c,2c").unwrap();
        assert!((tune.tones()[0].duration_secs - 0.25).abs() < EPS);
        assert!((tune.tones()[1].duration_secs - 1.0).abs() < EPS);
    }

    #[test]
    fn header_octave_applies() {
        let tune = decode("t:o=5:a,a6").unwrap();
        assert!((tune.tones()[0].frequency_hz - 440.0).abs() < 0.01);
        assert!((tune.tones()[1].frequency_hz - 880.0).abs() < 0.01);
    }

    #[test]
    fn default_octave_is_six() {
        let tune = decode("t::a").unwrap();
        assert!((tune.tones()[0].frequency_hz - 880.0).abs() < 0.01);
        assert_eq!(tune.tones()[0].midi_note, Some(81));
    }

    #[test]
    fn dotted_is_one_and_a_half() {
        let tune = decode("t::4c,4c.,4c6.").unwrap();
        let plain = tune.tones()[0];
        let dotted = tune.tones()[1];
        let late = tune.tones()[2];
        assert!((dotted.duration_secs - plain.duration_secs * 1.5).abs() < EPS);
        assert!((late.duration_secs - plain.duration_secs * 1.5).abs() < EPS);
        assert_eq!(plain.frequency_hz, dotted.frequency_hz);
    }

    #[test]
    fn rest_is_kept_with_zero_frequency() {
        let tune = decode("t::p,8p").unwrap();
        assert_eq!(tune.len(), 2);
        assert!(tune.tones().iter().all(ToneEvent::is_rest));
        assert!(tune.tones().iter().all(|t| t.duration_secs > 0.0));
        assert_eq!(tune.tones()[0].midi_note, None);
    }

    #[test]
    fn invalid_tokens_are_skipped_in_order() {
        let tune = decode("t:d=4,o=5,b=120:c,zz,,e,128g,g").unwrap();
        assert_eq!(tune.len(), 3);
        let c5 = midi_to_freq(60);
        let e5 = midi_to_freq(64);
        let g5 = midi_to_freq(67);
        let freqs: Vec<f64> = tune.tones().iter().map(|t| t.frequency_hz).collect();
        assert!((freqs[0] - c5).abs() < EPS);
        assert!((freqs[1] - e5).abs() < EPS);
        assert!((freqs[2] - g5).abs() < EPS);
    }

    #[test]
    fn extra_colons_stay_with_notes() {
        // "c:d" is one malformed token; the colon is not a separator here.
        let tune = decode("t:b=120:c,c:d,e").unwrap();
        assert_eq!(tune.len(), 2);
    }

    #[test]
    fn name_is_trimmed() {
        let tune = decode("  Nokia Tune :d=4:e").unwrap();
        assert_eq!(tune.name(), "Nokia Tune");
    }

    #[test]
    fn uppercase_tokens_decode() {
        let tune = decode("t:o=5:A,H,B").unwrap();
        assert!((tune.tones()[0].frequency_hz - 440.0).abs() < 0.01);
        assert_eq!(tune.tones()[1].frequency_hz, tune.tones()[2].frequency_hz);
    }

    #[test]
    fn sharp_raises_pitch() {
        let tune = decode("t:o=5:a,a#").unwrap();
        let ratio = tune.tones()[1].frequency_hz / tune.tones()[0].frequency_hz;
        assert!((ratio - 2.0_f64.powf(1.0 / 12.0)).abs() < EPS);
    }

    #[test]
    fn negative_tempo_is_not_corrected() {
        let tune = decode("t:b=-63:c").unwrap();
        assert!(tune.tones()[0].duration_secs < 0.0);
    }

    #[test]
    fn extreme_header_octave_skips_notes_without_panicking() {
        for source in ["t:o=2147483647:c", "t:o=-2147483647:c", "t:o=99999999999:c#"] {
            let tune = decode(source).unwrap();
            assert!(tune.is_empty(), "{source:?}");
        }

        // Rests have no pitch to overflow and survive any octave.
        let tune = decode("t:o=2147483647:c,p,4a5").unwrap();
        assert_eq!(tune.len(), 2);
        assert!(tune.tones()[0].is_rest());
        assert!((tune.tones()[1].frequency_hz - 440.0).abs() < 0.01);
    }

    #[test]
    fn total_duration_sums_tones() {
        let tune = decode("t:d=4,b=60:c,p,c").unwrap();
        assert!((tune.total_duration() - 3.0).abs() < EPS);
    }

    #[test]
    fn simple_tune_end_to_end() {
        let tune = decode("simple:d=4,o=5,b=100:c,d,e,p,g").unwrap();
        assert_eq!(tune.name(), "simple");
        assert_eq!(tune.len(), 5);
        assert_eq!(tune.tones()[3].frequency_hz, 0.0);
        let total = tune.total_duration();
        assert!(total > 0.0 && total.is_finite());
    }
}
