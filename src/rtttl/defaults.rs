//! The `d=4,o=6,b=63` header block of an RTTTL tune.

use tracing::trace;

/// Parsed header values. Each field falls back to its default independently.
///
/// Values are not range-checked: a negative tempo is kept as written and
/// yields negative durations further down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuneDefaults {
    /// Note fraction used when a token has no duration prefix (4 = quarter).
    pub duration: i32,
    /// Octave used when a token has no octave suffix.
    pub octave: i32,
    /// Tempo in beats per minute.
    pub bpm: i32,
}

impl TuneDefaults {
    pub const DURATION: i32 = 4;
    pub const OCTAVE: i32 = 6;
    pub const BPM: i32 = 63;

    /// Parse a comma-separated `key=value` block.
    ///
    /// Unknown keys are ignored. A missing, non-numeric or zero value keeps
    /// the default for that key.
    pub fn parse(block: &str) -> Self {
        let mut defaults = Self::default();

        for param in block.split(',') {
            let mut kv = param.trim().splitn(2, '=');
            let key = kv.next().unwrap_or_default().trim();
            let value = kv.next().map(str::trim);

            let slot = match key.to_ascii_lowercase().as_str() {
                "d" => &mut defaults.duration,
                "o" => &mut defaults.octave,
                "b" => &mut defaults.bpm,
                _ => continue,
            };

            match value.and_then(leading_int).filter(|&v| v != 0) {
                Some(v) => *slot = v,
                None => trace!(key, ?value, "header value falls back to default"),
            }
        }

        defaults
    }

    /// Length of a whole note in milliseconds at this tempo.
    pub fn whole_note_ms(&self) -> f64 {
        (60_000.0 / f64::from(self.bpm)) * 4.0
    }
}

impl Default for TuneDefaults {
    fn default() -> Self {
        Self {
            duration: Self::DURATION,
            octave: Self::OCTAVE,
            bpm: Self::BPM,
        }
    }
}

/// Read an optional sign and the leading run of ASCII digits, ignoring
/// whatever follows (`"120bpm"` reads as 120). `None` when no digit leads.
pub(crate) fn leading_int(text: &str) -> Option<i32> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs.
    let magnitude = digits[..end]
        .parse::<i64>()
        .unwrap_or(i64::MAX)
        .min(i64::from(i32::MAX));
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}
