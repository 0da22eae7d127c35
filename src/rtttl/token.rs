//! Note-token grammar.
//!
//! ```text
//! token    := duration? letter sharp? dot? octave? dot?
//! duration := digit digit?
//! letter   := 'a'..='h' | 'p'
//! sharp    := '#'
//! octave   := digit digit?
//! ```
//!
//! Matching is case-insensitive and must consume the whole token. A dot in
//! either position marks the note as dotted.

use super::pitch::NoteLetter;

/// One note as written, before header defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteToken {
    /// Explicit duration prefix (`8` in `8c#6`), if present.
    pub duration: Option<u32>,
    pub letter: NoteLetter,
    pub sharp: bool,
    pub dotted: bool,
    /// Explicit octave suffix (`6` in `8c#6`), if present.
    pub octave: Option<u32>,
}

impl NoteToken {
    /// Match a single token. Returns `None` for anything outside the grammar.
    pub fn parse(token: &str) -> Option<Self> {
        let mut cursor = Cursor::new(token.trim());

        let duration = cursor.digits(2);
        let letter = cursor.bump().and_then(NoteLetter::from_char)?;
        let sharp = cursor.eat('#');
        let early_dot = cursor.eat('.');
        let octave = cursor.digits(2);
        let late_dot = cursor.eat('.');

        if !cursor.is_empty() {
            return None;
        }

        Some(Self {
            duration,
            letter,
            sharp,
            dotted: early_dot || late_dot,
            octave,
        })
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.rest = &self.rest[ch.len_utf8()..];
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.rest = &self.rest[expected.len_utf8()..];
            true
        } else {
            false
        }
    }

    /// Up to `max` ASCII digits as a number, `None` if there are none.
    fn digits(&mut self, max: usize) -> Option<u32> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        digits.parse().ok()
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}
