//! Locale-aware sentence boundary detection.
//!
//! Candidate boundaries are sentence-final punctuation (`.`, `!`, `?`, `…`, optionally
//! followed by closing quotes or brackets) followed by whitespace or end of text. A
//! candidate is rejected when:
//!
//! - the next sentence would start with a lowercase letter,
//! - a lone `.` follows a known abbreviation of an enabled [`Locale`],
//! - a lone `.` follows a single-letter initial that opens the sentence or follows another
//!   initial or a title ("Mr."), and a capitalized name continues ("J. R. R. Tolkien wrote"); a run of
//!   initials that ends the sentence ("A. B.") still splits, as does "plan A. Then",
//! - a lone `.` follows a dotted letter run ("e.g.", "z.B.", "U.S.").
//!
//! Decimals ("3.14") never produce a candidate inside a number because no whitespace
//! follows the period. A sentence ending in a number, version or domain ("2.5.",
//! "example.com.") splits normally.

mod abbreviations;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Match, Regex};

static TERMINATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?…]+["'“”’»)\]]*(?:\s+|$)"#).expect("Invalid sentence terminator regex")
});

static DOTTED_ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\p{L}{1,2}\.)+\p{L}{0,2}$").expect("Invalid dotted abbreviation regex")
});

const CLOSERS: &[char] = &['"', '\'', '“', '”', '’', '»', ')', ']'];
const OPENERS: &[char] = &['"', '\'', '“', '‘', '„', '«', '(', '['];

/// Languages whose abbreviation conventions the segmenter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    English,
    German,
}

impl Locale {
    fn abbreviations(self) -> &'static [&'static str] {
        match self {
            Locale::English => abbreviations::ENGLISH,
            Locale::German => abbreviations::GERMAN,
        }
    }
}

/// Splits text into trimmed, non-empty sentences.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    locales: Vec<Locale>,
    abbreviations: HashSet<&'static str>,
}

impl Default for SentenceSegmenter {
    /// English and German, covering both sides of the common translation case.
    fn default() -> Self {
        Self::new(&[Locale::English, Locale::German])
    }
}

impl SentenceSegmenter {
    pub fn new(locales: &[Locale]) -> Self {
        let abbreviations = locales
            .iter()
            .flat_map(|locale| locale.abbreviations().iter().copied())
            .collect();

        Self {
            locales: locales.to_vec(),
            abbreviations,
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        Self::new(&[locale])
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Returns the sentences of `text` in order, borrowing from it.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in TERMINATOR.find_iter(text) {
            if !self.is_boundary(text, start, &m) {
                continue;
            }

            let sentence = text[start..m.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = m.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }

        sentences
    }

    /// Number of sentences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.split(text).len()
    }

    fn is_boundary(&self, text: &str, start: usize, m: &Match<'_>) -> bool {
        let Some(next) = text[m.end()..].chars().next() else {
            return true;
        };

        if next.is_lowercase() {
            return false;
        }

        let punctuation = m.as_str().trim_end().trim_end_matches(CLOSERS);
        if punctuation != "." {
            return true;
        }

        let mut words = text[start..m.start()]
            .split_whitespace()
            .rev()
            .map(|w| w.trim_start_matches(OPENERS));
        let word = words.next().unwrap_or("");

        if is_initial(word) {
            let opens_name = words.next().is_none_or(|prev| {
                prev.strip_suffix('.')
                    .is_some_and(|stem| is_initial(stem) || self.is_abbreviation(stem))
            });
            if opens_name && continues_after_initials(&text[m.end()..]) {
                return false;
            }
        }

        !self.is_abbreviation(word)
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        if DOTTED_ABBREVIATION.is_match(word) {
            return true;
        }

        self.abbreviations.contains(word.to_lowercase().as_str())
    }
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// True when the text after an initial reads as the rest of a name rather than a new
/// sentence: skip further initials, then require a capitalized word that does not end
/// the sentence.
fn continues_after_initials(rest: &str) -> bool {
    for token in rest.split_whitespace() {
        if token.strip_suffix('.').is_some_and(is_initial) {
            continue;
        }
        return token.chars().next().is_some_and(char::is_uppercase)
            && !token
                .trim_end_matches(CLOSERS)
                .ends_with(['.', '!', '?', '…']);
    }
    false
}
