use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::Token;

pub const MIN_TOKEN_CHARS: usize = 2;

/// English contraction endings split off their host word, matched
/// case-insensitively after either apostrophe form.
const CLITICS: [&str; 7] = ["n't", "'s", "'m", "'d", "'ll", "'re", "'ve"];

static IDEOGRAPHIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Han}\p{Hiragana}\p{Katakana}]+$").expect("valid ideograph regex")
});

/// Word tokenizer over UAX #29 word boundaries.
///
/// UAX #29 splits ideographic scripts into single characters, which would
/// make every CJK word fall under the length filter. With `join_ideographs`
/// set, adjacent ideographic segments are merged back into one run first.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    join_ideographs: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            join_ideographs: true,
        }
    }
}

impl Tokenizer {
    pub fn new(join_ideographs: bool) -> Self {
        Self { join_ideographs }
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.segments(text)
            .into_iter()
            .flat_map(split_clitic)
            .filter(|unit| is_word(unit))
            .map(str::to_string)
            .collect()
    }

    fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if !self.join_ideographs {
            return text.split_word_bounds().collect();
        }

        let mut out = Vec::new();
        let mut run: Option<(usize, usize)> = None;
        for (start, segment) in text.split_word_bound_indices() {
            let end = start + segment.len();
            if IDEOGRAPHIC.is_match(segment) {
                run = match run {
                    Some((run_start, _)) => Some((run_start, end)),
                    None => Some((start, end)),
                };
                continue;
            }
            if let Some((run_start, run_end)) = run.take() {
                out.push(&text[run_start..run_end]);
            }
            out.push(segment);
        }
        if let Some((run_start, run_end)) = run {
            out.push(&text[run_start..run_end]);
        }
        out
    }
}

/// Splits `don't` into `do` + `n't` and `we're` into `we` + `'re`. Other
/// segments come back whole.
fn split_clitic(segment: &str) -> impl Iterator<Item = &str> {
    let cut = CLITICS
        .iter()
        .find_map(|clitic| clitic_start(segment, clitic))
        .filter(|&at| at > 0);
    match cut {
        Some(at) => [Some(&segment[..at]), Some(&segment[at..])],
        None => [Some(segment), None],
    }
    .into_iter()
    .flatten()
}

/// Byte offset where `segment` ends in `clitic`. A typographic apostrophe
/// matches the ASCII one.
fn clitic_start(segment: &str, clitic: &str) -> Option<usize> {
    let mut tail = segment.char_indices().rev();
    let mut start = segment.len();
    for expected in clitic.chars().rev() {
        let (at, found) = tail.next()?;
        let matches = if expected == '\'' {
            found == '\'' || found == '\u{2019}'
        } else {
            found.to_ascii_lowercase() == expected
        };
        if !matches {
            return None;
        }
        start = at;
    }
    Some(start)
}

/// Entirely alphabetic and at least two characters long.
pub fn is_word(unit: &str) -> bool {
    unit.chars().all(char::is_alphabetic) && unit.chars().count() >= MIN_TOKEN_CHARS
}

#[cfg(test)]
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::default().tokenize(text)
}
