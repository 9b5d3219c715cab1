use std::ops::Deref;

use serde::Serialize;

/// Markup-stripped content of one fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText(String);

impl PageText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PageText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// An alphabetic word of at least two characters, as produced by the tokenizer.
pub type Token = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: Token,
    pub count: usize,
}

/// Top entries of a frequency count, highest first; equal counts keep
/// first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedFrequencyMap {
    entries: Vec<WordCount>,
}

impl RankedFrequencyMap {
    /// Callers are responsible for ordering; see `text::frequency::aggregate`.
    pub(crate) fn from_sorted(entries: Vec<WordCount>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordCount> {
        self.entries.iter()
    }

    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.word.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.count).collect()
    }

    pub fn max_count(&self) -> Option<usize> {
        self.entries.first().map(|e| e.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<'a> IntoIterator for &'a RankedFrequencyMap {
    type Item = &'a WordCount;
    type IntoIter = std::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
