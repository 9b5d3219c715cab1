pub mod types;

pub use types::{PageText, RankedFrequencyMap, Token, WordCount};
