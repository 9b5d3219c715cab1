pub mod frequency;
pub mod markup;
pub mod tokenizer;

pub use frequency::aggregate;
pub use markup::strip_markup;
pub use tokenizer::Tokenizer;
