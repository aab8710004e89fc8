pub mod extractor;
pub mod normalizer;

pub use extractor::{extract_answer, extract_answers, resolve_answer};
pub use normalizer::{normalize, parse_submission};
