//! Shape-preserving translation of whole documents.

pub mod tree;
pub mod walker;

pub use walker::{StructuralTranslator, TranslateError, TranslationReport};
