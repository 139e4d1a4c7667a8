//! Text processing and analysis module

pub mod analyzer;
pub mod document;
pub mod keywords;
pub mod matcher;
pub mod skills;
pub mod suggestions;
pub mod text_processor;
