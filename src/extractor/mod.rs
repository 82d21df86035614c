pub mod command_filter;
pub mod fence;
pub mod markdown_extractor;
pub mod strategy;

pub use command_filter::is_command_transcript;
pub use fence::RECOGNIZED_EXTENSIONS;
pub use markdown_extractor::{extract, ExtractedFile, ExtractionResult, Extractor};
pub use strategy::Strategy;
