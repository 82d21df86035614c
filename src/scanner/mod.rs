pub mod document_reader;
pub mod path_filter;

pub use document_reader::{DocumentFailure, DocumentFile, DocumentReader, DocumentStatus, ReadOutcome};
pub use path_filter::PathFilter;
