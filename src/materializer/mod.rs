pub mod file_writer;
pub mod report;

pub use file_writer::{MaterializeEvent, MaterializeOutcome, Materializer, WriteFailure};
pub use report::{FileInfo, ProjectReport};
