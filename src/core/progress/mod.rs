pub mod extractor;
pub mod samples;
pub mod types;
