pub mod defaults;
pub mod file;
pub mod rod;

pub use file::PartialConfig;
pub use rod::RodFile;
