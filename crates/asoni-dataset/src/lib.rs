pub mod builder;
pub mod error;
pub mod job;
pub mod manifest;
pub mod package;

pub use builder::{BuildMode, DatasetBuilder};
pub use error::DatasetError;
pub use job::{FontJob, job_seed};
pub use manifest::{read_manifest, write_manifest};
pub use package::package_dataset;
