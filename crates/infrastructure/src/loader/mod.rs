//! Test file and seed environment loading.
//!
//! A config path is either a directory or a single test file. Directories
//! are scanned for `*_test.yaml`, `*_test.yml` and `*.toml` files in file
//! name order, and may carry an `env.yaml` seed environment.

mod environment;
mod schema;
mod test_files;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use environment::{ENV_FILE_NAME, load_environment};
pub use schema::LegacyGetter;
pub use test_files::{TestFileFormat, load_test_cases};

/// Errors raised while loading test files or the seed environment.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file or directory could not be read.
    #[error("reading {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A YAML file did not match the expected schema.
    #[error("parsing {}: {source}", path.display())]
    Yaml {
        /// The offending file.
        path: PathBuf,
        /// The parser failure.
        #[source]
        source: serde_yaml::Error,
    },

    /// A TOML file did not match the expected schema.
    #[error("parsing {}: {source}", path.display())]
    Toml {
        /// The offending file.
        path: PathBuf,
        /// The parser failure.
        #[source]
        source: toml::de::Error,
    },

    /// A test case parsed but is not well formed.
    #[error("{}: test {name:?}: {message}", path.display())]
    InvalidCase {
        /// The file declaring the case.
        path: PathBuf,
        /// The case name, possibly empty.
        name: String,
        /// What is wrong with it.
        message: String,
    },

    /// A single file was given whose extension is not a known test format.
    #[error("unsupported test file {}: expected .yaml, .yml or .toml", path.display())]
    UnsupportedFile {
        /// The offending file.
        path: PathBuf,
    },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
