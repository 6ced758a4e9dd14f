//! Test file discovery and parsing.

use std::path::{Path, PathBuf};

use litmus_domain::TestCase;
use tokio::fs;

use super::schema::{RawTestCase, TomlTestFile};
use super::{LoadError, LoadResult};

/// Supported test file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFileFormat {
    /// A YAML list of test cases.
    Yaml,
    /// A TOML document with `[[litmus.test]]` tables.
    Toml,
}

impl TestFileFormat {
    /// Detects the format of a file found while scanning a directory.
    ///
    /// Only `*_test.yaml`, `*_test.yml` and `*.toml` qualify, so a seed
    /// `env.yaml` next to the tests is never mistaken for one.
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;

        if name.ends_with("_test.yaml") || name.ends_with("_test.yml") {
            Some(Self::Yaml)
        } else if name.ends_with(".toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }

    /// Detects the format of a file named explicitly by the user, going by
    /// extension alone.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parses `content`, read from `path`, into test cases in declared order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Yaml`] or [`LoadError::Toml`] on schema
    /// mismatches, and [`LoadError::InvalidCase`] for malformed cases.
    pub fn parse(self, content: &str, path: &Path) -> LoadResult<Vec<TestCase>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<RawTestCase> = match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            })?,
            Self::Toml => {
                let file: TomlTestFile =
                    toml::from_str(content).map_err(|source| LoadError::Toml {
                        path: path.to_path_buf(),
                        source,
                    })?;
                file.litmus.test
            }
        };

        raw.into_iter()
            .map(|case| {
                let name = case.name().to_string();
                case.into_test_case()
                    .map_err(|message| LoadError::InvalidCase {
                        path: path.to_path_buf(),
                        name,
                        message,
                    })
            })
            .collect()
    }
}

/// Loads every test case under `path`.
///
/// A directory yields the cases of each test file in file name order; a
/// file yields its own cases.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered. Nothing is returned from a
/// partially loaded directory.
pub async fn load_test_cases(path: &Path) -> LoadResult<Vec<TestCase>> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| LoadError::io(path, e))?;

    if !metadata.is_dir() {
        let format = TestFileFormat::from_extension(path).ok_or_else(|| {
            LoadError::UnsupportedFile {
                path: path.to_path_buf(),
            }
        })?;
        return load_file(path, format).await;
    }

    let files = discover(path).await?;
    if files.is_empty() {
        tracing::warn!(dir = %path.display(), "no test files found");
    }

    let mut cases = Vec::new();
    for (file, format) in files {
        cases.extend(load_file(&file, format).await?);
    }

    Ok(cases)
}

async fn load_file(path: &Path, format: TestFileFormat) -> LoadResult<Vec<TestCase>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::io(path, e))?;

    let cases = format.parse(&content, path)?;
    tracing::debug!(file = %path.display(), ?format, cases = cases.len(), "loaded test file");

    Ok(cases)
}

async fn discover(dir: &Path) -> LoadResult<Vec<(PathBuf, TestFileFormat)>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| LoadError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| LoadError::io(dir, e))?
    {
        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
        if let Some(format) = TestFileFormat::detect(&path).filter(|_| is_file) {
            files.push((path, format));
        }
    }

    files.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
