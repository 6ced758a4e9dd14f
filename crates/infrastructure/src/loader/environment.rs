//! Seed environment loading.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use litmus_domain::Environment;
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;

use super::{LoadError, LoadResult};

/// Name of the seed environment file inside a config directory.
pub const ENV_FILE_NAME: &str = "env.yaml";

/// `env.yaml` holds either a flat mapping or a list of key/value entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEnvironment {
    Map(IndexMap<String, Value>),
    Entries(Vec<EnvEntry>),
}

#[derive(Debug, Deserialize)]
struct EnvEntry {
    key: String,
    #[serde(default)]
    value: Value,
}

impl From<RawEnvironment> for Environment {
    fn from(raw: RawEnvironment) -> Self {
        match raw {
            RawEnvironment::Map(map) => map.into_iter().collect(),
            RawEnvironment::Entries(entries) => {
                entries.into_iter().map(|e| (e.key, e.value)).collect()
            }
        }
    }
}

/// Loads the seed environment for the config at `config`.
///
/// For a directory the seed is `<config>/env.yaml`; for a single test file
/// it is the `env.yaml` next to it. A missing seed file yields an empty
/// environment.
///
/// # Errors
///
/// Returns [`LoadError`] if the seed file exists but cannot be read or
/// parsed.
pub async fn load_environment(config: &Path) -> LoadResult<Environment> {
    let path = seed_path(config).await;

    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(file = %path.display(), "env file does not exist");
            return Ok(Environment::new());
        }
        Err(e) => return Err(LoadError::io(&path, e)),
    };

    if content.trim().is_empty() {
        return Ok(Environment::new());
    }

    let raw: RawEnvironment =
        serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: path.clone(),
            source,
        })?;
    let env = Environment::from(raw);
    tracing::debug!(file = %path.display(), variables = env.len(), "loaded seed environment");

    Ok(env)
}

async fn seed_path(config: &Path) -> PathBuf {
    let is_dir = fs::metadata(config).await.is_ok_and(|m| m.is_dir());

    if is_dir {
        config.join(ENV_FILE_NAME)
    } else {
        config
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(ENV_FILE_NAME)
    }
}
