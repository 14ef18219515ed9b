//! Fetcher trait for the external package tool
//!
//! A fetcher wraps exactly one invocation of the external tool per operation.
//! Operations run to completion: no retries, no timeouts, no cancellation.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{Package, PackageVersion, Repository, values_filename};
use crate::reducer::{FetchRequest, Msg};

/// The tool operation a failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    RefreshIndex,
    ListRepositories,
    ListPackages,
    ListVersions,
    FetchArtifact,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::RefreshIndex => "update repositories",
            Operation::ListRepositories => "list repositories",
            Operation::ListPackages => "search charts",
            Operation::ListVersions => "search versions",
            Operation::FetchArtifact => "get chart values",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while talking to the external tool
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The tool could not be started at all
    #[error("Failed to {op}: could not run {program}: {source}")]
    Spawn {
        op: Operation,
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The tool ran but exited non-zero
    #[error("Failed to {op}: {status}: {stderr}")]
    Exit {
        op: Operation,
        status: String,
        stderr: String,
    },
    /// Output was not the expected JSON
    #[error("Failed to parse output of {op}: {source}")]
    Parse {
        op: Operation,
        #[source]
        source: serde_json::Error,
    },
    /// The values file could not be saved
    #[error("Failed to write values file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Backend that answers the four drill-down queries and fetches values.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Human-readable name of this fetcher
    fn name(&self) -> &'static str;

    async fn refresh_index(&self) -> Result<(), FetchError>;

    async fn list_repositories(&self) -> Result<Vec<Repository>, FetchError>;

    /// Charts in `repository`, newest version of each.
    async fn list_packages(&self, repository: &str) -> Result<Vec<Package>, FetchError>;

    /// All versions of `package` (qualified name), newest first.
    async fn list_versions(&self, package: &str) -> Result<Vec<PackageVersion>, FetchError>;

    /// Fetches default values and writes them to disk, returning the path written.
    async fn fetch_artifact(&self, package: &str, version: &str) -> Result<PathBuf, FetchError>;
}

/// Runs one request against `fetcher` and folds the outcome into a message.
pub async fn perform(fetcher: &dyn Fetcher, request: FetchRequest) -> Msg {
    debug!(fetcher = fetcher.name(), ?request, "performing fetch");
    let result = match request {
        FetchRequest::RefreshIndex => fetcher.refresh_index().await.map(|()| Msg::IndexRefreshed),
        FetchRequest::ListRepositories => fetcher
            .list_repositories()
            .await
            .map(Msg::RepositoriesLoaded),
        FetchRequest::ListPackages { repository } => fetcher
            .list_packages(&repository)
            .await
            .map(Msg::PackagesLoaded),
        FetchRequest::ListVersions { package } => fetcher
            .list_versions(&package)
            .await
            .map(Msg::VersionsLoaded),
        FetchRequest::FetchArtifact { package, version } => fetcher
            .fetch_artifact(&package, &version)
            .await
            .map(Msg::ArtifactFetched),
    };
    result.unwrap_or_else(|e| Msg::Failed(e.to_string()))
}

/// Parses a JSON array printed by the tool; blank output is an empty list.
pub fn parse_list<T: DeserializeOwned>(op: Operation, output: &[u8]) -> Result<Vec<T>, FetchError> {
    if output.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(output).map_err(|source| FetchError::Parse { op, source })
}

/// Where the values file for `package` at `version` is saved inside `dir`.
pub fn artifact_path(dir: Option<&Path>, package: &str, version: &str) -> PathBuf {
    let name = values_filename(package, version);
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
