use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use chartwalk_core::fetcher::{FetchError, Fetcher, Operation, artifact_path, parse_list};
use chartwalk_core::model::{Package, PackageVersion, Repository};

/// Fetcher backed by the `helm` command line tool.
pub struct HelmCli {
    program: PathBuf,
    output_dir: Option<PathBuf>,
}

impl HelmCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            output_dir: None,
        }
    }

    /// Write values files into `dir` instead of the working directory.
    #[allow(dead_code)]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Runs the tool once and returns its stdout.
    async fn run(&self, op: Operation, args: &[&str]) -> Result<Vec<u8>, FetchError> {
        debug!(program = %self.program.display(), ?args, "running tool");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                op,
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::Exit {
                op,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Fetcher for HelmCli {
    fn name(&self) -> &'static str {
        "helm"
    }

    async fn refresh_index(&self) -> Result<(), FetchError> {
        self.run(Operation::RefreshIndex, &["repo", "update"]).await?;
        Ok(())
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>, FetchError> {
        let op = Operation::ListRepositories;
        let out = self.run(op, &["repo", "list", "-o", "json"]).await?;
        parse_list(op, &out)
    }

    async fn list_packages(&self, repository: &str) -> Result<Vec<Package>, FetchError> {
        let op = Operation::ListPackages;
        let query = format!("{}/", repository);
        let out = self.run(op, &["search", "repo", query.as_str(), "-o", "json"]).await?;
        parse_list(op, &out)
    }

    async fn list_versions(&self, package: &str) -> Result<Vec<PackageVersion>, FetchError> {
        let op = Operation::ListVersions;
        let out = self
            .run(op, &["search", "repo", package, "--versions", "-o", "json"])
            .await?;
        parse_list(op, &out)
    }

    async fn fetch_artifact(&self, package: &str, version: &str) -> Result<PathBuf, FetchError> {
        let values = self
            .run(
                Operation::FetchArtifact,
                &["show", "values", package, "--version", version],
            )
            .await?;
        let path = artifact_path(self.output_dir.as_deref(), package, version);
        tokio::fs::write(&path, &values)
            .await
            .map_err(|source| FetchError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
