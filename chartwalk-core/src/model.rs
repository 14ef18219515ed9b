use serde::{Deserialize, Serialize};

pub type RepositoryName = String;

/// A chart repository registered with the external tool.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    pub name: RepositoryName,
    pub url: String,
}

/// A chart found in one repository; `version` is the newest chart version.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Package {
    /// Qualified name, e.g. `argo/argo-cd`
    #[serde(rename = "name")]
    pub qualified_name: String,
    pub version: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub description: String,
}

/// One published version of a chart.
///
/// Versions arrive in the order the external tool prints them, newest first.
/// Element 0 of a version list is therefore treated as "latest" by position;
/// version strings are never compared.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageVersion {
    #[serde(rename = "name")]
    pub qualified_name: String,
    pub version: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default, rename = "created")]
    pub created_timestamp: String,
}

impl PackageVersion {
    pub fn is_latest(index: usize) -> bool {
        index == 0
    }
}

/// Strips any `{repository}/` prefix from a qualified package name.
pub fn base_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('/')
        .map(|(_, base)| base)
        .unwrap_or(qualified_name)
}

/// Strips exactly `{repo}/` when present, leaving other names intact.
pub fn display_name<'a>(qualified_name: &'a str, repo: &str) -> &'a str {
    qualified_name
        .strip_prefix(repo)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(qualified_name)
}

/// File name the default values of `qualified_name` at `version` are saved under.
pub fn values_filename(qualified_name: &str, version: &str) -> String {
    format!("{}-{}-default-values.yaml", base_name(qualified_name), version)
}
