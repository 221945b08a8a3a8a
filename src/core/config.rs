//! Release configuration (JSON).
//!
//! Describes who is cutting the release and the per-version metadata for
//! the k3s, Rancher, RKE2, and charts sub-projects. The TUI itself only
//! needs tag names; the config file is the boundary the rest of the release
//! workflow reads from.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or rendering release configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be opened.
    #[error("failed to open config {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Config JSON was malformed.
    #[error("failed to decode config: {0}")]
    Json(#[from] serde_json::Error),
}

/// User identity for release commits and PRs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Email used for release commits.
    pub email: String,
    /// GitHub username used for forks and PRs.
    pub github_username: String,
}

/// Per-version release metadata for k3s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct K3sRelease {
    /// Kubernetes version being replaced.
    pub old_k8s_version: String,
    /// Kubernetes version being released.
    pub new_k8s_version: String,
    /// client-go version being replaced.
    pub old_k8s_client: String,
    /// client-go version being released.
    pub new_k8s_client: String,
    /// Previous k3s version suffix (e.g. `k3s1`).
    pub old_suffix: String,
    /// New k3s version suffix.
    pub new_suffix: String,
    /// Release branch in the k3s repository.
    pub release_branch: String,
    /// Local workspace directory for the rebase.
    pub workspace: String,
    /// Owner of the k3s repository to release from.
    pub k3s_repo_owner: String,
    /// Owner of the system-agent-installer repository.
    pub system_agent_installer_repo_owner: String,
    /// URL of the Rancher Kubernetes fork.
    pub k8s_rancher_url: String,
    /// URL of the k3s upstream repository.
    pub k3s_upstream_url: String,
    /// Skip push/PR steps when set.
    pub dry_run: bool,
}

/// Per-version release metadata for Rancher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RancherRelease {
    /// Release branch in the Rancher repository.
    pub release_branch: String,
    /// Owner of the Rancher repository to release from.
    pub rancher_repo_owner: String,
}

/// RKE2 release metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rke2 {
    /// Versions being released.
    pub versions: Vec<String>,
}

/// Charts release metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartsRelease {
    /// Local workspace directory for the charts checkout.
    pub workspace: String,
    /// URL of the upstream charts repository.
    pub charts_repo_url: String,
    /// URL of the user's charts fork.
    pub charts_fork_url: String,
    /// Branch lines releases are cut for.
    pub branch_lines: Vec<String>,
}

/// k3s releases keyed by version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct K3s {
    /// Release metadata per version tag.
    pub versions: BTreeMap<String, K3sRelease>,
}

/// Rancher releases keyed by version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rancher {
    /// Release metadata per version tag.
    pub versions: BTreeMap<String, RancherRelease>,
}

/// Credentials used by the release workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Auth {
    /// GitHub API token.
    pub github_token: String,
    /// Path to the SSH key used for pushes.
    pub ssh_key_path: String,
    /// AWS access key id.
    pub aws_access_key_id: String,
    /// AWS secret access key.
    pub aws_secret_access_key: String,
    /// AWS session token.
    pub aws_session_token: String,
    /// AWS default region.
    pub aws_default_region: String,
}

/// Top-level release configuration. Sections are optional so partial
/// configs stay loadable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// User identity.
    pub user: Option<User>,
    /// k3s release metadata.
    pub k3s: Option<K3s>,
    /// Rancher release metadata.
    pub rancher: Option<Rancher>,
    /// RKE2 release metadata.
    pub rke2: Option<Rke2>,
    /// Charts release metadata.
    pub charts: Option<ChartsRelease>,
    /// Credentials.
    pub auth: Option<Auth>,
}

impl Config {
    /// Load the config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read(file)
    }

    /// Decode the config from a JSON stream.
    pub fn read(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Pretty-printed JSON for this config.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A fully-populated template config, suitable as a starting point.
    pub fn example() -> Self {
        Self {
            user: Some(User {
                email: "your.name@suse.com".to_string(),
                github_username: "your-github-username".to_string(),
            }),
            k3s: Some(K3s {
                versions: BTreeMap::from([(
                    "v1.x.y".to_string(),
                    K3sRelease {
                        old_k8s_version: "v1.x.z".to_string(),
                        new_k8s_version: "v1.x.y".to_string(),
                        old_k8s_client: "v0.x.z".to_string(),
                        new_k8s_client: "v0.x.y".to_string(),
                        old_suffix: "k3s1".to_string(),
                        new_suffix: "k3s1".to_string(),
                        release_branch: "release-1.x".to_string(),
                        workspace: "~/src/github.com/k3s-io/kubernetes/v1.x.z/".to_string(),
                        k3s_repo_owner: "k3s-io".to_string(),
                        system_agent_installer_repo_owner: "rancher".to_string(),
                        k8s_rancher_url: "git@github.com:k3s-io/kubernetes.git".to_string(),
                        k3s_upstream_url: "git@github.com:k3s-io/k3s.git".to_string(),
                        dry_run: false,
                    },
                )]),
            }),
            rancher: Some(Rancher {
                versions: BTreeMap::from([(
                    "v2.x.y".to_string(),
                    RancherRelease {
                        release_branch: "release/v2.x".to_string(),
                        rancher_repo_owner: "rancher".to_string(),
                    },
                )]),
            }),
            rke2: Some(Rke2 {
                versions: vec!["v1.x.y".to_string()],
            }),
            charts: Some(ChartsRelease {
                workspace: "~/src/github.com/rancher/charts/".to_string(),
                charts_repo_url: "https://github.com/rancher/charts".to_string(),
                charts_fork_url: "https://github.com/your-github-username/charts".to_string(),
                branch_lines: vec!["2.10".to_string(), "2.9".to_string(), "2.8".to_string()],
            }),
            auth: Some(Auth {
                github_token: "YOUR_TOKEN".to_string(),
                ssh_key_path: "path/to/your/ssh/key".to_string(),
                aws_access_key_id: "XXXXXXXXXXXXXXXXXXX".to_string(),
                aws_secret_access_key: "xxxxxxxxxxxxxxxxxxxxxxxxxxxxx".to_string(),
                aws_session_token: "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
                    .to_string(),
                aws_default_region: "us-east-1".to_string(),
            }),
        }
    }

    /// A simplified text report of the config. Credentials are excluded.
    pub fn render_view(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Release config");

        if let Some(user) = &self.user {
            let _ = writeln!(out);
            let _ = writeln!(out, "User");
            let _ = writeln!(out, "  Email:           {}", user.email);
            let _ = writeln!(out, "  Github Username: {}", user.github_username);
        }

        if let Some(k3s) = &self.k3s {
            let _ = writeln!(out);
            let _ = writeln!(out, "K3s");
            for (version, release) in &k3s.versions {
                let _ = writeln!(out, "  {version}:");
                let _ = writeln!(out, "    Old K8s Version:  {}", release.old_k8s_version);
                let _ = writeln!(out, "    New K8s Version:  {}", release.new_k8s_version);
                let _ = writeln!(out, "    Old K8s Client:   {}", release.old_k8s_client);
                let _ = writeln!(out, "    New K8s Client:   {}", release.new_k8s_client);
                let _ = writeln!(out, "    Old Suffix:       {}", release.old_suffix);
                let _ = writeln!(out, "    New Suffix:       {}", release.new_suffix);
                let _ = writeln!(out, "    Release Branch:   {}", release.release_branch);
                let _ = writeln!(out, "    Dry Run:          {}", release.dry_run);
                let _ = writeln!(out, "    K3s Repo Owner:   {}", release.k3s_repo_owner);
                let _ = writeln!(out, "    K8s Rancher URL:  {}", release.k8s_rancher_url);
                let _ = writeln!(out, "    Workspace:        {}", release.workspace);
                let _ = writeln!(out, "    K3s Upstream URL: {}", release.k3s_upstream_url);
            }
        }

        if let Some(rancher) = &self.rancher {
            let _ = writeln!(out);
            let _ = writeln!(out, "Rancher");
            for (version, release) in &rancher.versions {
                let _ = writeln!(out, "  {version}:");
                let _ = writeln!(out, "    Release Branch:     {}", release.release_branch);
                let _ = writeln!(out, "    Rancher Repo Owner: {}", release.rancher_repo_owner);
            }
        }

        if let Some(rke2) = &self.rke2 {
            let _ = writeln!(out);
            let _ = writeln!(out, "RKE2");
            for version in &rke2.versions {
                let _ = writeln!(out, "  {version}");
            }
        }

        if let Some(charts) = &self.charts {
            let _ = writeln!(out);
            let _ = writeln!(out, "Charts");
            let _ = writeln!(out, "  Workspace:     {}", charts.workspace);
            let _ = writeln!(out, "  ChartsRepoURL: {}", charts.charts_repo_url);
            let _ = writeln!(out, "  ChartsForkURL: {}", charts.charts_fork_url);
            let _ = writeln!(out, "  BranchLines:   {}", charts.branch_lines.join(", "));
        }

        out
    }
}

/// Default config file location: `$HOME/.kdm-update/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kdm-update").join("config.json"))
}
