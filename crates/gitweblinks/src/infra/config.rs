//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::{LinkType, ServerKind, ServerProvider, ServerUrl};
use crate::infra::git::repository_root;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".gitweblinks/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub servers: Servers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Links {
    #[serde(default)]
    link_type: Option<LinkType>,
}

impl Links {
    /// Whether links follow the branch or pin the commit; defaults to the commit.
    pub fn link_type(&self) -> LinkType {
        self.link_type.unwrap_or_default()
    }
}

/// Self-hosted server instances, per provider, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Servers {
    #[serde(default)]
    pub github_enterprise: Vec<ServerUrl>,
    #[serde(default)]
    pub gitlab: Vec<ServerUrl>,
    #[serde(default)]
    pub bitbucket_server: Vec<ServerUrl>,
    #[serde(default)]
    pub azure_devops_server: Vec<ServerUrl>,
}

impl Servers {
    fn get(&self, kind: ServerKind) -> &[ServerUrl] {
        match kind {
            ServerKind::GitHubEnterprise => &self.github_enterprise,
            ServerKind::GitLab => &self.gitlab,
            ServerKind::BitbucketServer => &self.bitbucket_server,
            ServerKind::AzureDevOpsServer => &self.azure_devops_server,
        }
    }
}

impl ServerProvider for Config {
    fn servers(&self, kind: ServerKind) -> Vec<ServerUrl> {
        self.servers.get(kind).to_vec()
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    link_type: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            link_type: env::var("GITWEBLINKS_LINK_TYPE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(link_type: &str) -> Self {
        Self {
            link_type: Some(link_type.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    ///
    /// The workspace layer is looked up from `start`, usually the file being linked.
    pub fn load(start: &Path) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path(start)?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            links: Links {
                link_type: other.links.link_type.or(self.links.link_type),
            },
            servers: Servers {
                github_enterprise: merge_servers(
                    self.servers.github_enterprise,
                    other.servers.github_enterprise,
                ),
                gitlab: merge_servers(self.servers.gitlab, other.servers.gitlab),
                bitbucket_server: merge_servers(
                    self.servers.bitbucket_server,
                    other.servers.bitbucket_server,
                ),
                azure_devops_server: merge_servers(
                    self.servers.azure_devops_server,
                    other.servers.azure_devops_server,
                ),
            },
        }
    }
}

/// Concatenate layers, keeping the first occurrence of duplicate entries.
fn merge_servers(base: Vec<ServerUrl>, overlay: Vec<ServerUrl>) -> Vec<ServerUrl> {
    let mut merged = base;
    for server in overlay {
        if !merged.contains(&server) {
            merged.push(server);
        }
    }
    merged
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("gitweblinks/config.toml"))
}

/// The workspace layer lives at the root of the repository containing `start`.
fn workspace_config_path(start: &Path) -> Result<Option<PathBuf>> {
    let root = repository_root(start)
        .with_context(|| format!("failed to locate the repository for {}", start.display()))?;
    Ok(root.map(|root| root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(link_type) = env.link_type {
        let link_type = link_type
            .parse::<LinkType>()
            .context("invalid GITWEBLINKS_LINK_TYPE")?;
        config.links.link_type = Some(link_type);
    }
    Ok(config)
}
