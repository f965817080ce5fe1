//! backstat.toml configuration parser.

use std::path::Path;

use anyhow::Context;
use backstat_dashboard::auth::BasicCredentials;
use backstat_recon::StorageClasses;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackstatConfig {
    pub server: ServerConfig,
    pub cluster: ClusterConfig,
    pub storage_class: StorageClasses,
    /// Credential pair for the dashboard; omit to serve it open.
    pub auth: Option<BasicCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub oc_binary: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            oc_binary: "oc".to_string(),
        }
    }
}

impl BackstatConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise `backstat.toml` from the working
    /// directory when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new("backstat.toml");
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config() {
        let config = BackstatConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cluster.oc_binary, "oc");
        assert_eq!(config.storage_class.ceph, "ceph");
        assert_eq!(config.storage_class.nfs, "nfs-proxmox-vm");
        assert!(config.auth.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[server]
port = 9090

[cluster]
oc_binary = "/usr/local/bin/oc"

[storage_class]
ceph = "ceph-rbd"
nfs = "nfs-slow"

[auth]
username = "ops"
password = "s3cret"
"#;
        let config: BackstatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cluster.oc_binary, "/usr/local/bin/oc");
        assert_eq!(config.storage_class.ceph, "ceph-rbd");
        assert_eq!(config.auth.unwrap().username, "ops");
    }

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let config: BackstatConfig = toml::from_str("[server]\nport = 8888\n").unwrap();
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.cluster.oc_binary, "oc");
        assert!(config.auth.is_none());
    }
}
