use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// RPC service listener.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_server_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_path: default_data_path() }
    }
}

/// HTML/JSON gateway listener and the RPC service it forwards to.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_gateway_port(),
            upstream_url: default_upstream_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_server_port() -> u16 { 50051 }
fn default_gateway_port() -> u16 { 8000 }
fn default_data_path() -> PathBuf { PathBuf::from("data/terms.json") }
fn default_upstream_url() -> String { "http://127.0.0.1:50051".into() }
fn default_request_timeout() -> u64 { 10 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is missing, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment variables. `lookup` is injected so tests never
    /// touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").or_else(|| lookup("GRPC_PORT")).and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(path) = lookup("DATA_PATH") {
            self.storage.data_path = PathBuf::from(path);
        }
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.gateway.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT").and_then(|p| p.parse().ok()) {
            self.gateway.port = port;
        }
        if let Some(url) = lookup("GLOSSARY_URL") {
            self.gateway.upstream_url = url;
        } else if lookup("GLOSSARY_HOST").is_some() || lookup("GLOSSARY_PORT").is_some() {
            let host = lookup("GLOSSARY_HOST").unwrap_or_else(|| "glossary".into());
            let port = lookup("GLOSSARY_PORT").unwrap_or_else(|| default_server_port().to_string());
            self.gateway.upstream_url = format!("http://{host}:{port}");
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.gateway.normalize()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_path is empty; set it in config.toml or DATA_PATH"));
        }
        if self.data_path.file_name().is_none() {
            return Err(anyhow!("storage.data_path must name a file, got {}", self.data_path.display()));
        }
        Ok(())
    }
}

impl GatewayConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("gateway.port must be in 1..=65535"));
        }
        let lower = self.upstream_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("gateway.upstream_url must start with http:// or https://"));
        }
        while self.upstream_url.ends_with('/') {
            self.upstream_url.pop();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.port, 50051);
        assert_eq!(cfg.gateway.port, 8000);
        assert_eq!(cfg.storage.data_path, PathBuf::from("data/terms.json"));
    }

    #[test]
    fn partial_sections_fill_missing_fields() {
        let cfg = parse(
            r#"
            [server]
            port = 6000

            [storage]
            data_path = "/var/lib/glossary/terms.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 6000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.data_path, PathBuf::from("/var/lib/glossary/terms.json"));
    }

    #[test]
    fn env_overrides_and_glossary_host_port() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[
            ("GRPC_PORT", "50100"),
            ("DATA_PATH", "/data/terms.json"),
            ("GLOSSARY_HOST", "glossary"),
            ("GLOSSARY_PORT", "50100"),
        ]));
        assert_eq!(cfg.server.port, 50100);
        assert_eq!(cfg.storage.data_path, PathBuf::from("/data/terms.json"));
        assert_eq!(cfg.gateway.upstream_url, "http://glossary:50100");
    }

    #[test]
    fn glossary_url_wins_over_host_port() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[("GLOSSARY_URL", "http://svc:1"), ("GLOSSARY_HOST", "other")]));
        assert_eq!(cfg.gateway.upstream_url, "http://svc:1");
    }

    #[test]
    fn normalize_trims_url_and_rejects_bad_scheme() {
        let mut cfg = AppConfig::default();
        cfg.gateway.upstream_url = "http://svc:50051/".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.gateway.upstream_url, "http://svc:50051");
        assert_eq!(cfg.server.worker_threads, Some(4));

        cfg.gateway.upstream_url = "svc:50051".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn empty_data_path_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.storage.data_path = PathBuf::new();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
