use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::{expand_path, is_static_root};

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, ENV_POSTGRES_URL,
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// Database Backend Enum (SQLite or PostgreSQL)
// =============================================================================

/// Database backend holding the influencer tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Sqlite,
    Postgres,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
            DatabaseBackend::Postgres => write!(f, "postgres"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Browser frontend directory
    pub static_dir: Option<String>,
}

/// PostgreSQL configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    /// PostgreSQL connection URL (or use BRANDLINK_POSTGRES_URL env var)
    pub url: Option<String>,
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: Option<u32>,
    /// Minimum number of connections to keep warm (default: 1)
    pub min_connections: Option<u32>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: Option<u64>,
    /// Max connection lifetime in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
    /// Statement timeout in seconds, 0 to disable (default: 30)
    pub statement_timeout_secs: Option<u64>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Backend: sqlite (default) or postgres
    pub backend: Option<DatabaseBackend>,
    /// PostgreSQL-specific configuration
    pub postgres: Option<PostgresFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Names of top-level keys that are not part of the config schema
    fn unknown_fields(&self) -> Vec<&str> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().map(|k| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
            if server.static_dir.is_some() {
                current.static_dir = server.static_dir;
            }
        }

        if let Some(database) = other.database {
            let current = self.database.get_or_insert_with(DatabaseFileConfig::default);
            if database.backend.is_some() {
                tracing::trace!(backend = ?database.backend, "Merging database.backend");
                current.backend = database.backend;
            }
            if let Some(pg) = database.postgres {
                let cur = current
                    .postgres
                    .get_or_insert_with(PostgresFileConfig::default);
                if pg.url.is_some() {
                    cur.url = pg.url;
                }
                if pg.max_connections.is_some() {
                    cur.max_connections = pg.max_connections;
                }
                if pg.min_connections.is_some() {
                    cur.min_connections = pg.min_connections;
                }
                if pg.acquire_timeout_secs.is_some() {
                    cur.acquire_timeout_secs = pg.acquire_timeout_secs;
                }
                if pg.idle_timeout_secs.is_some() {
                    cur.idle_timeout_secs = pg.idle_timeout_secs;
                }
                if pg.max_lifetime_secs.is_some() {
                    cur.max_lifetime_secs = pg.max_lifetime_secs;
                }
                if pg.statement_timeout_secs.is_some() {
                    cur.statement_timeout_secs = pg.statement_timeout_secs;
                }
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser frontend served for unmatched paths
    pub static_dir: Option<PathBuf>,
}

/// PostgreSQL configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep warm
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,
    /// Max connection lifetime in seconds
    pub max_lifetime_secs: u64,
    /// Statement timeout in seconds (0 = disabled)
    pub statement_timeout_secs: u64,
}

/// Database configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    /// Only populated when backend = postgres
    pub postgres: Option<PostgresConfig>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.brandlink/brandlink.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::from_layers(cli, file_config);
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            static_dir = ?config.server.static_dir,
            database_backend = %config.database.backend,
            debug = config.debug,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Layer defaults -> file config -> CLI/env overrides
    fn from_layers(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let static_dir = cli
            .static_dir
            .as_ref()
            .map(|p| expand_path(&p.to_string_lossy()))
            .or_else(|| file_server.static_dir.as_deref().map(expand_path));

        // debug: CLI/env flag takes precedence, then file config, default false
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let backend = cli
            .db_backend
            .or(file_database.backend)
            .unwrap_or_default();

        let postgres = if backend == DatabaseBackend::Postgres {
            let file_pg = file_database.postgres.unwrap_or_default();
            let url = cli
                .postgres_url
                .clone()
                .or_else(|| std::env::var(ENV_POSTGRES_URL).ok())
                .or(file_pg.url)
                .unwrap_or_default();
            Some(PostgresConfig {
                url,
                max_connections: file_pg
                    .max_connections
                    .unwrap_or(POSTGRES_DEFAULT_MAX_CONNECTIONS),
                min_connections: file_pg
                    .min_connections
                    .unwrap_or(POSTGRES_DEFAULT_MIN_CONNECTIONS),
                acquire_timeout_secs: file_pg
                    .acquire_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS),
                idle_timeout_secs: file_pg
                    .idle_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS),
                max_lifetime_secs: file_pg
                    .max_lifetime_secs
                    .unwrap_or(POSTGRES_DEFAULT_MAX_LIFETIME_SECS),
                statement_timeout_secs: file_pg
                    .statement_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS),
            })
        } else {
            None
        };

        Self {
            server: ServerConfig {
                host,
                port,
                static_dir,
            },
            database: DatabaseConfig { backend, postgres },
            debug,
        }
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port the frontend cannot know
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if let Some(ref dir) = self.server.static_dir {
            if !dir.is_dir() {
                anyhow::bail!(
                    "Configuration error: server.static_dir is not a directory: {}",
                    dir.display()
                );
            }
            if !is_static_root(dir) {
                tracing::warn!(dir = %dir.display(), "server.static_dir has no index.html");
            }
        }

        if self.database.backend == DatabaseBackend::Postgres {
            match self.database.postgres {
                Some(ref pg) if pg.url.is_empty() => anyhow::bail!(
                    "Configuration error: database.postgres.url is required when database.backend is 'postgres'. \
                     Set via BRANDLINK_POSTGRES_URL env var or database.postgres.url in config file."
                ),
                Some(ref pg) if pg.min_connections > pg.max_connections => anyhow::bail!(
                    "Configuration error: database.postgres.min_connections ({}) exceeds max_connections ({})",
                    pg.min_connections,
                    pg.max_connections
                ),
                Some(_) => {}
                None => anyhow::bail!(
                    "Configuration error: PostgreSQL configuration missing when database.backend is 'postgres'"
                ),
            }
        }

        if is_all_interfaces(&self.server.host) {
            tracing::warn!(
                host = %self.server.host,
                "Listening on all interfaces; the API has no authentication"
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.brandlink/brandlink.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FileConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_database_backend_serde() {
        let backend: DatabaseBackend = serde_json::from_str(r#""postgres""#).unwrap();
        assert_eq!(backend, DatabaseBackend::Postgres);
        assert_eq!(DatabaseBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_file_config_parse_full() {
        let config = parse(
            r#"{
                "server": { "host": "0.0.0.0", "port": 8080, "static_dir": "./public" },
                "database": {
                    "backend": "postgres",
                    "postgres": { "url": "postgres://db/brandlink", "max_connections": 4 }
                },
                "debug": true
            }"#,
        );
        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, Some(8080));
        assert_eq!(server.static_dir.as_deref(), Some("./public"));

        let database = config.database.as_ref().unwrap();
        assert_eq!(database.backend, Some(DatabaseBackend::Postgres));
        assert_eq!(database.postgres.as_ref().unwrap().max_connections, Some(4));
        assert_eq!(config.debug, Some(true));
        assert!(config.unknown_fields().is_empty());
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config = parse("{}");
        assert!(config.server.is_none());
        assert!(config.database.is_none());
        assert!(config.debug.is_none());
    }

    #[test]
    fn test_file_config_unknown_fields() {
        let config = parse(r#"{ "server": { "port": 1 }, "sever": {}, "dbg": true }"#);
        let mut unknown = config.unknown_fields();
        unknown.sort_unstable();
        assert_eq!(unknown, vec!["dbg", "sever"]);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = parse(
            r#"{
                "server": { "host": "base.host", "port": 1000 },
                "database": { "postgres": { "url": "postgres://base", "min_connections": 2 } },
                "debug": false
            }"#,
        );
        let overlay = parse(
            r#"{
                "server": { "port": 2000 },
                "database": { "backend": "postgres", "postgres": { "min_connections": 3 } },
                "debug": true
            }"#,
        );

        base.merge(overlay);

        let server = base.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("base.host"));
        assert_eq!(server.port, Some(2000));

        let database = base.database.as_ref().unwrap();
        assert_eq!(database.backend, Some(DatabaseBackend::Postgres));
        let pg = database.postgres.as_ref().unwrap();
        assert_eq!(pg.url.as_deref(), Some("postgres://base"));
        assert_eq!(pg.min_connections, Some(3));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_layers_defaults() {
        let config = AppConfig::from_layers(&CliConfig::default(), FileConfig::default());
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.server.static_dir.is_none());
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
        assert!(config.database.postgres.is_none());
        assert!(!config.debug);
        config.validate().unwrap();
    }

    #[test]
    fn test_layers_cli_overrides_file() {
        let file = parse(
            r#"{
                "server": { "host": "file.host", "port": 1000 },
                "database": { "backend": "postgres", "postgres": { "url": "postgres://file" } }
            }"#,
        );
        let cli = CliConfig {
            port: Some(3000),
            postgres_url: Some("postgres://cli".to_string()),
            ..Default::default()
        };
        let config = AppConfig::from_layers(&cli, file);

        assert_eq!(config.server.host, "file.host");
        assert_eq!(config.server.port, 3000);
        let pg = config.database.postgres.as_ref().unwrap();
        assert_eq!(pg.url, "postgres://cli");
        assert_eq!(pg.max_connections, POSTGRES_DEFAULT_MAX_CONNECTIONS);
        assert_eq!(pg.statement_timeout_secs, POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS);
    }

    #[test]
    fn test_layers_cli_backend_overrides_file() {
        let file = parse(r#"{ "database": { "backend": "postgres" } }"#);
        let cli = CliConfig {
            db_backend: Some(DatabaseBackend::Sqlite),
            ..Default::default()
        };
        let config = AppConfig::from_layers(&cli, file);
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
        assert!(config.database.postgres.is_none());
    }

    #[test]
    fn test_validation_server_port_zero() {
        let cli = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let err = AppConfig::from_layers(&cli, FileConfig::default())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validation_empty_host() {
        let cli = CliConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        let err = AppConfig::from_layers(&cli, FileConfig::default())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validation_missing_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliConfig {
            static_dir: Some(dir.path().join("missing")),
            ..Default::default()
        };
        let err = AppConfig::from_layers(&cli, FileConfig::default())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("static_dir"));

        let cli = CliConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        AppConfig::from_layers(&cli, FileConfig::default())
            .validate()
            .unwrap();
    }

    #[test]
    fn test_validation_postgres_url_required() {
        let mut config = AppConfig::from_layers(&CliConfig::default(), FileConfig::default());
        config.database.backend = DatabaseBackend::Postgres;
        config.database.postgres = Some(PostgresConfig {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            statement_timeout_secs: 30,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("database.postgres.url is required"));
    }

    #[test]
    fn test_validation_postgres_pool_bounds() {
        let file = parse(
            r#"{ "database": { "backend": "postgres",
                 "postgres": { "url": "postgres://x", "min_connections": 8, "max_connections": 2 } } }"#,
        );
        let err = AppConfig::from_layers(&CliConfig::default(), file)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("min_connections"));
    }

    #[test]
    fn test_load_missing_config_file() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/brandlink.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "server": { "port": 7001 } }"#).unwrap();
        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 7001);
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(is_all_interfaces("[::]"));
        assert!(!is_all_interfaces("127.0.0.1"));
        assert!(!is_all_interfaces("localhost"));
    }
}
