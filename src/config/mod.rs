use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    jwt: String,
    database_uri: String,
    #[serde(default)]
    docs: bool,
    #[serde(default)]
    seed_admin: Option<SeedAdmin>,
}

/// Admin account created on startup of the in-memory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAdmin {
    email: String,
    password: String,
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    Self::from_bytes(&bytes)
                };

                match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn from_bytes(bytes: &[u8]) -> ConfigResult<Self> {
        let text = std::str::from_utf8(bytes)?;
        let config: Self = toml::from_str(text)?;
        if config.app.jwt.trim().is_empty() {
            return Err(ConfigError::EmptyJwtSecret);
        }
        Ok(config)
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }

    #[inline]
    pub fn seed_admin(&self) -> Option<&SeedAdmin> {
        self.seed_admin.as_ref()
    }

    /// `memory://` selects the in-process store instead of Postgres.
    pub fn uses_memory_store(&self) -> bool {
        self.database_uri.starts_with("memory://")
    }
}

impl SeedAdmin {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn config_test() {
        let config = Config::get_or_init(true).await;
        assert_eq!(config.host().bindto(), "127.0.0.1:5000"); // defaults
    }

    #[test]
    fn parses_minimal_config() {
        let config = Config::from_bytes(
            br#"
            [host]
            bindto = "0.0.0.0:8080"

            [app]
            jwt = "secret"
            database_uri = "postgres://lms@localhost/lms"
            "#,
        )
        .unwrap();

        assert_eq!(config.host().bindto(), "0.0.0.0:8080");
        assert!(!config.app().docs());
        assert!(config.app().seed_admin().is_none());
        assert!(!config.app().uses_memory_store());
    }

    #[test]
    fn parses_seed_admin() {
        let config = Config::from_bytes(
            br#"
            [host]
            bindto = "127.0.0.1:5000"

            [app]
            jwt = "secret"
            database_uri = "memory://"
            docs = true

            [app.seed_admin]
            email = "root@plant.local"
            password = "hunter2"
            "#,
        )
        .unwrap();

        let admin = config.app().seed_admin().unwrap();
        assert_eq!(admin.email(), "root@plant.local");
        assert!(config.app().uses_memory_store());
        assert!(config.app().docs());
    }

    #[test]
    fn rejects_empty_jwt_secret() {
        let result = Config::from_bytes(
            b"[host]\nbindto = \"x\"\n[app]\njwt = \"  \"\ndatabase_uri = \"memory://\"\n",
        );
        assert!(matches!(result, Err(ConfigError::EmptyJwtSecret)));
    }

    #[test]
    fn rejects_missing_section() {
        let result = Config::from_bytes(b"[host]\nbindto = \"x\"\n");
        assert!(matches!(result, Err(ConfigError::TomlDeError(_))));
    }
}
