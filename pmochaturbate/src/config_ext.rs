//! Extension pour intégrer Chaturbate dans pmoconfig
//!
//! Ce module fournit le trait `ChaturbateConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages de la source Chaturbate :
//!
//! - Activation/désactivation de la source
//! - URL de base de l'API
//! - Timeout des requêtes
//! - User-Agent
//!
//! # Exemple
//!
//! ```no_run
//! use pmoconfig::get_config;
//! use pmochaturbate::{ChaturbateConfigExt, ChaturbatePlugin};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = get_config();
//!
//! if !config.get_chaturbate_enabled()? {
//!     println!("Chaturbate is disabled");
//!     return Ok(());
//! }
//!
//! let client = config.chaturbate_client_builder()?.build().await?;
//! let plugin = ChaturbatePlugin::new(client);
//! # Ok(())
//! # }
//! ```

use crate::client::{
    ClientBuilder, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;
use std::time::Duration;

const ENABLED_PATH: &[&str] = &["sources", "chaturbate", "enabled"];
const BASE_URL_PATH: &[&str] = &["sources", "chaturbate", "base_url"];
const TIMEOUT_PATH: &[&str] = &["sources", "chaturbate", "request_timeout_secs"];
const USER_AGENT_PATH: &[&str] = &["sources", "chaturbate", "user_agent"];

/// Trait d'extension pour gérer la configuration Chaturbate dans pmoconfig
///
/// # Auto-persist des valeurs par défaut
///
/// Les getters persistent automatiquement les valeurs par défaut dans la
/// configuration si elles n'existent pas encore ou sont invalides.
pub trait ChaturbateConfigExt {
    /// Vérifie si Chaturbate est activé (défaut : `true`)
    fn get_chaturbate_enabled(&self) -> Result<bool>;

    /// Active ou désactive Chaturbate
    fn set_chaturbate_enabled(&self, enabled: bool) -> Result<()>;

    /// URL de base de l'API (défaut : `https://chaturbate.com`)
    fn get_chaturbate_base_url(&self) -> Result<String>;

    /// Définit l'URL de base de l'API
    fn set_chaturbate_base_url(&self, url: String) -> Result<()>;

    /// Timeout des requêtes en secondes (défaut : 30)
    fn get_chaturbate_request_timeout_secs(&self) -> Result<u64>;

    /// Définit le timeout des requêtes en secondes
    fn set_chaturbate_request_timeout_secs(&self, secs: u64) -> Result<()>;

    /// User-Agent envoyé à l'API
    fn get_chaturbate_user_agent(&self) -> Result<String>;

    /// Définit le User-Agent
    fn set_chaturbate_user_agent(&self, user_agent: String) -> Result<()>;

    /// Construit un `ClientBuilder` à partir de la configuration
    fn chaturbate_client_builder(&self) -> Result<ClientBuilder> {
        Ok(ClientBuilder::new()
            .base_url(self.get_chaturbate_base_url()?)
            .timeout(Duration::from_secs(
                self.get_chaturbate_request_timeout_secs()?,
            ))
            .user_agent(self.get_chaturbate_user_agent()?))
    }
}

impl ChaturbateConfigExt for Config {
    fn get_chaturbate_enabled(&self) -> Result<bool> {
        match self.get_value(ENABLED_PATH) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => {
                self.set_chaturbate_enabled(true)?;
                Ok(true)
            }
        }
    }

    fn set_chaturbate_enabled(&self, enabled: bool) -> Result<()> {
        self.set_value(ENABLED_PATH, Value::Bool(enabled))
    }

    fn get_chaturbate_base_url(&self) -> Result<String> {
        match self.get_value(BASE_URL_PATH) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => {
                self.set_chaturbate_base_url(DEFAULT_BASE_URL.to_string())?;
                Ok(DEFAULT_BASE_URL.to_string())
            }
        }
    }

    fn set_chaturbate_base_url(&self, url: String) -> Result<()> {
        self.set_value(BASE_URL_PATH, Value::String(url))
    }

    fn get_chaturbate_request_timeout_secs(&self) -> Result<u64> {
        match self.get_value(TIMEOUT_PATH).ok().and_then(|v| v.as_u64()) {
            Some(secs) if secs > 0 => Ok(secs),
            _ => {
                self.set_chaturbate_request_timeout_secs(DEFAULT_REQUEST_TIMEOUT_SECS)?;
                Ok(DEFAULT_REQUEST_TIMEOUT_SECS)
            }
        }
    }

    fn set_chaturbate_request_timeout_secs(&self, secs: u64) -> Result<()> {
        self.set_value(TIMEOUT_PATH, Value::Number(serde_yaml::Number::from(secs)))
    }

    fn get_chaturbate_user_agent(&self) -> Result<String> {
        match self.get_value(USER_AGENT_PATH) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => {
                self.set_chaturbate_user_agent(DEFAULT_USER_AGENT.to_string())?;
                Ok(DEFAULT_USER_AGENT.to_string())
            }
        }
    }

    fn set_chaturbate_user_agent(&self, user_agent: String) -> Result<()> {
        self.set_value(USER_AGENT_PATH, Value::String(user_agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(&dir.path().to_string_lossy()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults() {
        let (_dir, config) = temp_config();
        assert!(config.get_chaturbate_enabled().unwrap());
        assert_eq!(config.get_chaturbate_base_url().unwrap(), DEFAULT_BASE_URL);
        assert_eq!(
            config.get_chaturbate_request_timeout_secs().unwrap(),
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
        assert_eq!(config.get_chaturbate_user_agent().unwrap(), DEFAULT_USER_AGENT);
        // the default User-Agent is persisted on first read
        assert!(config.get_value(USER_AGENT_PATH).is_ok());
    }

    #[test]
    fn test_setters_round_trip() {
        let (_dir, config) = temp_config();
        config.set_chaturbate_enabled(false).unwrap();
        config
            .set_chaturbate_base_url("http://127.0.0.1:8080".to_string())
            .unwrap();
        config.set_chaturbate_request_timeout_secs(5).unwrap();

        assert!(!config.get_chaturbate_enabled().unwrap());
        assert_eq!(
            config.get_chaturbate_base_url().unwrap(),
            "http://127.0.0.1:8080"
        );
        assert_eq!(config.get_chaturbate_request_timeout_secs().unwrap(), 5);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let (_dir, config) = temp_config();
        config
            .set_value(TIMEOUT_PATH, Value::String("soon".into()))
            .unwrap();
        assert_eq!(
            config.get_chaturbate_request_timeout_secs().unwrap(),
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    #[tokio::test]
    async fn test_client_builder_from_config() {
        let (_dir, config) = temp_config();
        config
            .set_chaturbate_base_url("http://127.0.0.1:8080".to_string())
            .unwrap();
        config.set_chaturbate_request_timeout_secs(7).unwrap();

        let client = config
            .chaturbate_client_builder()
            .unwrap()
            .build()
            .await
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
        assert_eq!(client.timeout(), Duration::from_secs(7));
    }
}
