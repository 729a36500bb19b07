// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Settings come from an optional JSON file (named by `EHRDASH_CONFIG`) and
// are then overridden by individual environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::digest::sha256_hex;
use crate::error::{EhrDashError, Result};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "EHRDASH_CONFIG";

/// SHA-256 of the stock site password.
const DEFAULT_PASSWORD_SHA256: &str =
    "cbdb89ecc76c81332484326cde04bccc9949b40ccdebec58b29899a6e1722927";

/// Twelve hours, the lifetime of the `site_auth` cookie.
const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 12;

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface the HTTP server binds to.
    pub bind_address: String,
    /// Port for the HTTP server (default 3000).
    pub port: u16,
    /// Lowercase hex SHA-256 of the site password.
    pub password_sha256: String,
    /// Lifetime of the session cookie, in seconds.
    pub session_max_age_secs: u64,
    /// Add the `Secure` attribute to the session cookie.
    pub secure_cookies: bool,
    /// Require an upstream identity in addition to the site password.
    pub enable_auth: bool,
    /// Directory holding static assets (the process-guide CSV lives under `data/`).
    pub asset_dir: PathBuf,
    /// SQLite audit database. In-memory when unset.
    pub audit_db_path: Option<PathBuf>,
    /// Recipient of new-user notifications.
    pub admin_email: String,
    /// Sender used on outbound notifications.
    pub from_email: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".into(),
            port: 3000,
            password_sha256: DEFAULT_PASSWORD_SHA256.into(),
            session_max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
            secure_cookies: false,
            enable_auth: false,
            asset_dir: PathBuf::from("assets"),
            audit_db_path: None,
            admin_email: "ehr-admin@example.com".into(),
            from_email: "EHR Access <no-reply@example.com>".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Apply per-setting overrides. `lookup` maps a variable name to its value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("EHRDASH_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| EhrDashError::Config(format!("EHRDASH_PORT is not a port: {port}")))?;
        }
        if let Some(addr) = lookup("EHRDASH_BIND") {
            self.bind_address = addr;
        }
        if let Some(password) = lookup("EHRDASH_PASSWORD") {
            if password.is_empty() {
                return Err(EhrDashError::Config("EHRDASH_PASSWORD is empty".into()));
            }
            self.password_sha256 = sha256_hex(password.as_bytes());
        }
        if let Some(flag) = lookup("ENABLE_AUTH") {
            self.enable_auth = flag == "true";
        }
        if let Some(flag) = lookup("EHRDASH_SECURE_COOKIES") {
            self.secure_cookies = flag == "true";
        }
        if let Some(dir) = lookup("EHRDASH_ASSET_DIR") {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("EHRDASH_AUDIT_DB") {
            self.audit_db_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Path of the process-guide CSV asset.
    pub fn guides_csv_path(&self) -> PathBuf {
        self.asset_dir.join("data").join(crate::types::GUIDES_CSV_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_stock_password() {
        let config = AppConfig::default();
        assert_eq!(config.password_sha256, sha256_hex(b"ehrdashboard25"));
        assert_eq!(config.session_max_age_secs, 43_200);
        assert!(!config.enable_auth);
    }

    #[test]
    fn overrides_replace_fields() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("EHRDASH_PORT", "8080"),
                ("EHRDASH_PASSWORD", "hunter2"),
                ("ENABLE_AUTH", "true"),
                ("EHRDASH_ASSET_DIR", "/srv/ehr"),
            ]))
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.password_sha256, sha256_hex(b"hunter2"));
        assert!(config.enable_auth);
        assert_eq!(
            config.guides_csv_path(),
            PathBuf::from("/srv/ehr/data/ehr_process_guides_data.csv")
        );
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("EHRDASH_PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, EhrDashError::Config(_)));
    }

    #[test]
    fn enable_auth_requires_literal_true() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[("ENABLE_AUTH", "yes")]))
            .unwrap();
        assert!(!config.enable_auth);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ehrdash.json");
        std::fs::write(&path, r#"{ "port": 4100, "secure_cookies": true }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 4100);
        assert!(config.secure_cookies);
        assert_eq!(config.bind_address, "127.0.0.1");
    }
}
