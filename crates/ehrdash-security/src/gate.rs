// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Site password gate.
//
// The gate checks a JSON body of the form `{"password": "..."}` against the
// configured SHA-256 digest. Anything other than a matching, non-empty string
// (unparseable body, non-object, missing or non-string field) is a denial.

use ehrdash_core::config::AppConfig;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::integrity::verify_hash;

/// Message returned with every denial.
pub const DENIED_MESSAGE: &str = "Incorrect password.";

/// Result of a password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    Denied,
}

impl GateOutcome {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }

    /// HTTP status code for the response.
    pub fn status(self) -> u16 {
        match self {
            Self::Granted => 200,
            Self::Denied => 401,
        }
    }

    /// JSON response body.
    pub fn body(self) -> Value {
        match self {
            Self::Granted => json!({ "ok": true }),
            Self::Denied => json!({ "message": DENIED_MESSAGE }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PasswordGate {
    password_sha256: String,
}

impl PasswordGate {
    pub fn new(password_sha256: impl Into<String>) -> Self {
        Self {
            password_sha256: password_sha256.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.password_sha256.clone())
    }

    /// Whether `input` is the site password.
    pub fn check_password(&self, input: &str) -> bool {
        !input.is_empty() && verify_hash(input.as_bytes(), &self.password_sha256)
    }

    /// Check a raw request body.
    pub fn check(&self, body: &[u8]) -> GateOutcome {
        let parsed: Value = serde_json::from_slice(body).unwrap_or_else(|e| {
            debug!(error = %e, "password body is not JSON; treating as empty");
            json!({})
        });

        let granted = parsed
            .get("password")
            .and_then(Value::as_str)
            .is_some_and(|input| self.check_password(input));

        if granted {
            debug!("site password accepted");
            GateOutcome::Granted
        } else {
            warn!("site password rejected");
            GateOutcome::Denied
        }
    }
}
