// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `site_auth` session cookie.

use ehrdash_core::config::AppConfig;
use ehrdash_core::types::SESSION_COOKIE;

/// Attributes of the cookie issued on a successful password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie {
    pub max_age_secs: u64,
    pub secure: bool,
}

impl SessionCookie {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_age_secs: config.session_max_age_secs,
            secure: config.secure_cookies,
        }
    }

    /// Value of the `Set-Cookie` response header.
    pub fn set_cookie_header(&self) -> String {
        let mut header = format!(
            "{SESSION_COOKIE}=true; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.max_age_secs
        );
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Value of cookie `name` in a `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k.trim() == name).then(|| v.trim())
    })
}

/// Whether the request's `Cookie` header carries `site_auth=true`.
pub fn has_session(cookie_header: Option<&str>) -> bool {
    cookie_header
        .and_then(|h| cookie_value(h, SESSION_COOKIE))
        .is_some_and(|v| v == "true")
}
