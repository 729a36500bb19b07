// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-request access policy.
//
// Two layers, evaluated in order:
//   1. Site password: without `site_auth=true`, everything except the
//      password page and endpoint redirects to `/password`.
//   2. Identity (only when `enable_auth` is set): no identity redirects to
//      `/auth/signin`; a pending identity redirects to `/auth/pending`.
//
// Paths under `/api/auth` and `/favicon.ico` skip the policy entirely.

use ehrdash_core::types::{Identity, IdentityStatus};
use tracing::debug;

pub const PASSWORD_PAGE: &str = "/password";
pub const SIGNIN_PAGE: &str = "/auth/signin";
pub const PENDING_PAGE: &str = "/auth/pending";

/// Header carrying the signed-in user's email.
pub const USER_HEADER: &str = "x-auth-user";
/// Header carrying the signed-in user's display name.
pub const NAME_HEADER: &str = "x-auth-name";
/// Header carrying the identity status (`PENDING`, `APPROVED`, `DENIED`).
pub const STATUS_HEADER: &str = "x-auth-status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy {
    pub enable_auth: bool,
}

impl AccessPolicy {
    pub fn new(enable_auth: bool) -> Self {
        Self { enable_auth }
    }

    /// Paths served without consulting the policy.
    pub fn bypasses(path: &str) -> bool {
        path.starts_with("/api/auth") || path.starts_with("/favicon.ico")
    }

    pub fn evaluate(
        &self,
        path: &str,
        has_session: bool,
        identity: Option<&Identity>,
    ) -> AccessDecision {
        if Self::bypasses(path) {
            return AccessDecision::Allow;
        }

        let is_password_route = path.starts_with(PASSWORD_PAGE) || path.starts_with("/api/password");
        if !has_session && !is_password_route {
            debug!(path, "no session cookie");
            return AccessDecision::Redirect(PASSWORD_PAGE);
        }

        if self.enable_auth {
            let is_auth_route = path.starts_with(SIGNIN_PAGE) || path.starts_with(PENDING_PAGE);
            match identity {
                None if !is_auth_route => {
                    debug!(path, "no identity");
                    return AccessDecision::Redirect(SIGNIN_PAGE);
                }
                Some(id) if id.status == IdentityStatus::Pending && !path.starts_with(PENDING_PAGE) => {
                    debug!(path, email = %id.email, "identity pending approval");
                    return AccessDecision::Redirect(PENDING_PAGE);
                }
                _ => {}
            }
        }

        AccessDecision::Allow
    }
}

/// Read the identity forwarded by the upstream proxy.
///
/// Requires a non-empty user header. A missing or unrecognised status is
/// treated as pending.
pub fn identity_from_headers<'a>(header: impl Fn(&str) -> Option<&'a str>) -> Option<Identity> {
    let email = header(USER_HEADER).map(str::trim).filter(|e| !e.is_empty())?;
    let status = header(STATUS_HEADER)
        .and_then(|s| s.parse().ok())
        .unwrap_or(IdentityStatus::Pending);
    Some(Identity {
        email: email.to_owned(),
        name: header(NAME_HEADER)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned),
        status,
    })
}
