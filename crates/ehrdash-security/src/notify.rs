// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Admin notification for users waiting on approval.
//
// Delivery is behind the `AdminNotifier` trait. The shipped `LogNotifier`
// composes the message and writes it to the log; mail transport is plugged
// in by implementing the trait.

use ehrdash_core::config::AppConfig;
use ehrdash_core::error::Result;
use ehrdash_core::types::Identity;
use tracing::info;

/// A composed admin email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl AdminMessage {
    /// The "new user pending approval" message for `user`.
    pub fn new_user(from: &str, to: &str, user: &Identity) -> Self {
        let name = user.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("New User");
        let email = Some(user.email.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or("Unknown email");
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            subject: format!("New User Signup: {name}"),
            text: format!(
                "A new user signed in and is pending approval.\n\nName: {name}\nEmail: {email}\n\nThey are waiting for access approval."
            ),
        }
    }
}

/// Sends admin notifications.
pub trait AdminNotifier: Send + Sync {
    /// Tell the admin that `user` is waiting for approval.
    fn notify_new_user(&self, user: &Identity) -> Result<()>;
}

/// Notifier that writes composed messages to the log.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    from: String,
    to: String,
}

impl LogNotifier {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.from_email.clone(), config.admin_email.clone())
    }
}

impl AdminNotifier for LogNotifier {
    fn notify_new_user(&self, user: &Identity) -> Result<()> {
        let message = AdminMessage::new_user(&self.from, &self.to, user);
        info!(
            to = %message.to,
            subject = %message.subject,
            "admin notification (no mail transport configured)"
        );
        Ok(())
    }
}
