// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer shared by every connection task.
//
// The rusqlite-backed `AuditLog` is `Send` but not `Sync`, so it sits behind
// `Arc<Mutex<>>`. Auditing only happens when `audit_db_path` is configured.
// Audit writes are best-effort: a failure is logged and the request carries on.

use std::collections::{HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use ehrdash_core::AppConfig;
use ehrdash_core::error::Result;
use ehrdash_core::types::{Identity, IdentityStatus};
use ehrdash_data::GuideCatalog;
use ehrdash_security::audit::{AuditEntry, AuditLog};
use ehrdash_security::{
    AccessDecision, AccessPolicy, AdminNotifier, GateOutcome, LogNotifier, PasswordGate,
    SessionCookie, has_session,
};
use tracing::{debug, info, warn};

/// Number of pending emails remembered for notification de-duplication.
pub const MAX_TRACKED_PENDING: usize = 1024;

/// Insertion-ordered set that forgets its oldest entry once full.
#[derive(Debug)]
struct RecentSet {
    members: HashSet<String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl RecentSet {
    fn new(capacity: usize) -> Self {
        Self {
            members: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns `true` if `key` was not already present.
    fn insert(&mut self, key: &str) -> bool {
        if self.members.contains(key) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        self.members.insert(key.to_owned());
        self.order.push_back(key.to_owned());
        true
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.order.len()
    }
}

#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    gate: PasswordGate,
    cookie: SessionCookie,
    policy: AccessPolicy,
    audit_log: Option<Arc<Mutex<AuditLog>>>,
    notifier: Arc<dyn AdminNotifier>,
    /// Pending users the admin has already been told about.
    notified_pending: Arc<Mutex<RecentSet>>,
}

impl AppServices {
    /// Build services from `config`, opening the audit database if one is
    /// configured.
    pub fn init(config: AppConfig) -> Result<Self> {
        let audit_log = match config.audit_db_path {
            Some(ref path) => {
                info!(path = %path.display(), "opening audit database");
                Some(AuditLog::open(path)?)
            }
            None => {
                debug!("no audit database configured, auditing disabled");
                None
            }
        };
        let notifier = Arc::new(LogNotifier::from_config(&config));
        Ok(Self::with_parts(config, audit_log, notifier))
    }

    /// Services that keep no audit trail, used when the configured database
    /// cannot be opened.
    pub fn without_audit(config: AppConfig) -> Self {
        let notifier = Arc::new(LogNotifier::from_config(&config));
        Self::with_parts(config, None, notifier)
    }

    pub fn with_parts(
        config: AppConfig,
        audit_log: Option<AuditLog>,
        notifier: Arc<dyn AdminNotifier>,
    ) -> Self {
        Self {
            gate: PasswordGate::from_config(&config),
            cookie: SessionCookie::from_config(&config),
            policy: AccessPolicy::new(config.enable_auth),
            config: Arc::new(config),
            audit_log: audit_log.map(|log| Arc::new(Mutex::new(log))),
            notifier,
            notified_pending: Arc::new(Mutex::new(RecentSet::new(MAX_TRACKED_PENDING))),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -- Access ----------------------------------------------------------------

    /// Check a password-gate request body, auditing the attempt.
    pub fn check_password(&self, body: &[u8], peer: SocketAddr) -> GateOutcome {
        let outcome = self.gate.check(body);
        self.audit(
            "password",
            &peer.ip().to_string(),
            outcome.is_granted(),
            None,
        );
        outcome
    }

    /// `Set-Cookie` value issued on a granted password check.
    pub fn session_cookie_header(&self) -> String {
        self.cookie.set_cookie_header()
    }

    /// Run the access policy for a request. Redirects are audited.
    pub fn authorize(
        &self,
        path: &str,
        cookie_header: Option<&str>,
        identity: Option<&Identity>,
    ) -> AccessDecision {
        if self.policy.enable_auth {
            if let Some(id) = identity {
                self.note_identity(id);
            }
        }
        let decision = self.policy.evaluate(path, has_session(cookie_header), identity);
        if let AccessDecision::Redirect(to) = decision {
            self.audit("redirect", path, false, Some(to));
        }
        decision
    }

    /// Notify the admin the first time a pending identity is seen.
    fn note_identity(&self, identity: &Identity) {
        if identity.status != IdentityStatus::Pending {
            return;
        }
        let first_seen = self
            .notified_pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(&identity.email);
        if !first_seen {
            return;
        }
        info!(email = %identity.email, "new user pending approval");
        let sent = self.notifier.notify_new_user(identity);
        if let Err(ref e) = sent {
            warn!(email = %identity.email, error = %e, "admin notification failed");
        }
        self.audit("pending_user", &identity.email, sent.is_ok(), None);
    }

    fn audit(&self, action: &str, subject: &str, success: bool, details: Option<&str>) {
        let Some(ref audit_log) = self.audit_log else {
            return;
        };
        let log = audit_log.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = log.record(action, subject, success, details) {
            warn!(error = %e, action, "audit write failed");
        }
    }

    /// Most recent audit entries, newest first. Empty when auditing is off.
    pub fn recent_audit(&self, limit: u32) -> Result<Vec<AuditEntry>> {
        match self.audit_log {
            Some(ref log) => log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .recent_entries(limit),
            None => Ok(Vec::new()),
        }
    }

    // -- Data ------------------------------------------------------------------

    /// Raw text of the process-guide CSV asset.
    pub async fn read_guides_csv(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.config.guides_csv_path()).await?)
    }

    /// Load the process-guide catalog. A missing or unreadable asset yields
    /// an empty catalog.
    pub async fn load_guides(&self) -> GuideCatalog {
        match self.read_guides_csv().await {
            Ok(text) => GuideCatalog::from_csv(&text),
            Err(e) => {
                warn!(
                    path = %self.config.guides_csv_path().display(),
                    error = %e,
                    "process guides unavailable"
                );
                GuideCatalog::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehrdash_core::error::EhrDashError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotifier(AtomicUsize);

    impl AdminNotifier for CountingNotifier {
        fn notify_new_user(&self, _user: &Identity) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingNotifier;

    impl AdminNotifier for FailingNotifier {
        fn notify_new_user(&self, _user: &Identity) -> Result<()> {
            Err(EhrDashError::Notify("smtp down".into()))
        }
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:5000".parse().unwrap()
    }

    fn pending(email: &str) -> Identity {
        Identity {
            email: email.into(),
            name: None,
            status: IdentityStatus::Pending,
        }
    }

    fn services_with(notifier: Arc<dyn AdminNotifier>, enable_auth: bool) -> AppServices {
        let config = AppConfig {
            enable_auth,
            ..AppConfig::default()
        };
        AppServices::with_parts(config, Some(AuditLog::open_in_memory().unwrap()), notifier)
    }

    #[test]
    fn password_attempts_are_audited() {
        let svc = services_with(Arc::new(CountingNotifier(AtomicUsize::new(0))), false);
        assert!(svc.check_password(br#"{"password":"ehrdashboard25"}"#, peer()).is_granted());
        assert!(!svc.check_password(b"{}", peer()).is_granted());

        let entries = svc.recent_audit(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].success);
        assert!(entries[1].success);
        assert_eq!(entries[1].subject, "127.0.0.1");
    }

    #[test]
    fn pending_user_notified_once() {
        let notifier = Arc::new(CountingNotifier(AtomicUsize::new(0)));
        let svc = services_with(notifier.clone(), true);

        for _ in 0..3 {
            let decision = svc.authorize("/", Some("site_auth=true"), Some(&pending("a@x")));
            assert_eq!(decision, AccessDecision::Redirect("/auth/pending"));
        }
        svc.authorize("/", Some("site_auth=true"), Some(&pending("b@x")));
        assert_eq!(notifier.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn identities_ignored_without_auth() {
        let notifier = Arc::new(CountingNotifier(AtomicUsize::new(0)));
        let svc = services_with(notifier.clone(), false);
        let decision = svc.authorize("/", Some("site_auth=true"), Some(&pending("a@x")));
        assert_eq!(decision, AccessDecision::Allow);
        assert_eq!(notifier.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn notifier_failure_does_not_block() {
        let svc = services_with(Arc::new(FailingNotifier), true);
        let decision = svc.authorize("/auth/pending", Some("site_auth=true"), Some(&pending("a@x")));
        assert_eq!(decision, AccessDecision::Allow);
        let entries = svc.recent_audit(1).unwrap();
        assert_eq!(entries[0].action, "pending_user");
        assert!(!entries[0].success);
    }

    #[test]
    fn nothing_recorded_without_audit_database() {
        let svc = AppServices::init(AppConfig {
            enable_auth: true,
            audit_db_path: None,
            ..AppConfig::default()
        })
        .unwrap();
        for i in 0..50 {
            svc.check_password(b"{}", peer());
            svc.authorize("/", None, Some(&pending(&format!("u{i}@x"))));
        }
        assert!(svc.recent_audit(100).unwrap().is_empty());
    }

    #[test]
    fn audit_database_on_disk_is_used_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.db");
        let svc = AppServices::init(AppConfig {
            audit_db_path: Some(path.clone()),
            ..AppConfig::default()
        })
        .unwrap();
        svc.check_password(b"{}", peer());
        assert_eq!(svc.recent_audit(10).unwrap().len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn recent_set_evicts_oldest_when_full() {
        let mut seen = RecentSet::new(3);
        for key in ["a", "b", "c"] {
            assert!(seen.insert(key));
        }
        assert!(!seen.insert("a"));
        assert!(seen.insert("d"));
        assert_eq!(seen.len(), 3);
        // "a" was evicted, so it counts as new again.
        assert!(seen.insert("a"));
        assert!(!seen.insert("d"));
    }

    #[test]
    fn pending_tracking_stays_bounded() {
        let notifier = Arc::new(CountingNotifier(AtomicUsize::new(0)));
        let svc = services_with(notifier.clone(), true);
        let total = MAX_TRACKED_PENDING + 10;
        for i in 0..total {
            svc.authorize("/", Some("site_auth=true"), Some(&pending(&format!("u{i}@x"))));
        }
        assert_eq!(notifier.0.load(Ordering::SeqCst), total);
        let tracked = svc.notified_pending.lock().unwrap().len();
        assert_eq!(tracked, MAX_TRACKED_PENDING);
    }

    #[tokio::test]
    async fn missing_asset_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            asset_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let svc = AppServices::without_audit(config);
        assert!(svc.load_guides().await.is_empty());

        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            svc.config().guides_csv_path(),
            "account_name,ehr_type\nMemorial Health,Epic\n",
        )
        .unwrap();
        assert_eq!(svc.load_guides().await.len(), 1);
    }
}
