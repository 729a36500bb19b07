// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ehrdash-security: Access control for the EHR dashboard.
//
// The site password gate and its session cookie, the per-request access
// policy (password cookie plus optional upstream identity), SHA-256 helpers,
// the SQLite audit trail, and the admin notifier for new pending users.

pub mod access;
pub mod audit;
pub mod gate;
pub mod integrity;
pub mod notify;
pub mod session;

pub use access::{AccessDecision, AccessPolicy, identity_from_headers};
pub use audit::{AuditEntry, AuditLog};
pub use gate::{GateOutcome, PasswordGate};
pub use integrity::{hash_bytes, verify_hash};
pub use notify::{AdminMessage, AdminNotifier, LogNotifier};
pub use session::{SessionCookie, has_session};
