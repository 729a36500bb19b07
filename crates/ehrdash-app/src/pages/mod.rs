// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use dioxus::prelude::*;

use crate::http::PageQuery;

pub mod auth;
pub mod components;
pub mod credentials;
pub mod dashboard;
pub mod issues;
pub mod layout;
pub mod password;
pub mod portal;
pub mod process_docs;
pub mod qa_okta;
pub mod requests;
pub mod revocations;
pub mod team;

/// Props for pages whose content depends only on the query string.
#[derive(Props, Clone, PartialEq)]
pub struct PageProps {
    pub query: PageQuery,
}
