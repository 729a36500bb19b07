// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QA Okta Assignment page: app assignment validation and credential ratios.

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, PageHeader, searchable_model, series_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

pub fn render(query: PageQuery) -> String {
    render_document("QA Okta Assignment", qa_okta, PageProps { query })
}

fn qa_okta(props: PageProps) -> Element {
    let page = &props.query;
    let validation = searchable_model(
        "apps",
        &[
            ("account", "Account Name"),
            ("oktaAppName", "Okta App Name"),
            ("oktaAppStatus", "Okta App Status"),
            ("ehrProcessGuide", "EHR Process Guide"),
            ("ehrProcessGuideStatus", "Process Guide Status"),
            ("clinicians", "# Clinicians"),
            ("ehrCredUsers", "# EHR Cred Users"),
            ("ratio", "Ratio"),
            ("issues", "Issues"),
        ],
        samples::okta_app_validation(),
        page,
    );
    let ratios = series_model(
        "ratios",
        &[("account", "Account"), ("ratio", "Credentialed (%)")],
        samples::credential_ratios(),
        page,
    );
    let mismatches = searchable_model(
        "mismatches",
        &[
            ("mdsName", "MDS Name"),
            ("account", "Account"),
            ("revocationTask", "Revocation Task"),
            ("revocationStatus", "Revocation Status"),
            ("oktaAppStatus", "Okta App Status"),
            ("daysSinceRevocation", "Days Since Revocation"),
        ],
        samples::revocation_mismatches(),
        page,
    );
    let inactive = searchable_model(
        "inactive",
        &[
            ("account", "Account Name"),
            ("oktaAppStatus", "Okta App Status"),
            ("activeClinicians", "Active Clinicians"),
            ("assignedUsers", "Assigned Users"),
            ("lastActivity", "Last Activity"),
        ],
        samples::inactive_okta_accounts(),
        page,
    );

    rsx! {
        Layout { active: "/qa-okta",
            PageHeader {
                title: "QA Okta App Assignment",
                subtitle: "Validate EHR app assignments and credential ratios",
            }
            ChartCard {
                title: "Active Accounts - Okta App & Process Guide Validation",
                subtitle: "Identify missing or mismatched Okta EHR apps and process guides",
                DataTableView { model: validation }
            }
            ChartCard { title: "Ratio of Current Clinicians : EHR Credentialed Users",
                DataTableView { model: ratios }
            }
            ChartCard {
                title: "Revocation Task Mismatches",
                subtitle: "Revocation tasks created but EHR app still assigned in Okta",
                DataTableView { model: mismatches }
            }
            ChartCard {
                title: "Inactive Accounts with Active Okta Apps",
                subtitle: "Accounts with no active clinicians but EHR app still active and assigned",
                DataTableView { model: inactive }
            }
        }
    }
}
