// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EHR Credentials page.

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, PageHeader, searchable_model, series_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

const CREDENTIALS: &str = "creds";

pub fn render(query: PageQuery) -> String {
    render_document("EHR Credentials", credentials, PageProps { query })
}

fn credentials(props: PageProps) -> Element {
    let page = &props.query;
    let status = series_model(
        "status",
        &[("name", "Status"), ("value", "Credentials")],
        samples::credential_status(),
        page,
    );
    let list = searchable_model(
        CREDENTIALS,
        &[
            ("mdsName", "MDS Name"),
            ("email", "Email"),
            ("healthSystem", "Health System EHR"),
            ("customer", "Customer"),
            ("expirationDate", "Expiration Date"),
            ("manager", "Manager"),
            ("status", "Status"),
        ],
        samples::credentials(),
        page,
    );
    // Quick actions pre-fill the credential list's search.
    let quick_actions = ["Active", "Expiring Soon", "Inactive"].map(|status| {
        (
            format!("View {status} Credentials"),
            page.href_with(&[("creds_q", Some(status)), ("creds_row", None)]),
        )
    });

    rsx! {
        Layout { active: "/credentials",
            PageHeader {
                title: "EHR Credential Dashboard",
                subtitle: "Track active, expiring, and inactive/historical credentials",
            }
            ChartCard { title: "Credential Status Overview",
                DataTableView { model: status }
            }
            ChartCard { title: "Quick Actions",
                ul { style: "margin: 0; padding-left: 18px; line-height: 1.8;",
                    for (label, href) in quick_actions.iter() {
                        li { a { href: "{href}", style: "color: #2563eb;", "{label}" } }
                    }
                    li { a { href: "/process-docs", style: "color: #2563eb;", "Link EHR Run Books/Library" } }
                }
            }
            ChartCard {
                title: "EHR Credentials List",
                subtitle: "MDS Name, email, health system EHR serves, customer serves, expected expiration date, manager",
                DataTableView { model: list }
            }
        }
    }
}
