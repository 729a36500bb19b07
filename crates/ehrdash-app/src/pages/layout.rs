// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sidebar layout wrapping every gated page.

use dioxus::prelude::*;

/// Sidebar entries: path and label.
pub const NAV_ITEMS: [(&str, &str); 9] = [
    ("/", "Dashboard"),
    ("/credentials", "EHR Credentials"),
    ("/requests", "EHR Requests"),
    ("/revocations", "EHR Revocations"),
    ("/issues", "EHR Issues"),
    ("/team", "EHR Team"),
    ("/portal", "Coordinator Portal"),
    ("/qa-okta", "QA Okta Assignment"),
    ("/process-docs", "Process Documentation"),
];

#[component]
pub fn Layout(active: &'static str, children: Element) -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; min-height: 100vh;",

            nav { class: "sidebar",
                style: "width: 230px; flex-shrink: 0; padding: 20px 12px; background: #0f172a; color: #e2e8f0;",
                p { style: "margin: 0 8px 20px; font-size: 18px; font-weight: 700;", "EHR Dashboard" }
                for (path, label) in NAV_ITEMS {
                    NavItem { to: path, label: label, active: path == active }
                }
            }

            main { class: "page-content",
                style: "flex: 1; padding: 24px 32px; overflow-x: auto;",
                {children}
            }
        }
    }
}

#[component]
fn NavItem(to: &'static str, label: &'static str, active: bool) -> Element {
    let background = if active { "#1e293b" } else { "transparent" };
    rsx! {
        a { href: to,
            style: "display: block; padding: 8px 12px; margin: 2px 0; border-radius: 6px; color: inherit; text-decoration: none; font-size: 14px; background: {background};",
            "{label}"
        }
    }
}
