// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinator Portal: intake inbox, request and revocation queues, and
// follow-up reminders.

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, MetricGrid, PageHeader, searchable_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

const QUEUE_COLUMNS: [(&str, &str); 7] = [
    ("taskId", "Task ID"),
    ("account", "Account"),
    ("mdsName", "MDS Name"),
    ("ehrSystem", "EHR System"),
    ("status", "Status"),
    ("assignee", "Assignee"),
    ("daysInStatus", "Days in Status"),
];

pub fn render(query: PageQuery) -> String {
    render_document("Coordinator Portal", portal, PageProps { query })
}

fn portal(props: PageProps) -> Element {
    let page = &props.query;
    let inbox = searchable_model(
        "inbox",
        &[
            ("receivedAt", "Received"),
            ("subject", "Subject"),
            ("requester", "Requester"),
            ("type", "Type"),
            ("status", "Status"),
            ("daysOpen", "Days Open"),
        ],
        samples::inbox(),
        page,
    );
    let requests = searchable_model("requests", &QUEUE_COLUMNS, samples::request_queue(), page);
    let revocations = searchable_model("revocations", &QUEUE_COLUMNS, samples::revocation_queue(), page);
    let reminders = searchable_model(
        "reminders",
        &[
            ("reminderId", "Reminder ID"),
            ("type", "Type"),
            ("subject", "Subject"),
            ("owner", "Owner"),
            ("lastAction", "Last Action"),
            ("status", "Status"),
            ("daysSinceLastAction", "Days Since Action"),
        ],
        samples::reminders(),
        page,
    );

    rsx! {
        Layout { active: "/portal",
            PageHeader {
                title: "EHR Coordinator Portal",
                subtitle: "Start new EHR requests or revocations, track inbox intake, and manage follow-ups.",
            }
            MetricGrid { tiles: samples::portal_metrics() }
            ChartCard { title: "Start a New Request",
                subtitle: "Kick off a new EHR request and sync to Okta assignments.",
                p { style: "margin: 0; color: #64748b; font-size: 12px;",
                    "Integration placeholder: connect to Okta and ClickUp to create tasks automatically."
                }
            }
            ChartCard { title: "Coordinator Inbox (EHR Admin Email)",
                DataTableView { model: inbox }
            }
            ChartCard { title: "Active EHR Request Queue",
                DataTableView { model: requests }
            }
            ChartCard { title: "Active Revocation Queue",
                DataTableView { model: revocations }
            }
            ChartCard { title: "Follow-up Reminders & Internal Coordinator Messages",
                DataTableView { model: reminders }
            }
        }
    }
}
