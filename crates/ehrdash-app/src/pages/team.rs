// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EHR Team page: coordinator workload.

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, PageHeader, searchable_model, series_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

pub fn render(query: PageQuery) -> String {
    render_document("EHR Team", team, PageProps { query })
}

fn team(props: PageProps) -> Element {
    let page = &props.query;
    let by_assignee = series_model(
        "assignee",
        &[("assignee", "Assignee"), ("open", "Open Requests"), ("matrix", "Matrix Requests")],
        samples::requests_by_assignee(),
        page,
    );
    let closed = series_model(
        "closed",
        &[
            ("week", "Week"),
            ("coordinator1", "EHR Coordinator 1"),
            ("coordinator2", "EHR Coordinator 2"),
            ("coordinator3", "EHR Coordinator 3"),
            ("coordinator4", "EHR Coordinator 4"),
        ],
        samples::closed_by_week(),
        page,
    );
    let actions = searchable_model(
        "tasks",
        &[
            ("taskId", "Task ID"),
            ("assignee", "Assignee"),
            ("account", "Account"),
            ("firstNotification", "First Notification"),
            ("credentialsReceived", "Credentials Received"),
            ("taskClosed", "Task Closed"),
            ("timeToClose", "Time to Close (Days)"),
        ],
        samples::task_actions(),
        page,
    );

    rsx! {
        Layout { active: "/team",
            PageHeader { title: "EHR Team", subtitle: "Track EHR coordinator workload and performance" }
            ChartCard { title: "Open EHR Request Tasks by Assignee",
                DataTableView { model: by_assignee }
            }
            ChartCard { title: "EHR Request Tasks Closed by Assignee (Weekly)",
                DataTableView { model: closed }
            }
            ChartCard {
                title: "Task Actions Timeline",
                subtitle: "Track actions taken on tasks by EHR coordinators",
                DataTableView { model: actions }
            }
        }
    }
}
