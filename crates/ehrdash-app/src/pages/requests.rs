// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EHR Requests page.

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, MetricGrid, PageHeader, searchable_model, series_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

pub fn render(query: PageQuery) -> String {
    render_document("EHR Requests", requests, PageProps { query })
}

fn requests(props: PageProps) -> Element {
    let page = &props.query;
    let open = series_model(
        "open",
        &[("week", "Week"), ("open", "Open Requests"), ("matrix", "Matrix Requests")],
        samples::weekly_open_requests(),
        page,
    );
    let closed = series_model(
        "closed",
        &[("week", "Week"), ("closed", "Closed Requests"), ("matrixClosed", "Matrix Closed")],
        samples::weekly_closed_requests(),
        page,
    );
    let by_account = searchable_model(
        "accounts",
        &[
            ("account", "Account Name"),
            ("open", "Open Requests"),
            ("matrix", "Matrix Requests"),
        ],
        samples::requests_by_account(),
        page,
    );
    let by_status = series_model(
        "status",
        &[("status", "Task Status"), ("count", "Requests")],
        samples::requests_by_status(),
        page,
    );
    let by_ehr_status = series_model(
        "ehr_status",
        &[("status", "EHR Current Status"), ("count", "Requests")],
        samples::requests_by_ehr_status(),
        page,
    );
    let inactive = searchable_model(
        "inactive",
        &[
            ("name", "Employee Name"),
            ("account", "Account"),
            ("status", "Request Status"),
            ("daysOpen", "Days Open"),
            ("employeeStatus", "Employee Status"),
        ],
        samples::inactive_employee_requests(),
        page,
    );

    rsx! {
        Layout { active: "/requests",
            PageHeader { title: "EHR Requests", subtitle: "Track and manage EHR credential requests" }
            MetricGrid { tiles: samples::requests_metrics() }
            ChartCard { title: "Open EHR Requests by Week",
                DataTableView { model: open }
            }
            ChartCard { title: "Closed EHR Requests by Week",
                DataTableView { model: closed }
            }
            ChartCard { title: "Open EHR Requests by Account",
                DataTableView { model: by_account }
            }
            ChartCard { title: "Open Requests by Task Status",
                DataTableView { model: by_status }
            }
            ChartCard { title: "Open Requests by EHR Current Status",
                DataTableView { model: by_ehr_status }
            }
            ChartCard {
                title: "EHR Requests for Inactive/Resigned Employees",
                subtitle: "Requests that need attention for employees no longer active",
                DataTableView { model: inactive }
            }
        }
    }
}
