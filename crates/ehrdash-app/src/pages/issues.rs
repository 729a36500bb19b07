// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EHR Issues page: troubleshooting and reactivation work.

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, MetricGrid, PageHeader, searchable_model, series_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

pub fn render(query: PageQuery) -> String {
    render_document("EHR Issues", issues, PageProps { query })
}

fn issues(props: PageProps) -> Element {
    let page = &props.query;
    let weekly = series_model(
        "weekly",
        &[("week", "Week"), ("open", "Open Issues")],
        samples::weekly_issues(),
        page,
    );
    let list = searchable_model(
        "issues",
        &[
            ("issueId", "Issue ID"),
            ("account", "Account"),
            ("mdsName", "MDS Name"),
            ("issueType", "Issue Type"),
            ("status", "Status"),
            ("daysOpen", "Days Open"),
            ("priority", "Priority"),
        ],
        samples::issues(),
        page,
    );

    rsx! {
        Layout { active: "/issues",
            PageHeader { title: "EHR Issues", subtitle: "Track EHR troubleshooting and reactivation issues" }
            MetricGrid { tiles: samples::issues_metrics() }
            ChartCard { title: "Open EHR Issue Tasks by Week",
                DataTableView { model: weekly }
            }
            ChartCard { title: "EHR Issues List",
                DataTableView { model: list }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_sort_by_days_open() {
        let html = render(PageQuery::new("/issues", "issues_sort=daysOpen&issues_dir=asc"));
        let first = html.find("EHR-002").unwrap();
        let second = html.find("EHR-001").unwrap();
        assert!(first < second);
    }
}
