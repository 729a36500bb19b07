// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use dioxus::prelude::*;

use ehrdash_data::samples;

use super::PageProps;
use super::components::{ChartCard, DataTableView, MetricGrid, PageHeader, series_model};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

pub fn render(query: PageQuery) -> String {
    render_document("EHR Revocations", revocations, PageProps { query })
}

fn revocations(props: PageProps) -> Element {
    let page = &props.query;
    let open = series_model(
        "open",
        &[("week", "Week"), ("open", "Open Revocations")],
        samples::weekly_revocations(),
        page,
    );
    let closed = series_model(
        "closed",
        &[("week", "Week"), ("closed", "Closed Revocations")],
        samples::weekly_revocations(),
        page,
    );

    rsx! {
        Layout { active: "/revocations",
            PageHeader { title: "EHR Revocations", subtitle: "Track EHR credential revocations" }
            MetricGrid { tiles: samples::revocations_metrics() }
            ChartCard { title: "Open EHR Revocations by Week",
                DataTableView { model: open }
            }
            ChartCard { title: "Closed EHR Revocations by Week",
                DataTableView { model: closed }
            }
        }
    }
}
