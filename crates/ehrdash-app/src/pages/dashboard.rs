// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dashboard page: headline metrics, the accounts table with drilldown, Okta
// app and process-guide reconciliation, and the weekly request series.

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;

use ehrdash_core::types::Row;
use ehrdash_data::DataTable;
use ehrdash_data::samples;

use super::PageProps;
use super::components::{
    ChartCard, DataTableView, MetricGrid, PageHeader, TableModel, restore_table, searchable_model,
    series_model, sortable_columns,
};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;

const ACCOUNTS: &str = "accounts";

const ACCOUNT_COLUMNS: [(&str, &str); 6] = [
    ("account", "Account Name"),
    ("clinicians", "# Active Clinicians"),
    ("ehrCredentials", "# EHR Credentials"),
    ("status", "Customer Status"),
    ("product", "Product"),
    ("avgTAT", "Avg TAT (Days)"),
];

pub fn render(query: PageQuery) -> String {
    render_document("Dashboard", dashboard, PageProps { query })
}

/// The accounts table, plus the account picked by a replayed row click.
fn accounts_with_drilldown(page: &PageQuery) -> (TableModel, Option<Row>) {
    let picked: Arc<Mutex<Option<Row>>> = Arc::default();
    let sink = Arc::clone(&picked);
    let table = DataTable::new(sortable_columns(&ACCOUNT_COLUMNS), samples::accounts())
        .searchable()
        .on_row_click(move |row| {
            *sink.lock().unwrap_or_else(|e| e.into_inner()) = Some(row.clone());
        });
    let table = restore_table(ACCOUNTS, table, page);
    let model = TableModel::build(ACCOUNTS, &table, page);
    let selected = picked.lock().unwrap_or_else(|e| e.into_inner()).take();
    (model, selected)
}

fn dashboard(props: PageProps) -> Element {
    let page = &props.query;
    let (accounts, selected) = accounts_with_drilldown(page);
    let close_href = page.href_with(&[("accounts_row", None)]);

    let active = searchable_model(
        "active",
        &[
            ("account", "Account Name"),
            ("oktaAppName", "Okta EHR App Name"),
            ("ehrProcessGuide", "EHR Process Guide"),
            ("status", "Status"),
        ],
        samples::active_accounts(),
        page,
    );
    let inactive = searchable_model(
        "inactive",
        &[
            ("account", "Account Name"),
            ("oktaAppName", "Okta EHR App Name"),
            ("ehrProcessGuide", "EHR Process Guide"),
            ("oktaAppActive", "Okta App Active"),
            ("processGuideActive", "Process Guide Active"),
        ],
        samples::inactive_accounts(),
        page,
    );
    let weekly = series_model(
        "weekly",
        &[("week", "Week"), ("open", "Open Requests"), ("closed", "Closed Requests")],
        samples::weekly_requests(),
        page,
    );
    let providers = series_model(
        "providers",
        &[("provider", "Service Provider"), ("requests", "Open Requests")],
        samples::requests_by_provider(),
        page,
    );

    rsx! {
        Layout { active: "/",
            PageHeader {
                title: "EHR Dashboard",
                subtitle: "Overview of Electronic Health Record credentials and requests",
            }
            MetricGrid { tiles: samples::dashboard_metrics() }
            ChartCard {
                title: "Active Clinicians by Account",
                subtitle: "Number of active clinicians with EHR credentials - Click to drill down",
                DataTableView { model: accounts }
            }
            if let Some(ref account) = selected {
                AccountDrilldown { account: account.clone(), close_href: close_href.clone() }
            }
            ChartCard {
                title: "Active Accounts - Okta App & Process Guide",
                subtitle: "Identify missing or mismatched names",
                DataTableView { model: active }
            }
            ChartCard {
                title: "Inactive Accounts - Okta App & Process Guide",
                subtitle: "Check if apps/guides are still active",
                DataTableView { model: inactive }
            }
            ChartCard { title: "Open EHR Requests by Week",
                DataTableView { model: weekly }
            }
            ChartCard { title: "Open Requests by Service Provider",
                DataTableView { model: providers }
            }
        }
    }
}

#[component]
fn AccountDrilldown(account: Row, close_href: String) -> Element {
    let name = account.text("account").to_owned();
    rsx! {
        ChartCard {
            title: "{name}",
            subtitle: "Account drilldown",
            dl { style: "display: grid; grid-template-columns: max-content 1fr; gap: 6px 16px; margin: 0;",
                for (key, label) in ACCOUNT_COLUMNS {
                    {
                        let value = account.get(key).to_string();
                        rsx! {
                            dt { style: "color: #64748b;", "{label}" }
                            dd { style: "margin: 0;", "{value}" }
                        }
                    }
                }
            }
            a { href: "{close_href}", style: "display: inline-block; margin-top: 12px; color: #2563eb;",
                "Close"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_click_fills_drilldown() {
        let page = PageQuery::new("/", "accounts_sort=clinicians&accounts_dir=desc&accounts_row=0");
        let (model, selected) = accounts_with_drilldown(&page);
        assert_eq!(model.rows.len(), 6);
        let selected = selected.unwrap();
        assert_eq!(selected.text("account"), "Regional Medical");
    }

    #[test]
    fn no_click_no_drilldown() {
        let (_, selected) = accounts_with_drilldown(&PageQuery::new("/", "accounts_q=metro"));
        assert!(selected.is_none());
    }

    #[test]
    fn page_renders_drilldown_panel() {
        let html = render(PageQuery::new("/", "accounts_row=1"));
        assert!(html.contains("EHR Dashboard"));
        assert!(html.contains("Account drilldown"));
        assert!(html.contains("City Hospital"));
        assert!(html.contains("Showing 6 of 6 results"));
    }
}
