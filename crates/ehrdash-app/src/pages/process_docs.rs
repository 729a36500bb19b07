// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process Documentation page: the guide catalog loaded from the CSV asset,
// with filters, a guide overview table, guide details, a display-only edit
// form and the runbook.
//
// All page state lives in the query string as a `ViewState`. A click on a
// guide row is replayed through the table and becomes `Action::SelectGuide`.

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;

use ehrdash_core::types::{Row, TaskItem};
use ehrdash_data::guides::{self, GuideCatalog, NO_RUNBOOK_STEPS};
use ehrdash_data::table::{CellContent, Column, DataTable};

use super::components::{ChartCard, DataTableView, PageHeader, TableModel, restore_table, sortable_columns};
use super::layout::Layout;
use crate::http::PageQuery;
use crate::render::render_document;
use crate::state::{Action, PROCESS_DOCS_PATH, Tab, ViewState, reduce};

const GUIDES: &str = "guides";

const GUIDE_LIBRARY_URL: &str =
    "https://docs.google.com/spreadsheets/d/1b7nZ7wdNcPAOKtcydzdx7rvb77wuLTPzVU3kGXwxjuo/edit";

#[derive(Props, Clone, PartialEq)]
pub struct ProcessDocsProps {
    query: PageQuery,
    catalog: GuideCatalog,
}

pub fn render(query: PageQuery, catalog: GuideCatalog) -> String {
    render_document("Process Documentation", process_docs, ProcessDocsProps { query, catalog })
}

/// The guides table for `state`, and the state after any replayed row click.
fn guides_table(page: &PageQuery, catalog: &GuideCatalog, state: &ViewState) -> (TableModel, ViewState) {
    let link_state = state.clone();
    let mut columns = vec![Column::sortable("account_name", "Account Name").with_renderer(
        move |_, row| {
            let name = Some(row.text("account_name"))
                .filter(|n| !n.is_empty())
                .unwrap_or("Unknown");
            let id = guides::guide_id(row).to_owned();
            CellContent::link(name, link_state.href_after(Action::SelectGuide(id)))
        },
    )];
    columns.extend(sortable_columns(&[
        ("ehr_type", "EHR Type"),
        ("ehr_owner", "EHR Team Member"),
        ("edited_by", "Edited By"),
        ("edited_date", "Edited Date"),
        ("estimated_turnaround_time", "Est. TAT (Days)"),
        ("account_status", "Account Status"),
        ("enterprise", "Enterprise"),
    ]));
    columns.push(
        Column::sortable("wfh_allowed", "WFH Allowed")
            .with_renderer(|value, _| CellContent::text(guides::wfh_label(value.as_text().unwrap_or_default()))),
    );

    let clicked: Arc<Mutex<Option<String>>> = Arc::default();
    let sink = Arc::clone(&clicked);
    let table = DataTable::new(columns, catalog.filter(&state.filter)).on_row_click(move |row| {
        *sink.lock().unwrap_or_else(|e| e.into_inner()) = Some(guides::guide_id(row).to_owned());
    });
    let table = restore_table(GUIDES, table, page);
    let model = TableModel::build(GUIDES, &table, page);

    let next = match clicked.lock().unwrap_or_else(|e| e.into_inner()).take() {
        Some(id) => reduce(state, Action::SelectGuide(id)),
        None => state.clone(),
    };
    (model, next)
}

fn process_docs(props: ProcessDocsProps) -> Element {
    let page = &props.query;
    let catalog = &props.catalog;
    let (table, state) = guides_table(page, catalog, &ViewState::from_query(page));
    let selected = state
        .selected_guide
        .as_deref()
        .and_then(|id| catalog.find(id))
        .cloned();
    let metrics = catalog.metrics();
    let create_href = state.href_after(Action::CreateGuide);

    rsx! {
        Layout { active: PROCESS_DOCS_PATH,
            div { style: "display: flex; justify-content: space-between; align-items: flex-start;",
                PageHeader {
                    title: "EHR Process Documentation",
                    subtitle: "View and manage EHR process guides with searchable, connected data.",
                }
                a { href: "{create_href}",
                    style: "padding: 8px 14px; border-radius: 6px; background: #1d4ed8; color: white; text-decoration: none;",
                    "+ Create Guide"
                }
            }
            TabBar { state: state.clone() }
            div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-bottom: 24px;",
                StatTile { title: "Total Process Guides", value: metrics.total.to_string() }
                StatTile { title: "Avg Processing Time", value: metrics.avg_tat_label() }
                StatTile { title: "Active EHR Systems", value: metrics.ehr_systems.to_string() }
            }
            {
                match state.tab {
                    Tab::Overview => rsx! {
                        ChartCard { title: "EHR Process Guides",
                            GuideFilters {
                                state: state.clone(),
                                accounts: catalog.account_options(),
                                ehr_types: catalog.ehr_type_options(),
                                owners: catalog.owner_options(),
                                hidden: filter_form_hidden(page, &state),
                            }
                            DataTableView { model: table }
                        }
                    },
                    Tab::ViewGuide => rsx! { GuideDetails { guide: selected } },
                    Tab::EditGuide => rsx! {
                        GuideEditor { guide: selected, cancel_href: state.href_after(Action::SelectTab(Tab::Overview)) }
                    },
                    Tab::Runbook => rsx! { GuideRunbook { guide: selected } },
                }
            }
            section { style: "padding: 16px; background: white; border-radius: 8px; border: 1px solid #e5e7eb;",
                h3 { style: "margin: 0 0 12px;", "Quick Links" }
                a { href: GUIDE_LIBRARY_URL, target: "_blank", rel: "noopener noreferrer",
                    style: "color: #2563eb;",
                    "EHR Process Document Library (Google Sheets)"
                }
            }
        }
    }
}

/// Parameters the filter form must carry besides the filters themselves:
/// tab, selection and the guides table's sort.
fn filter_form_hidden(page: &PageQuery, state: &ViewState) -> Vec<(String, String)> {
    let mut hidden: Vec<(String, String)> = state
        .to_params()
        .into_iter()
        .filter(|(k, _)| matches!(*k, "tab" | "guide"))
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    hidden.extend(
        page.params
            .iter()
            .filter(|(k, _)| *k == "guides_sort" || *k == "guides_dir")
            .cloned(),
    );
    hidden
}

#[component]
fn TabBar(state: ViewState) -> Element {
    rsx! {
        nav { style: "display: flex; gap: 12px; margin-bottom: 24px;",
            for tab in Tab::ALL {
                {
                    let href = state.href_after(Action::SelectTab(tab));
                    let (bg, fg) = if tab == state.tab { ("#1d4ed8", "white") } else { ("white", "#475569") };
                    rsx! {
                        a { href: "{href}",
                            style: "padding: 8px 16px; border-radius: 6px; border: 1px solid #e2e8f0; text-decoration: none; font-size: 14px; background: {bg}; color: {fg};",
                            "{tab.label()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatTile(title: &'static str, value: String) -> Element {
    rsx! {
        div { style: "padding: 16px; background: white; border-radius: 8px; border: 1px solid #e5e7eb;",
            p { style: "margin: 0; color: #64748b; font-size: 13px;", "{title}" }
            p { style: "margin: 4px 0 0; font-size: 24px; font-weight: 700;", "{value}" }
        }
    }
}

#[component]
fn GuideFilters(
    state: ViewState,
    accounts: Vec<String>,
    ehr_types: Vec<String>,
    owners: Vec<String>,
    hidden: Vec<(String, String)>,
) -> Element {
    let clear_href = state.href_after(Action::ClearFilters);
    rsx! {
        form { method: "get", action: PROCESS_DOCS_PATH,
            style: "display: grid; grid-template-columns: repeat(4, 1fr) auto; gap: 12px; align-items: end; margin-bottom: 16px;",
            for (name, value) in hidden.iter() {
                input { r#type: "hidden", name: "{name}", value: "{value}" }
            }
            FilterSelect { label: "Account Name", name: "account", options: accounts, current: state.filter.account.clone() }
            FilterSelect { label: "EHR Type", name: "ehr_type", options: ehr_types, current: state.filter.ehr_type.clone() }
            FilterSelect { label: "EHR Team Member", name: "owner", options: owners, current: state.filter.owner.clone() }
            label { style: "display: flex; flex-direction: column; gap: 4px; font-size: 12px; font-weight: 600; color: #475569;",
                "Search"
                input { r#type: "text", name: "q", value: "{state.filter.search}",
                    placeholder: "Search account, type, or owner",
                    style: "padding: 6px 10px; border: 1px solid #cbd5e1; border-radius: 6px;",
                }
            }
            div { style: "display: flex; gap: 8px;",
                button { r#type: "submit",
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #1d4ed8; background: #1d4ed8; color: white;",
                    "Apply"
                }
                a { href: "{clear_href}",
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #cbd5e1; color: #475569; text-decoration: none;",
                    "Clear Filters"
                }
            }
        }
    }
}

#[component]
fn FilterSelect(label: &'static str, name: &'static str, options: Vec<String>, current: String) -> Element {
    rsx! {
        label { style: "display: flex; flex-direction: column; gap: 4px; font-size: 12px; font-weight: 600; color: #475569;",
            "{label}"
            select { name: name,
                style: "padding: 6px 10px; border: 1px solid #cbd5e1; border-radius: 6px;",
                option { value: "", "Select an option" }
                for opt in options.iter() {
                    option { value: "{opt}", selected: *opt == current, "{opt}" }
                }
            }
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[component]
fn GuideDetails(#[props(!optional)] guide: Option<Row>) -> Element {
    let Some(guide) = guide else {
        return rsx! {
            ChartCard {
                title: "View Guide",
                subtitle: "Click an account in the overview table to load guide details.",
                p { style: "color: #64748b;", "Select a guide from the overview tab to view details." }
            }
        };
    };

    let title = format!("View Guide: {}", guide.text("account_name"));
    let summary = [
        ("EHR Type", "ehr_type"),
        ("EHR Owner", "ehr_owner"),
        ("Edited Date", "edited_date"),
        ("Account Manager", "current_account_manager"),
        ("Helpdesk Number", "helpdesk_number"),
        ("Account Status", "account_status"),
    ]
    .map(|(label, key)| (label, or_dash(guide.text(key)).to_owned()));
    let sf_id = or_dash(Some(guide.text("account_sf_id"))
        .filter(|v| !v.is_empty())
        .unwrap_or(guide.text("sfdc_account_id")))
    .to_owned();
    let text = |key: &str| or_dash(guide.text(key)).to_owned();

    rsx! {
        ChartCard {
            title: "{title}",
            subtitle: "Click an account in the overview table to load guide details.",
            div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; margin-bottom: 16px;",
                for (label, value) in summary.iter() {
                    div {
                        p { style: "margin: 0; color: #94a3b8; font-size: 13px;", "{label}" }
                        p { style: "margin: 2px 0 0; font-weight: 500;", "{value}" }
                    }
                }
            }
            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;",
                DetailBlock { title: "Customer EHR POC",
                    lines: vec![text("customer_ehr_poc")],
                }
                DetailBlock { title: "Request / Revocation POC",
                    lines: vec![
                        format!("Request: {}", text("request_ehr_customer_poc")),
                        format!("Revocation: {}", text("revocation_ehr_customer_poc")),
                    ],
                }
                DetailBlock { title: "Access & Maintenance",
                    lines: vec![
                        format!("EHR URL: {}", text("ehr_url")),
                        format!("EHR Credential Maintenance: {}", text("ehr_cred_maintenance")),
                        format!("Limitations: {}", text("limitations_for_number_of_credentials")),
                        format!("WFH Allowed: {}", guides::wfh_allowed(guide.text("wfh_allowed"))),
                    ],
                }
                DetailBlock { title: "Account Details",
                    lines: vec![
                        format!("SFDC Account ID: {sf_id}"),
                        format!("Enterprise: {}", text("enterprise")),
                        format!("Service Provider Sites Blocked: {}", text("service_provider_sites_blocked")),
                        format!("Required EHR Forms: {}", text("required_ehr_forms")),
                    ],
                }
            }
        }
    }
}

#[component]
fn DetailBlock(title: &'static str, lines: Vec<String>) -> Element {
    rsx! {
        div { style: "padding: 12px; border: 1px solid #e5e7eb; border-radius: 8px;",
            h3 { style: "margin: 0; font-size: 14px; color: #1d4ed8;", "{title}" }
            for line in lines.iter() {
                p { style: "margin: 8px 0 0; font-size: 14px; white-space: pre-wrap;", "{line}" }
            }
        }
    }
}

/// Display-only guide form. Saving is not supported.
#[component]
fn GuideEditor(#[props(!optional)] guide: Option<Row>, cancel_href: String) -> Element {
    let title = match guide {
        Some(ref g) => format!("Edit Guide: {}", g.text("account_name")),
        None => "Create Guide".to_owned(),
    };
    let value = |key: &str| guide.as_ref().map(|g| g.text(key).to_owned()).unwrap_or_default();
    let header_fields = [
        ("EHR Process Guide Title", value("account_name"), "Enter value"),
        ("Created By", value("edited_by"), "Enter value"),
        ("Created Date", value("edited_date"), "MM DD, YYYY"),
        ("EHR Owner", value("ehr_owner"), "Enter value"),
    ];
    let demographics = [
        ("EHR Type", value("ehr_type"), "Enter value"),
        ("EHR URL", value("ehr_url"), "Enter value"),
        ("Estimated TAT (Days)", value("estimated_turnaround_time"), "Enter value"),
        ("Account Status", value("account_status"), "Enter value"),
    ];

    rsx! {
        ChartCard { title: "{title}",
            FieldGrid { fields: header_fields.to_vec() }
            h3 { style: "margin: 20px 0 8px; font-size: 14px; color: #1d4ed8;", "Demographics" }
            FieldGrid { fields: demographics.to_vec() }
            div { style: "display: flex; justify-content: flex-end; gap: 12px; margin-top: 20px;",
                a { href: "{cancel_href}",
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #cbd5e1; color: #475569; text-decoration: none;",
                    "Cancel"
                }
                button { disabled: true, title: "Saving guides is not available",
                    style: "padding: 6px 12px; border-radius: 6px; border: none; background: #93c5fd; color: white;",
                    "Save Guide"
                }
            }
        }
    }
}

#[component]
fn FieldGrid(fields: Vec<(&'static str, String, &'static str)>) -> Element {
    rsx! {
        div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
            for (label, value, placeholder) in fields.iter() {
                label { style: "display: flex; flex-direction: column; gap: 4px; font-size: 12px; font-weight: 600; color: #475569;",
                    "{label}"
                    input { r#type: "text", value: "{value}", placeholder: "{placeholder}", readonly: true,
                        style: "padding: 6px 10px; border: 1px solid #cbd5e1; border-radius: 6px;",
                    }
                }
            }
        }
    }
}

#[component]
fn GuideRunbook(#[props(!optional)] guide: Option<Row>) -> Element {
    let Some(guide) = guide else {
        return rsx! {
            ChartCard { title: "Runbook",
                p { style: "color: #64748b;", "Select a guide to view runbook steps." }
            }
        };
    };
    let title = format!("Runbook: {}", guide.text("account_name"));
    let sections = guides::runbook(&guide);

    rsx! {
        ChartCard { title: "{title}",
            for section in sections.iter() {
                div { style: "margin-bottom: 20px;",
                    h3 { style: "margin: 0 0 8px; font-size: 14px; color: #1d4ed8;", "{section.title}" }
                    if section.steps.is_empty() {
                        p { style: "margin: 0; color: #94a3b8; font-size: 14px;", "{NO_RUNBOOK_STEPS}" }
                    }
                    for step in section.steps.iter() {
                        TaskCard { step: step.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn TaskCard(step: TaskItem) -> Element {
    let name = step.task.clone().filter(|t| !t.is_empty()).unwrap_or_else(|| "Task".to_owned());
    let resources = step.resources.clone().unwrap_or_default();
    rsx! {
        div { style: "padding: 12px; margin-bottom: 8px; border: 1px solid #e5e7eb; border-radius: 6px;",
            p { style: "margin: 0; font-weight: 500; color: #1d4ed8;", "{name}" }
            if let Some(ref owner) = step.owner {
                p { style: "margin: 4px 0 0; font-size: 14px; color: #475569;", "Owner: {owner}" }
            }
            if let Some(ref system) = step.system {
                p { style: "margin: 4px 0 0; font-size: 14px; color: #475569;", "System: {system}" }
            }
            if !resources.is_empty() {
                div { style: "margin-top: 4px; font-size: 14px; color: #475569;",
                    "Resources:"
                    ul { style: "margin: 4px 0 0;",
                        for resource in resources.iter() {
                            li { "{resource}" }
                        }
                    }
                }
            }
        }
    }
}
