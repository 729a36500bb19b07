// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared page components: the data table, metric tiles and chart cards.
//
// A `DataTable` is turned into a plain `TableModel` before rendering. The
// model carries a link for every interaction (header sort, row click) and the
// search form, each encoding the table's next state in the query string.

use dioxus::prelude::*;

use ehrdash_core::types::Row;
use ehrdash_data::samples::MetricTile;
use ehrdash_data::table::{CellContent, Column, DataTable, TableBody, TableQuery};

use crate::http::PageQuery;

// ---------------------------------------------------------------------------
// Table model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: String,
    pub indicator: Option<&'static str>,
    /// Link that applies the next sort state. `None` for plain columns.
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub cells: Vec<CellContent>,
    /// Link that clicks this row, when the table has a click handler.
    pub href: Option<String>,
}

/// Search form state. Other tables' parameters ride along as hidden inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBox {
    pub action: String,
    pub param: String,
    pub term: String,
    pub hidden: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<BodyRow>,
    /// Set when no rows are visible: the colspan and message.
    pub empty: Option<(usize, &'static str)>,
    pub search: Option<SearchBox>,
    pub summary: Option<String>,
}

impl TableModel {
    /// Build the model for table `id` on the page at `page`.
    pub fn build(id: &str, table: &DataTable, page: &PageQuery) -> Self {
        let sort_param = format!("{id}_sort");
        let dir_param = format!("{id}_dir");
        let row_param = format!("{id}_row");
        let search_param = format!("{id}_q");

        let view = table.view();
        let summary = view.summary();
        let headers = view
            .headers
            .iter()
            .map(|h| HeaderCell {
                label: h.label.clone(),
                indicator: h.indicator,
                href: h.next_sort.as_ref().map(|next| {
                    page.href_with(&[
                        (sort_param.as_str(), Some(next.key.as_str())),
                        (dir_param.as_str(), Some(next.direction.as_str())),
                        (row_param.as_str(), None),
                    ])
                }),
            })
            .collect();

        let (rows, empty) = match view.body {
            TableBody::Empty { colspan, message } => (Vec::new(), Some((colspan, message))),
            TableBody::Rows(rows) => (
                rows.into_iter()
                    .map(|r| BodyRow {
                        href: r.clickable.then(|| {
                            let index = r.index.to_string();
                            page.href_with(&[(row_param.as_str(), Some(index.as_str()))])
                        }),
                        cells: r.cells,
                    })
                    .collect(),
                None,
            ),
        };

        let search = view.searchable.then(|| SearchBox {
            action: page.path.clone(),
            term: view.search_term.clone(),
            hidden: page
                .params
                .iter()
                .filter(|(k, _)| *k != search_param && *k != row_param)
                .cloned()
                .collect(),
            param: search_param.clone(),
        });

        Self {
            headers,
            rows,
            empty,
            search,
            summary,
        }
    }
}

/// Restore table `id`'s sort and search from the query, then replay any row
/// click it carries.
pub fn restore_table(id: &str, table: DataTable, page: &PageQuery) -> DataTable {
    let state = TableQuery::from_params(id, &page.params);
    let table = state.apply(table);
    if let Some(index) = state.clicked_row {
        if !table.click_row(index) {
            tracing::debug!(table = id, index, "row click ignored");
        }
    }
    table
}

/// Sortable columns from `(key, label)` pairs.
pub fn sortable_columns(columns: &[(&str, &str)]) -> Vec<Column> {
    columns
        .iter()
        .map(|&(key, label)| Column::sortable(key, label))
        .collect()
}

/// A searchable table of sortable columns, restored from the query.
pub fn searchable_model(id: &str, columns: &[(&str, &str)], rows: Vec<Row>, page: &PageQuery) -> TableModel {
    let table = DataTable::new(sortable_columns(columns), rows).searchable();
    TableModel::build(id, &restore_table(id, table, page), page)
}

/// A plain table over a chart series.
pub fn series_model(id: &str, columns: &[(&str, &str)], rows: Vec<Row>, page: &PageQuery) -> TableModel {
    let columns = columns
        .iter()
        .map(|&(key, label)| Column::new(key, label))
        .collect();
    TableModel::build(id, &DataTable::new(columns, rows), page)
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

const CELL_STYLE: &str = "padding: 8px 12px; border-bottom: 1px solid #e5e7eb; text-align: left;";

#[component]
pub fn DataTableView(model: TableModel) -> Element {
    rsx! {
        div { class: "data-table",
            if let Some(ref search) = model.search {
                form { method: "get", action: "{search.action}",
                    style: "margin-bottom: 12px;",
                    for (name, value) in search.hidden.iter() {
                        input { r#type: "hidden", name: "{name}", value: "{value}" }
                    }
                    input {
                        r#type: "text",
                        name: "{search.param}",
                        value: "{search.term}",
                        placeholder: "Search...",
                        style: "padding: 6px 10px; width: 260px; border: 1px solid #cbd5e1; border-radius: 6px;",
                    }
                    button { r#type: "submit",
                        style: "margin-left: 8px; padding: 6px 12px; border-radius: 6px; border: 1px solid #cbd5e1; background: white;",
                        "Search"
                    }
                }
            }
            table { style: "width: 100%; border-collapse: collapse; background: white; font-size: 14px;",
                thead {
                    tr {
                        for header in model.headers.iter() {
                            th { style: "{CELL_STYLE} background: #f8fafc; font-weight: 600;",
                                if let Some(ref href) = header.href {
                                    a { href: "{href}", style: "color: inherit; text-decoration: none;",
                                        "{header.label}"
                                        if let Some(indicator) = header.indicator {
                                            span { style: "margin-left: 4px;", "{indicator}" }
                                        }
                                    }
                                } else {
                                    "{header.label}"
                                }
                            }
                        }
                    }
                }
                tbody {
                    if let Some((colspan, message)) = model.empty {
                        tr {
                            td { colspan: "{colspan}",
                                style: "{CELL_STYLE} text-align: center; color: #94a3b8;",
                                "{message}"
                            }
                        }
                    }
                    for row in model.rows.iter() {
                        {
                            let cursor = if row.href.is_some() { "cursor: pointer;" } else { "" };
                            rsx! {
                                tr { style: "{cursor}",
                                    for (i, cell) in row.cells.iter().enumerate() {
                                        td { style: "{CELL_STYLE}",
                                            {cell_link(cell, if i == 0 { row.href.as_deref() } else { None })}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(ref summary) = model.summary {
                p { style: "margin: 8px 0 0; color: #64748b; font-size: 13px;", "{summary}" }
            }
        }
    }
}

/// A cell's own link wins over the row-click link.
fn cell_link(cell: &CellContent, row_href: Option<&str>) -> Element {
    match cell.href.as_deref().or(row_href) {
        Some(href) => rsx! {
            a { href: "{href}", style: "color: #2563eb; text-decoration: none;", "{cell.text}" }
        },
        None => rsx! { "{cell.text}" },
    }
}

#[component]
pub fn MetricGrid(tiles: Vec<MetricTile>) -> Element {
    rsx! {
        div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; margin-bottom: 24px;",
            for tile in tiles.iter() {
                div { style: "padding: 16px; background: white; border-radius: 8px; border: 1px solid #e5e7eb;",
                    p { style: "margin: 0; color: #64748b; font-size: 13px;", "{tile.title}" }
                    p { style: "margin: 4px 0 0; font-size: 28px; font-weight: 700;", "{tile.value}" }
                    if let Some(subtitle) = tile.subtitle {
                        p { style: "margin: 4px 0 0; color: #94a3b8; font-size: 12px;", "{subtitle}" }
                    }
                }
            }
        }
    }
}

/// A titled card. Chart series render inside as tables.
#[component]
pub fn ChartCard(title: String, subtitle: Option<String>, children: Element) -> Element {
    rsx! {
        section { style: "padding: 16px; margin-bottom: 24px; background: white; border-radius: 8px; border: 1px solid #e5e7eb;",
            h2 { style: "margin: 0 0 4px; font-size: 17px;", "{title}" }
            if let Some(ref subtitle) = subtitle {
                p { style: "margin: 0 0 12px; color: #64748b; font-size: 13px;", "{subtitle}" }
            }
            {children}
        }
    }
}

#[component]
pub fn PageHeader(title: String, subtitle: String) -> Element {
    rsx! {
        header { style: "margin-bottom: 24px;",
            h1 { style: "margin: 0; font-size: 26px;", "{title}" }
            p { style: "margin: 4px 0 0; color: #64748b;", "{subtitle}" }
        }
    }
}
