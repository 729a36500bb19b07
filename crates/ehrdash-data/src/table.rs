// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tabular data view: sort, search and row drilldown over in-memory rows.
//
// Pipeline: sort (one column, stable) -> filter (case-insensitive substring
// over every scalar cell) -> render. Filtering runs after sorting, so the
// surviving rows keep their sorted order.
//
// The view is stateless apart from the active sort and search term, both of
// which round-trip through query parameters (`<id>_sort`, `<id>_dir`,
// `<id>_q`) so a server-rendered table can link to its next state.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use ehrdash_core::types::{CellValue, Row};
use tracing::debug;

/// Displayed for a missing value when a column has no renderer.
pub const PLACEHOLDER: &str = "-";

/// Single row shown when nothing survives filtering.
pub const EMPTY_MESSAGE: &str = "No data available";

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }

    /// Arrow shown next to the active header.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "\u{2191}",
            Self::Descending => "\u{2193}",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Sort state after activating the header for `key`.
    ///
    /// The same key while ascending flips to descending; anything else sorts
    /// ascending on `key`.
    pub fn next(current: Option<&SortConfig>, key: &str) -> SortConfig {
        match current {
            Some(c) if c.key == key && c.direction == SortDirection::Ascending => SortConfig {
                key: key.to_owned(),
                direction: SortDirection::Descending,
            },
            _ => SortConfig::ascending(key),
        }
    }
}

/// Order two cells: same-kind values compare naturally, mixed kinds fall back
/// to a fixed kind order so the comparison stays total.
fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    a.compare(b)
        .unwrap_or_else(|| a.kind_rank().cmp(&b.kind_rank()))
}

/// Stable sort of `rows` by `sort`. `None` keeps input order.
pub fn sort_rows<'a>(rows: &'a [Row], sort: Option<&SortConfig>) -> Vec<&'a Row> {
    let mut sorted: Vec<&Row> = rows.iter().collect();
    if let Some(sort) = sort {
        sorted.sort_by(|a, b| {
            let ord = compare_cells(a.get(&sort.key), b.get(&sort.key));
            match sort.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    sorted
}

// ---------------------------------------------------------------------------
// Searching
// ---------------------------------------------------------------------------

/// Whether any scalar cell of `row` contains `term`, ignoring case.
///
/// An empty term matches every row.
pub fn row_matches(row: &Row, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    row.values().any(|value| {
        value
            .scalar_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    })
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// What a cell displays: text, optionally as a link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellContent {
    pub text: String,
    pub href: Option<String>,
}

impl CellContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
        }
    }
}

/// Custom cell renderer: receives the cell value and the full row.
pub type CellRenderer = Arc<dyn Fn(&CellValue, &Row) -> CellContent + Send + Sync>;

/// Invoked with the full row when a row is clicked.
pub type RowClickHandler = Arc<dyn Fn(&Row) + Send + Sync>;

/// A column descriptor.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    renderer: Option<CellRenderer>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            renderer: None,
        }
    }

    /// A column whose header offers sorting.
    pub fn sortable(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            sortable: true,
            ..Self::new(key, label)
        }
    }

    pub fn with_renderer(
        mut self,
        renderer: impl Fn(&CellValue, &Row) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Display content for this column in `row`.
    pub fn render(&self, row: &Row) -> CellContent {
        let value = row.get(&self.key);
        if let Some(ref renderer) = self.renderer {
            return renderer(value, row);
        }
        match value.scalar_text() {
            Some(text) => CellContent::text(text),
            None => CellContent::text(PLACEHOLDER),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("custom_renderer", &self.renderer.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Rendered view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Arrow for the active sort column.
    pub indicator: Option<&'static str>,
    /// Sort state that activating this header would apply.
    pub next_sort: Option<SortConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position among the visible rows, as accepted by [`DataTable::click_row`].
    pub index: usize,
    pub cells: Vec<CellContent>,
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// One placeholder row spanning `colspan` columns.
    Empty { colspan: usize, message: &'static str },
    Rows(Vec<RowView>),
}

/// A fully rendered table, ready for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub body: TableBody,
    pub searchable: bool,
    pub search_term: String,
    /// Rows after filtering.
    pub shown: usize,
    /// Rows before filtering.
    pub total: usize,
}

impl TableView {
    /// `Showing X of Y results`, present only when a row survives.
    pub fn summary(&self) -> Option<String> {
        (self.shown > 0).then(|| format!("Showing {} of {} results", self.shown, self.total))
    }
}

// ---------------------------------------------------------------------------
// DataTable
// ---------------------------------------------------------------------------

/// A sortable, optionally searchable table over in-memory rows.
#[derive(Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
    searchable: bool,
    on_row_click: Option<RowClickHandler>,
    sort: Option<SortConfig>,
    search_term: String,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            searchable: false,
            on_row_click: None,
            sort: None,
            search_term: String::new(),
        }
    }

    /// Enable the search box.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn on_row_click(mut self, handler: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(handler));
        self
    }

    /// Restore a sort state. Ignored unless `key` names a sortable column.
    pub fn with_sort(mut self, sort: Option<SortConfig>) -> Self {
        self.sort = sort.filter(|s| self.is_sortable(&s.key));
        self
    }

    /// Restore a search term. Ignored on tables without search.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search_term(term);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn sort_config(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    fn is_sortable(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.sortable && c.key == key)
    }

    /// Header activation. A no-op for unknown or non-sortable columns.
    pub fn handle_sort(&mut self, key: &str) {
        if !self.is_sortable(key) {
            return;
        }
        let next = SortConfig::next(self.sort.as_ref(), key);
        debug!(key, direction = next.direction.as_str(), "table sort changed");
        self.sort = Some(next);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if self.searchable {
            self.search_term = term.into();
        }
    }

    /// Rows in display order: sorted, then filtered.
    pub fn visible_rows(&self) -> Vec<&Row> {
        let sorted = sort_rows(&self.rows, self.sort.as_ref());
        if !self.searchable || self.search_term.is_empty() {
            return sorted;
        }
        sorted
            .into_iter()
            .filter(|row| row_matches(row, &self.search_term))
            .collect()
    }

    /// Click the visible row at `index`.
    ///
    /// Returns `true` when a handler was invoked.
    pub fn click_row(&self, index: usize) -> bool {
        let Some(ref handler) = self.on_row_click else {
            return false;
        };
        match self.visible_rows().get(index) {
            Some(row) => {
                handler(row);
                true
            }
            None => false,
        }
    }

    /// Render headers, body and counts.
    pub fn view(&self) -> TableView {
        let headers = self
            .columns
            .iter()
            .map(|col| {
                let active = self.sort.as_ref().filter(|s| s.key == col.key);
                HeaderView {
                    key: col.key.clone(),
                    label: col.label.clone(),
                    sortable: col.sortable,
                    indicator: if col.sortable {
                        active.map(|s| s.direction.indicator())
                    } else {
                        None
                    },
                    next_sort: col
                        .sortable
                        .then(|| SortConfig::next(self.sort.as_ref(), &col.key)),
                }
            })
            .collect();

        let visible = self.visible_rows();
        let shown = visible.len();
        let body = if visible.is_empty() {
            TableBody::Empty {
                colspan: self.columns.len(),
                message: EMPTY_MESSAGE,
            }
        } else {
            let clickable = self.on_row_click.is_some();
            TableBody::Rows(
                visible
                    .into_iter()
                    .enumerate()
                    .map(|(index, row)| RowView {
                        index,
                        cells: self.columns.iter().map(|c| c.render(row)).collect(),
                        clickable,
                    })
                    .collect(),
            )
        };

        TableView {
            headers,
            body,
            searchable: self.searchable,
            search_term: self.search_term.clone(),
            shown,
            total: self.rows.len(),
        }
    }
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("searchable", &self.searchable)
            .field("sort", &self.sort)
            .field("search_term", &self.search_term)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// URL state
// ---------------------------------------------------------------------------

/// Sort and search state for one table, as carried in a query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableQuery {
    pub sort: Option<SortConfig>,
    pub search: String,
    /// Visible-row index of a drilldown click.
    pub clicked_row: Option<usize>,
}

impl TableQuery {
    /// Read the parameters for table `id` out of decoded query pairs.
    pub fn from_params(id: &str, params: &[(String, String)]) -> Self {
        let lookup = |suffix: &str| {
            let name = format!("{id}_{suffix}");
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };

        let sort = lookup("sort").filter(|k| !k.is_empty()).map(|key| SortConfig {
            key: key.to_owned(),
            direction: lookup("dir")
                .and_then(SortDirection::parse)
                .unwrap_or(SortDirection::Ascending),
        });

        Self {
            sort,
            search: lookup("q").unwrap_or_default().to_owned(),
            clicked_row: lookup("row").and_then(|r| r.parse().ok()),
        }
    }

    /// Parameter pairs for table `id`. Empty values are omitted.
    pub fn to_params(&self, id: &str) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(ref sort) = self.sort {
            params.push((format!("{id}_sort"), sort.key.clone()));
            params.push((format!("{id}_dir"), sort.direction.as_str().to_owned()));
        }
        if !self.search.is_empty() {
            params.push((format!("{id}_q"), self.search.clone()));
        }
        if let Some(row) = self.clicked_row {
            params.push((format!("{id}_row"), row.to_string()));
        }
        params
    }

    /// Apply this state to `table`.
    pub fn apply(&self, table: DataTable) -> DataTable {
        table.with_sort(self.sort.clone()).with_search(self.search.clone())
    }
}

/// Decode an `application/x-www-form-urlencoded` query string.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Encode pairs as a query string (without the leading `?`).
pub fn encode_query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehrdash_core::row;
    use std::sync::Mutex;

    fn accounts() -> Vec<Row> {
        vec![
            row! { "account" => "Memorial Health", "clinicians" => 25, "status" => "Steady State" },
            row! { "account" => "City Hospital", "clinicians" => 18, "status" => "Ramp Up" },
            row! { "account" => "Regional Medical", "clinicians" => 32, "status" => "Steady State" },
            row! { "account" => "Rural Clinic", "clinicians" => 8, "status" => CellValue::Null },
        ]
    }

    fn table() -> DataTable {
        DataTable::new(
            vec![
                Column::sortable("account", "Account Name"),
                Column::sortable("clinicians", "# Active Clinicians"),
                Column::new("status", "Customer Status"),
            ],
            accounts(),
        )
        .searchable()
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.text("account").to_owned()).collect()
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let t = table();
        assert_eq!(
            names(&t.visible_rows()),
            ["Memorial Health", "City Hospital", "Regional Medical", "Rural Clinic"]
        );
    }

    #[test]
    fn numbers_sort_numerically() {
        let mut t = table();
        t.handle_sort("clinicians");
        assert_eq!(
            names(&t.visible_rows()),
            ["Rural Clinic", "City Hospital", "Memorial Health", "Regional Medical"]
        );
    }

    #[test]
    fn second_click_reverses_first() {
        for key in ["account", "clinicians"] {
            let mut t = table();
            t.handle_sort(key);
            let first = names(&t.visible_rows());
            t.handle_sort(key);
            assert_eq!(t.sort_config().unwrap().direction, SortDirection::Descending);
            let mut second = names(&t.visible_rows());
            second.reverse();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn third_click_and_other_key_reset_to_ascending() {
        let mut t = table();
        t.handle_sort("account");
        t.handle_sort("account");
        t.handle_sort("account");
        assert_eq!(t.sort_config(), Some(&SortConfig::ascending("account")));

        t.handle_sort("account");
        t.handle_sort("clinicians");
        assert_eq!(t.sort_config(), Some(&SortConfig::ascending("clinicians")));
    }

    #[test]
    fn non_sortable_header_is_ignored() {
        let mut t = table();
        t.handle_sort("status");
        t.handle_sort("missing");
        assert!(t.sort_config().is_none());
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            row! { "k" => 1, "id" => "a" },
            row! { "k" => 0, "id" => "b" },
            row! { "k" => 1, "id" => "c" },
            row! { "k" => 0, "id" => "d" },
        ];
        let sorted = sort_rows(&rows, Some(&SortConfig::ascending("k")));
        let ids: Vec<_> = sorted.iter().map(|r| r.text("id")).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
    }

    #[test]
    fn mixed_kinds_sort_without_panicking() {
        let rows = vec![
            row! { "k" => "b" },
            row! { "k" => CellValue::Null },
            row! { "k" => 3 },
            row! { "k" => "a" },
            row! { "k" => true },
            row! { "k" => 1 },
        ];
        let sorted = sort_rows(&rows, Some(&SortConfig::ascending("k")));
        let kinds: Vec<_> = sorted.iter().map(|r| r.get("k").clone()).collect();
        assert_eq!(
            kinds,
            vec![
                CellValue::Bool(true),
                CellValue::Number(1.0),
                CellValue::Number(3.0),
                CellValue::from("a"),
                CellValue::from("b"),
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn mixed_kinds_descending_reverses_kind_order() {
        let rows = vec![
            row! { "k" => CellValue::Null, "label" => "n" },
            row! { "k" => 5, "label" => "five" },
            row! { "k" => "a", "label" => "txt" },
        ];
        let labels = |dir| -> Vec<String> {
            let sort = SortConfig { key: "k".into(), direction: dir };
            sort_rows(&rows, Some(&sort))
                .iter()
                .map(|r| r.text("label").to_owned())
                .collect()
        };
        assert_eq!(labels(SortDirection::Ascending), ["five", "txt", "n"]);
        assert_eq!(labels(SortDirection::Descending), ["n", "txt", "five"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_numbers() {
        let t = table().with_search("HOSP");
        assert_eq!(names(&t.visible_rows()), ["City Hospital"]);

        let t = table().with_search("32");
        assert_eq!(names(&t.visible_rows()), ["Regional Medical"]);
    }

    #[test]
    fn null_and_non_scalar_cells_never_match() {
        let rows = vec![
            row! { "a" => CellValue::Null },
            row! { "a" => CellValue::Other(serde_json::json!({"null": "null"})) },
            row! { "a" => false },
        ];
        let t = DataTable::new(vec![Column::new("a", "A")], rows)
            .searchable()
            .with_search("null");
        assert!(t.visible_rows().is_empty());

        let t = t.with_search("fal");
        assert_eq!(t.visible_rows().len(), 1);
    }

    #[test]
    fn filtering_preserves_sort_order_and_never_grows() {
        let mut t = table().with_search("l");
        let before = t.total_rows();
        t.handle_sort("account");
        t.handle_sort("account");
        let visible = names(&t.visible_rows());
        assert!(visible.len() <= before);
        assert_eq!(
            visible,
            ["Rural Clinic", "Regional Medical", "Memorial Health", "City Hospital"]
        );
    }

    #[test]
    fn search_ignored_when_not_searchable() {
        let t = DataTable::new(vec![Column::new("account", "Account")], accounts())
            .with_search("zzz");
        assert_eq!(t.visible_rows().len(), 4);
        assert_eq!(t.search_term(), "");
    }

    #[test]
    fn missing_values_render_placeholder() {
        let view = table().view();
        let TableBody::Rows(rows) = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[3].cells[2], CellContent::text(PLACEHOLDER));
        assert_eq!(rows[0].cells[1], CellContent::text("25"));
    }

    #[test]
    fn custom_renderer_sees_value_and_row() {
        let t = DataTable::new(
            vec![Column::sortable("account", "Account").with_renderer(|value, row| {
                CellContent::link(
                    value.scalar_text().unwrap_or_else(|| "Unknown".into()),
                    format!("/drill?clinicians={}", row.get("clinicians")),
                )
            })],
            accounts(),
        );
        let TableBody::Rows(rows) = t.view().body else {
            panic!("expected rows");
        };
        assert_eq!(
            rows[1].cells[0],
            CellContent::link("City Hospital", "/drill?clinicians=18")
        );
    }

    #[test]
    fn empty_result_spans_all_columns() {
        let view = table().with_search("no such account").view();
        assert_eq!(
            view.body,
            TableBody::Empty {
                colspan: 3,
                message: EMPTY_MESSAGE
            }
        );
        assert_eq!(view.summary(), None);
    }

    #[test]
    fn summary_counts_filtered_and_total() {
        let view = table().with_search("steady").view();
        assert_eq!(view.summary().as_deref(), Some("Showing 2 of 4 results"));
    }

    #[test]
    fn headers_show_indicator_and_next_state() {
        let mut t = table();
        t.handle_sort("account");
        let view = t.view();
        assert_eq!(view.headers[0].indicator, Some("\u{2191}"));
        assert_eq!(
            view.headers[0].next_sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Descending)
        );
        assert_eq!(view.headers[1].indicator, None);
        assert_eq!(view.headers[1].next_sort, Some(SortConfig::ascending("clinicians")));
        assert_eq!(view.headers[2].next_sort, None);
    }

    #[test]
    fn row_click_invokes_handler_with_visible_row() {
        let clicked = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&clicked);
        let mut t = table().on_row_click(move |row| {
            *sink.lock().unwrap() = Some(row.text("account").to_owned());
        });
        t.handle_sort("clinicians");

        assert!(t.click_row(0));
        assert_eq!(clicked.lock().unwrap().as_deref(), Some("Rural Clinic"));
        assert!(!t.click_row(99));
    }

    #[test]
    fn row_click_without_handler_is_a_no_op() {
        let t = table();
        assert!(!t.click_row(0));
        let TableBody::Rows(rows) = t.view().body else {
            panic!("expected rows");
        };
        assert!(rows.iter().all(|r| !r.clickable));
    }

    #[test]
    fn query_state_round_trips() {
        let state = TableQuery {
            sort: Some(SortConfig {
                key: "clinicians".into(),
                direction: SortDirection::Descending,
            }),
            search: "memorial & co".into(),
            clicked_row: Some(2),
        };
        let params = state.to_params("accounts");
        let encoded = encode_query(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let decoded = parse_query(&encoded);
        assert_eq!(TableQuery::from_params("accounts", &decoded), state);
        assert_eq!(TableQuery::from_params("other", &decoded), TableQuery::default());
    }

    #[test]
    fn query_state_ignores_unknown_sort_keys() {
        let params = parse_query("t_sort=status&t_dir=sideways");
        let query = TableQuery::from_params("t", &params);
        assert_eq!(query.sort, Some(SortConfig::ascending("status")));
        let t = query.apply(table());
        assert!(t.sort_config().is_none());
    }
}
