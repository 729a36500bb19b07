// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ehrdash-data: Data layer for the EHR dashboard.
//
// Provides the permissive CSV reader (plus a strict mode and a writer), the
// JSON task-list helpers used by process-guide cells, the sortable/searchable
// table view model, the process-guide catalog, and the sample datasets that
// stand in for a real backend.

pub mod csv;
pub mod guides;
pub mod samples;
pub mod table;
pub mod tasks;

// Re-export the primary entry points so callers can use `ehrdash_data::DataTable` etc.
pub use csv::reader::{parse_records, parse_records_with, ParseMode};
pub use csv::writer::write_records;
pub use guides::{GuideCatalog, GuideFilter, GuideMetrics};
pub use table::{Column, DataTable, SortConfig, SortDirection, TableView};
pub use tasks::{parse_task_list, safe_json_parse};
