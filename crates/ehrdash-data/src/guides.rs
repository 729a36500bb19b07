// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-guide catalog: the records behind the process documentation page.
//
// Guides arrive as CSV with one record per customer account. Every field is
// text; the five runbook fields carry JSON task lists.

use std::collections::BTreeSet;

use ehrdash_core::types::{Row, TaskItem};
use tracing::info;

use crate::csv::reader::parse_records;
use crate::tasks::parse_task_list;

/// Runbook fields in display order, with their section titles.
pub const RUNBOOK_SECTIONS: [(&str, &str); 5] = [
    ("how_to_request_ehr_credentials", "How to Request EHR Credentials"),
    ("network_readiness", "Network Readiness"),
    ("ehr_access_troubleshooting", "EHR Access Troubleshooting"),
    ("ehr_revocation_process", "EHR Revocation Process"),
    ("how_to_log_in", "How to Log In"),
];

/// Shown for a runbook section with no parseable steps.
pub const NO_RUNBOOK_STEPS: &str = "No runbook steps provided.";

/// Fields included in the free-text guide search.
const SEARCH_FIELDS: [&str; 6] = [
    "account_name",
    "ehr_type",
    "ehr_owner",
    "edited_by",
    "customer_ehr_poc",
    "helpdesk_number",
];

/// Exact-match filters plus a free-text search. Empty strings constrain
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideFilter {
    pub account: String,
    pub ehr_type: String,
    pub owner: String,
    pub search: String,
}

impl GuideFilter {
    pub fn is_empty(&self) -> bool {
        self.account.is_empty()
            && self.ehr_type.is_empty()
            && self.owner.is_empty()
            && self.search.is_empty()
    }

    pub fn matches(&self, guide: &Row) -> bool {
        let exact = |want: &str, key: &str| want.is_empty() || guide.text(key) == want;
        if !exact(&self.account, "account_name")
            || !exact(&self.ehr_type, "ehr_type")
            || !exact(&self.owner, "ehr_owner")
        {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let haystack = SEARCH_FIELDS
            .iter()
            .map(|key| guide.text(key))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        haystack.contains(&self.search.to_lowercase())
    }
}

/// Summary tiles for the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideMetrics {
    pub total: usize,
    /// Mean estimated turnaround in days, one decimal place. `0.0` when no
    /// guide has a numeric estimate.
    pub avg_tat_days: f64,
    /// Distinct non-empty EHR types.
    pub ehr_systems: usize,
}

impl GuideMetrics {
    /// Display form of the turnaround tile.
    pub fn avg_tat_label(&self) -> String {
        if self.avg_tat_days == 0.0 {
            "--".to_owned()
        } else {
            format!("{} days", self.avg_tat_days)
        }
    }
}

/// One titled runbook section of a guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunbookSection {
    pub key: &'static str,
    pub title: &'static str,
    pub steps: Vec<TaskItem>,
}

/// All loaded guides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideCatalog {
    guides: Vec<Row>,
}

impl GuideCatalog {
    pub fn new(guides: Vec<Row>) -> Self {
        Self { guides }
    }

    /// Load guides from CSV text. Malformed input never fails; see
    /// [`parse_records`].
    pub fn from_csv(text: &str) -> Self {
        let guides = parse_records(text);
        info!(count = guides.len(), "loaded process guides");
        Self { guides }
    }

    pub fn guides(&self) -> &[Row] {
        &self.guides
    }

    pub fn len(&self) -> usize {
        self.guides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }

    fn distinct(&self, key: &str) -> Vec<String> {
        self.guides
            .iter()
            .map(|g| g.text(key))
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct account names.
    pub fn account_options(&self) -> Vec<String> {
        self.distinct("account_name")
    }

    pub fn ehr_type_options(&self) -> Vec<String> {
        self.distinct("ehr_type")
    }

    pub fn owner_options(&self) -> Vec<String> {
        self.distinct("ehr_owner")
    }

    /// Guides passing `filter`, in catalog order.
    pub fn filter(&self, filter: &GuideFilter) -> Vec<Row> {
        self.guides
            .iter()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect()
    }

    /// Summary figures for the overview cards. Blank and non-numeric
    /// turnaround times are left out of the average, not counted as zero.
    pub fn metrics(&self) -> GuideMetrics {
        let estimates: Vec<f64> = self
            .guides
            .iter()
            .filter_map(|g| g.text("estimated_turnaround_time").trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .collect();
        let avg_tat_days = if estimates.is_empty() {
            0.0
        } else {
            let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
            (mean * 10.0).round() / 10.0
        };

        GuideMetrics {
            total: self.guides.len(),
            avg_tat_days,
            ehr_systems: self.ehr_type_options().len(),
        }
    }

    /// Find a guide by identifier.
    ///
    /// Tries `account_sf_id` across all guides first, then
    /// `sfdc_account_id`, then `account_name`.
    pub fn find(&self, id: &str) -> Option<&Row> {
        if id.is_empty() {
            return None;
        }
        ["account_sf_id", "sfdc_account_id", "account_name"]
            .iter()
            .find_map(|key| self.guides.iter().find(|g| g.text(key) == id))
    }
}

/// Identifier used to link to `guide`: its Salesforce id when present,
/// otherwise its account name.
pub fn guide_id(guide: &Row) -> &str {
    ["account_sf_id", "sfdc_account_id", "account_name"]
        .iter()
        .map(|key| guide.text(key))
        .find(|v| !v.is_empty())
        .unwrap_or("")
}

/// The five runbook sections of `guide`, parsed.
pub fn runbook(guide: &Row) -> Vec<RunbookSection> {
    RUNBOOK_SECTIONS
        .iter()
        .map(|&(key, title)| RunbookSection {
            key,
            title,
            steps: parse_task_list(guide.text(key)),
        })
        .collect()
}

/// Display form of a `wfh_allowed` cell.
pub fn wfh_label(value: &str) -> &str {
    match value {
        "t" => "Yes",
        "f" => "No",
        "" => "-",
        other => other,
    }
}

/// Yes/No form of a `wfh_allowed` cell: only `t` counts as allowed.
pub fn wfh_allowed(value: &str) -> &'static str {
    if value == "t" { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
account_sf_id,sfdc_account_id,account_name,ehr_type,ehr_owner,edited_by,customer_ehr_poc,helpdesk_number,estimated_turnaround_time,wfh_allowed,network_readiness
SF-1,,Memorial Health,Epic,Dana,Lee,Pat Q,555-0100,5,t,\"[{\"\"task\"\":\"\"VPN\"\"}]\"
,SFDC-2,City Hospital,Cerner,Ravi,Lee,,555-0200,10,f,
,,Rural Clinic,Epic,Dana,Kim,,,n/a,,not json
";

    fn catalog() -> GuideCatalog {
        GuideCatalog::from_csv(CSV)
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let c = catalog();
        assert_eq!(
            c.account_options(),
            ["City Hospital", "Memorial Health", "Rural Clinic"]
        );
        assert_eq!(c.ehr_type_options(), ["Cerner", "Epic"]);
        assert_eq!(c.owner_options(), ["Dana", "Ravi"]);
    }

    #[test]
    fn exact_filters_combine() {
        let c = catalog();
        let f = GuideFilter {
            ehr_type: "Epic".into(),
            owner: "Dana".into(),
            ..Default::default()
        };
        assert_eq!(c.filter(&f).len(), 2);

        let f = GuideFilter {
            ehr_type: "epic".into(),
            ..Default::default()
        };
        assert!(c.filter(&f).is_empty());
    }

    #[test]
    fn search_covers_contact_fields() {
        let c = catalog();
        let f = GuideFilter {
            search: "555-02".into(),
            ..Default::default()
        };
        let hits = c.filter(&f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text("account_name"), "City Hospital");

        let f = GuideFilter {
            search: "pat q".into(),
            ..Default::default()
        };
        assert_eq!(c.filter(&f).len(), 1);
    }

    #[test]
    fn metrics_skip_non_numeric_estimates() {
        let m = catalog().metrics();
        assert_eq!(m.total, 3);
        assert_eq!(m.avg_tat_days, 7.5);
        assert_eq!(m.ehr_systems, 2);
        assert_eq!(m.avg_tat_label(), "7.5 days");
    }

    #[test]
    fn blank_turnaround_is_not_counted_as_zero() {
        let c = GuideCatalog::from_csv("account_name,estimated_turnaround_time\nA,4\nB,\nC,  \nD,8\n");
        let m = c.metrics();
        assert_eq!(m.total, 4);
        assert_eq!(m.avg_tat_days, 6.0);
    }

    #[test]
    fn metrics_round_to_one_decimal() {
        let c = GuideCatalog::from_csv("estimated_turnaround_time\n1\n2\n2\n");
        assert_eq!(c.metrics().avg_tat_days, 1.7);

        let empty = GuideCatalog::default().metrics();
        assert_eq!(empty.avg_tat_days, 0.0);
        assert_eq!(empty.avg_tat_label(), "--");
    }

    #[test]
    fn find_prefers_salesforce_ids() {
        let c = catalog();
        assert_eq!(c.find("SF-1").unwrap().text("account_name"), "Memorial Health");
        assert_eq!(c.find("SFDC-2").unwrap().text("account_name"), "City Hospital");
        assert_eq!(c.find("Rural Clinic").unwrap().text("ehr_type"), "Epic");
        assert!(c.find("").is_none());
        assert!(c.find("nope").is_none());
    }

    #[test]
    fn guide_id_falls_back_to_name() {
        let c = catalog();
        let ids: Vec<_> = c.guides().iter().map(guide_id).collect();
        assert_eq!(ids, ["SF-1", "SFDC-2", "Rural Clinic"]);
    }

    #[test]
    fn runbook_has_five_sections_in_order() {
        let c = catalog();
        let sections = runbook(&c.guides()[0]);
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].title, "How to Request EHR Credentials");
        assert!(sections[0].steps.is_empty());
        assert_eq!(sections[1].steps[0].task.as_deref(), Some("VPN"));

        let broken = runbook(&c.guides()[2]);
        assert!(broken.iter().all(|s| s.steps.is_empty()));
    }

    #[test]
    fn wfh_labels() {
        assert_eq!(wfh_label("t"), "Yes");
        assert_eq!(wfh_label("f"), "No");
        assert_eq!(wfh_label(""), "-");
        assert_eq!(wfh_label("maybe"), "maybe");
    }

    #[test]
    fn wfh_allowed_is_yes_only_for_t() {
        assert_eq!(wfh_allowed("t"), "Yes");
        for raw in ["f", "", "maybe", "T", "true"] {
            assert_eq!(wfh_allowed(raw), "No", "{raw:?}");
        }
    }
}
