// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-documentation view state.
//
// The selected tab, selected guide, guide filters and search term form one
// immutable value. `reduce` applies an action and returns the next value;
// the server rebuilds the current value from the query string on every
// request and links to the next values.

use ehrdash_data::guides::GuideFilter;

use crate::http::{PageQuery, build_href};

/// Path of the process-documentation page.
pub const PROCESS_DOCS_PATH: &str = "/process-docs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    ViewGuide,
    EditGuide,
    Runbook,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::ViewGuide, Tab::EditGuide, Tab::Runbook];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::ViewGuide => "View Guide",
            Self::EditGuide => "Edit Guide",
            Self::Runbook => "Runbook",
        }
    }

    /// Query-string form.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::ViewGuide => "view",
            Self::EditGuide => "edit",
            Self::Runbook => "runbook",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub tab: Tab,
    /// Identifier of the selected guide, as accepted by `GuideCatalog::find`.
    pub selected_guide: Option<String>,
    pub filter: GuideFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    /// Select a guide and show it.
    SelectGuide(String),
    /// Clear the selection and open an empty edit form.
    CreateGuide,
    SetAccountFilter(String),
    SetEhrTypeFilter(String),
    SetOwnerFilter(String),
    SetSearch(String),
    /// Reset the filters and search. Tab and selection are kept.
    ClearFilters,
}

pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();
    match action {
        Action::SelectTab(tab) => next.tab = tab,
        Action::SelectGuide(id) => {
            next.selected_guide = Some(id);
            next.tab = Tab::ViewGuide;
        }
        Action::CreateGuide => {
            next.selected_guide = None;
            next.tab = Tab::EditGuide;
        }
        Action::SetAccountFilter(v) => next.filter.account = v,
        Action::SetEhrTypeFilter(v) => next.filter.ehr_type = v,
        Action::SetOwnerFilter(v) => next.filter.owner = v,
        Action::SetSearch(v) => next.filter.search = v,
        Action::ClearFilters => next.filter = GuideFilter::default(),
    }
    next
}

impl ViewState {
    /// Rebuild the state from query parameters. Unknown tabs fall back to
    /// the overview.
    pub fn from_query(query: &PageQuery) -> Self {
        let text = |name: &str| query.get(name).unwrap_or_default().to_owned();
        Self {
            tab: query.get("tab").and_then(Tab::from_slug).unwrap_or_default(),
            selected_guide: query.get("guide").filter(|g| !g.is_empty()).map(str::to_owned),
            filter: GuideFilter {
                account: text("account"),
                ehr_type: text("ehr_type"),
                owner: text("owner"),
                search: text("q"),
            },
        }
    }

    /// Query parameters for this state. Defaults are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if self.tab != Tab::Overview {
            params.push(("tab", self.tab.slug()));
        }
        if let Some(ref guide) = self.selected_guide {
            params.push(("guide", guide.as_str()));
        }
        for (name, value) in [
            ("account", &self.filter.account),
            ("ehr_type", &self.filter.ehr_type),
            ("owner", &self.filter.owner),
            ("q", &self.filter.search),
        ] {
            if !value.is_empty() {
                params.push((name, value.as_str()));
            }
        }
        params
    }

    /// Link to the page in this state.
    pub fn href(&self) -> String {
        build_href(PROCESS_DOCS_PATH, self.to_params())
    }

    /// Link to the state after `action`.
    pub fn href_after(&self, action: Action) -> String {
        reduce(self, action).href()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered() -> ViewState {
        ViewState {
            tab: Tab::Runbook,
            selected_guide: Some("SF-1".into()),
            filter: GuideFilter {
                account: "Memorial Health".into(),
                ehr_type: "Epic".into(),
                owner: "Dana".into(),
                search: "vpn".into(),
            },
        }
    }

    #[test]
    fn select_guide_switches_to_view_tab() {
        let next = reduce(&ViewState::default(), Action::SelectGuide("SF-9".into()));
        assert_eq!(next.tab, Tab::ViewGuide);
        assert_eq!(next.selected_guide.as_deref(), Some("SF-9"));
    }

    #[test]
    fn create_guide_clears_selection() {
        let next = reduce(&filtered(), Action::CreateGuide);
        assert_eq!(next.tab, Tab::EditGuide);
        assert_eq!(next.selected_guide, None);
        assert_eq!(next.filter, filtered().filter);
    }

    #[test]
    fn clear_filters_keeps_tab_and_selection() {
        let next = reduce(&filtered(), Action::ClearFilters);
        assert_eq!(next.filter, GuideFilter::default());
        assert_eq!(next.tab, Tab::Runbook);
        assert_eq!(next.selected_guide.as_deref(), Some("SF-1"));
    }

    #[test]
    fn filter_actions_touch_one_field() {
        let s = ViewState::default();
        let s = reduce(&s, Action::SetAccountFilter("City Hospital".into()));
        let s = reduce(&s, Action::SetEhrTypeFilter("Cerner".into()));
        let s = reduce(&s, Action::SetOwnerFilter("Ravi".into()));
        let s = reduce(&s, Action::SetSearch("555".into()));
        assert_eq!(
            s.filter,
            GuideFilter {
                account: "City Hospital".into(),
                ehr_type: "Cerner".into(),
                owner: "Ravi".into(),
                search: "555".into(),
            }
        );
        assert_eq!(s.tab, Tab::Overview);
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let before = filtered();
        let _ = reduce(&before, Action::SelectTab(Tab::Overview));
        assert_eq!(before, filtered());
    }

    #[test]
    fn state_round_trips_through_query() {
        let state = filtered();
        let href = state.href();
        let (path, query) = href.split_once('?').unwrap();
        assert_eq!(path, PROCESS_DOCS_PATH);
        assert_eq!(ViewState::from_query(&PageQuery::new(path, query)), state);
    }

    #[test]
    fn default_state_has_bare_link() {
        assert_eq!(ViewState::default().href(), "/process-docs");
        assert_eq!(
            ViewState::from_query(&PageQuery::new(PROCESS_DOCS_PATH, "tab=bogus&guide=")),
            ViewState::default()
        );
    }
}
