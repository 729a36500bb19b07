// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placeholder datasets for the dashboard pages.
//
// The pages render these until live sources are wired up; only the process
// guides are loaded from disk.

use ehrdash_core::row;
use ehrdash_core::types::Row;

/// A headline number shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTile {
    pub title: &'static str,
    pub value: &'static str,
    pub subtitle: Option<&'static str>,
}

const fn tile(title: &'static str, value: &'static str) -> MetricTile {
    MetricTile {
        title,
        value,
        subtitle: None,
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub fn dashboard_metrics() -> Vec<MetricTile> {
    vec![
        tile("Active EHR Credentials", "1,234"),
        tile("Open EHR Requests", "48"),
        tile("Open Revocations", "12"),
        MetricTile {
            subtitle: Some("Last 30 days"),
            ..tile("Avg TAT (Days)", "7.5")
        },
    ]
}

pub fn weekly_requests() -> Vec<Row> {
    [(1, 45, 12), (2, 52, 18), (3, 48, 22), (4, 55, 15), (5, 50, 20)]
        .into_iter()
        .map(|(w, open, closed)| row! { "week" => format!("Week {w}"), "open" => open, "closed" => closed })
        .collect()
}

pub fn requests_by_provider() -> Vec<Row> {
    [("A", 15), ("B", 12), ("C", 8), ("D", 13)]
        .into_iter()
        .map(|(p, requests)| row! { "provider" => format!("Provider {p}"), "requests" => requests })
        .collect()
}

pub fn accounts() -> Vec<Row> {
    vec![
        row! { "account" => "Memorial Health", "clinicians" => 25, "ehrCredentials" => 23, "status" => "Steady State", "product" => "Augmedix Live", "avgTAT" => 6.5 },
        row! { "account" => "City Hospital", "clinicians" => 18, "ehrCredentials" => 18, "status" => "Ramp Up", "product" => "Augmedix Assist", "avgTAT" => 8.2 },
        row! { "account" => "Regional Medical", "clinicians" => 32, "ehrCredentials" => 30, "status" => "Steady State", "product" => "Augmedix Live", "avgTAT" => 5.8 },
        row! { "account" => "Community Health", "clinicians" => 15, "ehrCredentials" => 12, "status" => "Implementation", "product" => "Augmedix Prep", "avgTAT" => 10.5 },
        row! { "account" => "Metro Health", "clinicians" => 22, "ehrCredentials" => 20, "status" => "Steady State", "product" => "Augmedix Live", "avgTAT" => 7.1 },
        row! { "account" => "Rural Clinic", "clinicians" => 8, "ehrCredentials" => 7, "status" => "On Hold: Steady State", "product" => "Augmedix Assist", "avgTAT" => 9.3 },
    ]
}

pub fn active_accounts() -> Vec<Row> {
    vec![
        row! { "account" => "Memorial Health", "oktaAppName" => "Memorial Health - Epic", "ehrProcessGuide" => "Memorial Health Process Guide", "status" => "Match" },
        row! { "account" => "City Hospital", "oktaAppName" => "City Hospital - Cerner", "ehrProcessGuide" => "City Hospital Process Guide", "status" => "Match" },
        row! { "account" => "Regional Medical", "oktaAppName" => "Regional Medical - Epic", "ehrProcessGuide" => "Regional Medical Process Guide", "status" => "Match" },
        row! { "account" => "Community Health", "oktaAppName" => "Community Health - Allscripts", "ehrProcessGuide" => "Missing", "status" => "Missing Process Guide" },
    ]
}

pub fn inactive_accounts() -> Vec<Row> {
    vec![
        row! { "account" => "Old Hospital", "oktaAppName" => "Old Hospital - Epic", "ehrProcessGuide" => "Old Hospital Process Guide", "oktaAppActive" => "Yes", "processGuideActive" => "Yes" },
    ]
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

pub fn credential_status() -> Vec<Row> {
    vec![
        row! { "name" => "Active", "value" => 850 },
        row! { "name" => "Pending", "value" => 120 },
        row! { "name" => "Expiring Soon", "value" => 45 },
        row! { "name" => "Inactive", "value" => 89 },
    ]
}

pub fn credentials() -> Vec<Row> {
    vec![
        row! { "mdsName" => "John Smith", "email" => "john.smith@augmedix.com", "healthSystem" => "Epic - Memorial Health", "customer" => "Memorial Health", "expirationDate" => "2026-06-15", "manager" => "Jane Doe", "status" => "Active" },
        row! { "mdsName" => "Sarah Johnson", "email" => "sarah.j@augmedix.com", "healthSystem" => "Cerner - City Hospital", "customer" => "City Hospital", "expirationDate" => "2026-05-20", "manager" => "Mike Wilson", "status" => "Active" },
        row! { "mdsName" => "David Lee", "email" => "david.lee@augmedix.com", "healthSystem" => "Epic - Regional Medical", "customer" => "Regional Medical", "expirationDate" => "2026-04-10", "manager" => "Jane Doe", "status" => "Expiring Soon" },
        row! { "mdsName" => "Emily Chen", "email" => "emily.chen@augmedix.com", "healthSystem" => "Allscripts - Community Health", "customer" => "Community Health", "expirationDate" => "2025-12-31", "manager" => "Mike Wilson", "status" => "Inactive" },
    ]
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub fn requests_metrics() -> Vec<MetricTile> {
    vec![
        tile("Open EHR Requests", "48"),
        tile("Open Matrix Requests", "11"),
        tile("Closed This Week", "20"),
        tile("Inactive Employee Requests", "3"),
    ]
}

pub fn weekly_open_requests() -> Vec<Row> {
    [(1, 45, 8), (2, 52, 12), (3, 48, 10), (4, 55, 15), (5, 50, 11)]
        .into_iter()
        .map(|(w, open, matrix)| row! { "week" => format!("Week {w}"), "open" => open, "matrix" => matrix })
        .collect()
}

pub fn weekly_closed_requests() -> Vec<Row> {
    [(1, 12, 2), (2, 18, 4), (3, 22, 3), (4, 15, 5), (5, 20, 3)]
        .into_iter()
        .map(|(w, closed, matrix)| {
            row! { "week" => format!("Week {w}"), "closed" => closed, "matrixClosed" => matrix }
        })
        .collect()
}

pub fn requests_by_account() -> Vec<Row> {
    vec![
        row! { "account" => "Memorial Health", "open" => 8, "matrix" => 2 },
        row! { "account" => "City Hospital", "open" => 5, "matrix" => 1 },
        row! { "account" => "Regional Medical", "open" => 12, "matrix" => 3 },
        row! { "account" => "Community Health", "open" => 6, "matrix" => 0 },
    ]
}

pub fn requests_by_status() -> Vec<Row> {
    vec![
        row! { "status" => "Implementation Requests", "count" => 15 },
        row! { "status" => "Transition Requests", "count" => 8 },
        row! { "status" => "Production Requests", "count" => 20 },
        row! { "status" => "Production:TS/PS Requests", "count" => 5 },
    ]
}

pub fn requests_by_ehr_status() -> Vec<Row> {
    vec![
        row! { "status" => "EHR Requested", "count" => 12 },
        row! { "status" => "EHR Received - Pending Testing", "count" => 18 },
        row! { "status" => "EHR Credentials Active", "count" => 8 },
        row! { "status" => "EHR Received - Issues", "count" => 10 },
    ]
}

pub fn inactive_employee_requests() -> Vec<Row> {
    vec![
        row! { "name" => "Former Employee", "account" => "Memorial Health", "status" => "EHR Requested", "daysOpen" => 45, "employeeStatus" => "Resigned" },
    ]
}

// ---------------------------------------------------------------------------
// Revocations and issues
// ---------------------------------------------------------------------------

pub fn revocations_metrics() -> Vec<MetricTile> {
    vec![tile("Open Revocations", "12"), tile("Closed This Week", "11")]
}

pub fn weekly_revocations() -> Vec<Row> {
    [(1, 5, 8), (2, 7, 12), (3, 4, 10), (4, 6, 9), (5, 8, 11)]
        .into_iter()
        .map(|(w, open, closed)| row! { "week" => format!("Week {w}"), "open" => open, "closed" => closed })
        .collect()
}

pub fn issues_metrics() -> Vec<MetricTile> {
    vec![tile("Open EHR Issues", "18"), tile("Troubleshooting Tasks", "12")]
}

pub fn weekly_issues() -> Vec<Row> {
    [(1, 8), (2, 12), (3, 10), (4, 15), (5, 11)]
        .into_iter()
        .map(|(w, open)| row! { "week" => format!("Week {w}"), "open" => open })
        .collect()
}

pub fn issues() -> Vec<Row> {
    vec![
        row! { "issueId" => "EHR-001", "account" => "Memorial Health", "mdsName" => "John Smith", "issueType" => "Troubleshooting", "status" => "Open", "daysOpen" => 5, "priority" => "High" },
        row! { "issueId" => "EHR-002", "account" => "City Hospital", "mdsName" => "Sarah Johnson", "issueType" => "Reactivation", "status" => "In Progress", "daysOpen" => 3, "priority" => "Medium" },
    ]
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

pub fn requests_by_assignee() -> Vec<Row> {
    (1..=4)
        .zip([(15, 3), (12, 2), (18, 5), (10, 1)])
        .map(|(n, (open, matrix))| {
            row! { "assignee" => format!("EHR Coordinator {n}"), "open" => open, "matrix" => matrix }
        })
        .collect()
}

pub fn closed_by_week() -> Vec<Row> {
    [(1, [5, 4, 6, 3]), (2, [7, 5, 8, 4]), (3, [6, 6, 7, 5])]
        .into_iter()
        .map(|(w, counts)| {
            let mut row = row! { "week" => format!("Week {w}") };
            for (i, count) in counts.into_iter().enumerate() {
                row.insert(format!("coordinator{}", i + 1), count);
            }
            row
        })
        .collect()
}

pub fn task_actions() -> Vec<Row> {
    vec![
        row! { "taskId" => "EHR-001", "assignee" => "EHR Coordinator 1", "account" => "Memorial Health", "firstNotification" => "2026-01-15", "credentialsReceived" => "2026-01-20", "taskClosed" => "2026-01-22", "timeToClose" => 2 },
    ]
}

// ---------------------------------------------------------------------------
// QA Okta
// ---------------------------------------------------------------------------

pub fn okta_app_validation() -> Vec<Row> {
    vec![
        row! { "account" => "Memorial Health", "oktaAppName" => "Memorial Health - Epic", "oktaAppStatus" => "Active", "ehrProcessGuide" => "Memorial Health Process Guide", "ehrProcessGuideStatus" => "Active", "clinicians" => 25, "ehrCredUsers" => 23, "ratio" => "92%", "issues" => "None" },
        row! { "account" => "City Hospital", "oktaAppName" => "City Hospital - Cerner", "oktaAppStatus" => "Active", "ehrProcessGuide" => "City Hospital Process Guide", "ehrProcessGuideStatus" => "Missing", "clinicians" => 18, "ehrCredUsers" => 18, "ratio" => "100%", "issues" => "Missing Process Guide" },
        row! { "account" => "Regional Medical", "oktaAppName" => "Regional Medical - Epic", "oktaAppStatus" => "Active", "ehrProcessGuide" => "Regional Medical Process Guide", "ehrProcessGuideStatus" => "Active", "clinicians" => 32, "ehrCredUsers" => 30, "ratio" => "94%", "issues" => "None" },
    ]
}

pub fn revocation_mismatches() -> Vec<Row> {
    vec![
        row! { "mdsName" => "Former Employee", "account" => "Memorial Health", "revocationTask" => "EHR-REV-001", "revocationStatus" => "Complete", "oktaAppStatus" => "Still Assigned", "daysSinceRevocation" => 15 },
    ]
}

pub fn inactive_okta_accounts() -> Vec<Row> {
    vec![
        row! { "account" => "Old Hospital", "oktaAppStatus" => "Active", "activeClinicians" => 0, "assignedUsers" => 3, "lastActivity" => "2025-10-15" },
    ]
}

pub fn credential_ratios() -> Vec<Row> {
    vec![
        row! { "account" => "Memorial Health", "ratio" => 92 },
        row! { "account" => "City Hospital", "ratio" => 100 },
        row! { "account" => "Regional Medical", "ratio" => 94 },
        row! { "account" => "Community Health", "ratio" => 80 },
    ]
}

// ---------------------------------------------------------------------------
// Coordinator portal
// ---------------------------------------------------------------------------

pub fn portal_metrics() -> Vec<MetricTile> {
    vec![
        tile("New Inbox Items", "3"),
        tile("Open Requests", "48"),
        tile("Open Revocations", "12"),
        tile("Overdue Follow-ups", "5"),
    ]
}

pub fn inbox() -> Vec<Row> {
    vec![
        row! { "receivedAt" => "2026-01-14", "subject" => "New EHR Request - Memorial Health", "requester" => "memorial-ops@health.org", "type" => "Request", "status" => "New", "daysOpen" => 0 },
        row! { "receivedAt" => "2026-01-08", "subject" => "EHR Revocation - City Hospital", "requester" => "ehr-admin@city.org", "type" => "Revocation", "status" => "Pending Follow-up", "daysOpen" => 6 },
        row! { "receivedAt" => "2026-01-05", "subject" => "EHR Access Issue - Regional Medical", "requester" => "helpdesk@regional.org", "type" => "Issue", "status" => "In Progress", "daysOpen" => 9 },
    ]
}

pub fn request_queue() -> Vec<Row> {
    vec![
        row! { "taskId" => "EHR-REQ-1243", "account" => "Memorial Health", "mdsName" => "John Smith", "ehrSystem" => "Epic", "status" => "EHR Requested", "assignee" => "Coordinator 1", "daysInStatus" => 2 },
        row! { "taskId" => "EHR-REQ-1244", "account" => "City Hospital", "mdsName" => "Sarah Johnson", "ehrSystem" => "Cerner", "status" => "EHR Received - Pending Testing", "assignee" => "Coordinator 2", "daysInStatus" => 4 },
    ]
}

pub fn revocation_queue() -> Vec<Row> {
    vec![
        row! { "taskId" => "EHR-REV-220", "account" => "Regional Medical", "mdsName" => "David Lee", "ehrSystem" => "Epic", "status" => "To Do", "assignee" => "Coordinator 3", "daysInStatus" => 3 },
    ]
}

pub fn reminders() -> Vec<Row> {
    vec![
        row! { "reminderId" => "REM-001", "type" => "Email Follow-up", "subject" => "EHR Revocation - City Hospital", "owner" => "Coordinator 2", "lastAction" => "2026-01-07", "status" => "Overdue", "daysSinceLastAction" => 7 },
        row! { "reminderId" => "REM-002", "type" => "Credential Status Update", "subject" => "EHR Request - Memorial Health", "owner" => "Coordinator 1", "lastAction" => "2026-01-12", "status" => "Due Soon", "daysSinceLastAction" => 2 },
    ]
}
