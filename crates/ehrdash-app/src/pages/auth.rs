// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sign-in and pending-approval pages shown when identity checks are on.
// The identity provider itself sits in front of the server.

use dioxus::prelude::*;

use super::password::GateCard;
use crate::render::render_static;

pub fn render_signin() -> String {
    render_static("Sign In", signin)
}

pub fn render_pending() -> String {
    render_static("Pending Approval", pending)
}

fn signin() -> Element {
    rsx! {
        GateCard {
            title: "Sign in to Commure EHR",
            subtitle: "Use your Google account to access the EHR dashboard.",
            a { href: "/api/auth/signin",
                style: "display: block; margin-top: 24px; padding: 8px; border-radius: 6px; background: #1d4ed8; color: white; text-decoration: none;",
                "Continue with Google"
            }
            p { style: "margin: 16px 0 0; color: #94a3b8; font-size: 12px;",
                "New users will be placed in a pending approval state."
            }
        }
    }
}

fn pending() -> Element {
    rsx! {
        GateCard {
            title: "Pending Approval",
            subtitle: "Your account is under review. You will receive an email once access is granted.",
            p { style: "margin: 24px 0 0; color: #64748b; font-size: 13px;",
                "Please contact the EHR admin if you need urgent access."
            }
        }
    }
}
