// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Password entry page. The form posts JSON to `/api/password` and moves to
// the dashboard once the session cookie is set.

use dioxus::prelude::*;

use crate::render::render_static;

const PASSWORD_SCRIPT: &str = r#"
document.getElementById('password-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const button = document.getElementById('password-submit');
  const error = document.getElementById('password-error');
  button.disabled = true;
  button.textContent = 'Checking...';
  error.textContent = '';
  const response = await fetch('/api/password', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ password: document.getElementById('password').value }),
  });
  if (response.ok) {
    window.location.href = '/';
    return;
  }
  const data = await response.json().catch(() => ({}));
  error.textContent = data.message || 'Incorrect password.';
  button.disabled = false;
  button.textContent = 'Enter';
});
"#;

pub fn render() -> String {
    render_static("Password", password)
}

/// Centered card used by the ungated pages.
#[component]
pub fn GateCard(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 0 24px;",
            div { style: "width: 100%; max-width: 420px; padding: 32px; background: white; border: 1px solid #e5e7eb; border-radius: 12px; text-align: center;",
                h1 { style: "margin: 0; font-size: 22px;", "{title}" }
                p { style: "margin: 8px 0 0; color: #64748b; font-size: 14px;", "{subtitle}" }
                {children}
            }
        }
    }
}

fn password() -> Element {
    rsx! {
        GateCard {
            title: "Enter Access Password",
            subtitle: "This dashboard is currently password protected.",
            form { id: "password-form", style: "margin-top: 24px; text-align: left;",
                input {
                    id: "password",
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    style: "width: 100%; box-sizing: border-box; padding: 8px 12px; border: 1px solid #cbd5e1; border-radius: 6px;",
                }
                p { id: "password-error", style: "min-height: 18px; margin: 8px 0; color: #dc2626; font-size: 13px;" }
                button { id: "password-submit", r#type: "submit",
                    style: "width: 100%; padding: 8px; border: none; border-radius: 6px; background: #1d4ed8; color: white;",
                    "Enter"
                }
            }
            script { dangerous_inner_html: PASSWORD_SCRIPT }
        }
    }
}
