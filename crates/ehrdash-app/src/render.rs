// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Server-side rendering of page components into complete HTML documents.

use dioxus::prelude::*;

/// Render `root` with `props` and wrap the markup in an HTML document.
pub fn render_document<P: Clone + 'static>(title: &str, root: fn(P) -> Element, props: P) -> String {
    document(title, VirtualDom::new_with_props(root, props))
}

/// Render a component without props.
pub fn render_static(title: &str, root: fn() -> Element) -> String {
    document(title, VirtualDom::new(root))
}

fn document(title: &str, mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    let body = dioxus_ssr::render(&dom);
    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{} | EHR Dashboard</title>\
         </head>\
         <body style=\"margin: 0; font-family: system-ui, -apple-system, sans-serif; background: #f5f6f8; color: #1f2933;\">\
         {body}\
         </body>\
         </html>",
        escape_text(title)
    )
}

/// Escape text for an HTML text node.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
