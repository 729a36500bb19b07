// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Minimal HTTP/1.1 framing for the dashboard server.
//
// Requests are parsed just far enough to route them: request line, headers
// and a Content-Length body. Every response is sent with `Connection: close`.

use ehrdash_core::error::{EhrDashError, Result};
use ehrdash_data::table::{encode_query, parse_query};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Largest accepted request head (request line plus headers).
pub const MAX_HEAD_BYTES: usize = 16 * 1024;

/// Request line and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
    /// Raw query string, without the `?`.
    pub query: String,
    /// Header names lowercased.
    pub headers: Vec<(String, String)>,
}

impl RequestHead {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Declared body length. Absent means zero.
    pub fn content_length(&self) -> Result<usize> {
        match self.header("content-length") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| EhrDashError::Http(format!("bad Content-Length: {v}"))),
            None => Ok(0),
        }
    }
}

/// A complete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub head: RequestHead,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn method(&self) -> &str {
        &self.head.method
    }

    pub fn path(&self) -> &str {
        &self.head.path
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.header(name)
    }

    pub fn query(&self) -> PageQuery {
        PageQuery::new(&self.head.path, &self.head.query)
    }
}

/// Position of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Parse the bytes before the blank line that ends the head.
pub fn parse_request_head(data: &[u8]) -> Result<RequestHead> {
    let text = std::str::from_utf8(data)
        .map_err(|_| EhrDashError::Http("request head is not UTF-8".into()))?;
    let mut lines = text.split("\r\n");

    let request_line = lines
        .next()
        .filter(|l| !l.is_empty())
        .ok_or_else(|| EhrDashError::Http("empty request line".into()))?;
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(EhrDashError::Http(format!("bad request line: {request_line}")));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(EhrDashError::Http(format!("unsupported version: {version}")));
    }
    if !target.starts_with('/') {
        return Err(EhrDashError::Http(format!("bad request target: {target}")));
    }
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    let mut headers = Vec::new();
    for line in lines.filter(|l| !l.is_empty()) {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| EhrDashError::Http(format!("bad header line: {line}")))?;
        headers.push((name.trim().to_ascii_lowercase(), value.trim().to_owned()));
    }

    Ok(RequestHead {
        method: method.to_owned(),
        path: path.to_owned(),
        query: query.to_owned(),
        headers,
    })
}

// ---------------------------------------------------------------------------
// Query state
// ---------------------------------------------------------------------------

/// The path and decoded query of the current page, used to build links to
/// the page's next states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageQuery {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl PageQuery {
    pub fn new(path: &str, query: &str) -> Self {
        Self {
            path: path.to_owned(),
            params: parse_query(query),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Link to this page with `updates` applied. `None` removes a parameter,
    /// as does an empty value.
    pub fn href_with(&self, updates: &[(&str, Option<&str>)]) -> String {
        let mut params: Vec<(&str, &str)> = self
            .params
            .iter()
            .filter(|(k, _)| !updates.iter().any(|(u, _)| *u == k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        for (key, value) in updates {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                params.push((*key, v));
            }
        }
        build_href(&self.path, params)
    }
}

/// `path` plus an encoded query, omitting the `?` when there are no pairs.
pub fn build_href<'a>(path: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let query = encode_query(pairs);
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), content_type.into())],
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    pub fn html(body: String) -> Self {
        Self::new(200, "text/html; charset=utf-8", body)
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, "application/json", body.to_string())
    }

    pub fn csv(body: String) -> Self {
        Self::new(200, "text/csv; charset=utf-8", body)
    }

    /// 307 to `location`; the method and body are preserved on retry.
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 307,
            headers: vec![("Location".into(), location.into())],
            body: Vec::new(),
        }
    }

    /// Plain-text error page carrying the reason phrase.
    pub fn error(status: u16) -> Self {
        Self::new(status, "text/plain; charset=utf-8", reason_phrase(status))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialize status line, headers and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, reason_phrase(self.status));
        for (name, value) in &self.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n",
            self.body.len()
        ));
        let mut out = head.into_bytes();
        out.extend_from_slice(&self.body);
        out
    }
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        431 => "Request Header Fields Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_line_and_headers() {
        let raw = b"POST /api/password?x=1 HTTP/1.1\r\n\
                    Host: localhost:3000\r\n\
                    Content-Type: application/json\r\n\
                    Content-Length: 27";
        let head = parse_request_head(raw).unwrap();
        assert_eq!(head.method, "POST");
        assert_eq!(head.path, "/api/password");
        assert_eq!(head.query, "x=1");
        assert_eq!(head.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(head.content_length().unwrap(), 27);
    }

    #[test]
    fn rejects_malformed_heads() {
        assert!(parse_request_head(b"").is_err());
        assert!(parse_request_head(b"GET /").is_err());
        assert!(parse_request_head(b"GET / SPDY/3").is_err());
        assert!(parse_request_head(b"GET http://x/ HTTP/1.1").is_err());
        assert!(parse_request_head(b"GET / HTTP/1.1\r\nno colon here").is_err());
    }

    #[test]
    fn bad_content_length_is_an_error() {
        let head = parse_request_head(b"POST / HTTP/1.1\r\nContent-Length: lots").unwrap();
        assert!(head.content_length().is_err());
        let head = parse_request_head(b"GET / HTTP/1.1").unwrap();
        assert_eq!(head.content_length().unwrap(), 0);
    }

    #[test]
    fn find_subsequence_finds_blank_line() {
        let data = b"GET / HTTP/1.1\r\nHost: x\r\n\r\nbody";
        assert_eq!(find_subsequence(data, b"\r\n\r\n"), Some(23));
        assert_eq!(find_subsequence(b"abc", b"\r\n\r\n"), None);
    }

    #[test]
    fn href_with_replaces_and_removes() {
        let q = PageQuery::new("/", "accounts_sort=account&accounts_q=mem&other=1");
        assert_eq!(
            q.href_with(&[("accounts_sort", Some("clinicians")), ("accounts_q", None)]),
            "/?other=1&accounts_sort=clinicians"
        );
        assert_eq!(PageQuery::new("/team", "").href_with(&[]), "/team");
        assert_eq!(q.get("accounts_q"), Some("mem"));
    }

    #[test]
    fn response_serialization() {
        let bytes = HttpResponse::redirect("/password").to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 307 Temporary Redirect\r\n"));
        assert!(text.contains("Location: /password\r\n"));
        assert!(text.ends_with("Content-Length: 0\r\nConnection: close\r\n\r\n"));
    }

    #[test]
    fn json_response_has_length() {
        let resp = HttpResponse::json(401, &serde_json::json!({ "message": "Incorrect password." }));
        let text = String::from_utf8(resp.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 401 Unauthorized\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.ends_with(r#"{"message":"Incorrect password."}"#));
    }
}
