// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request routing: the access policy first, then the password endpoint,
// the CSV asset and the server-rendered pages.

use std::net::SocketAddr;

use ehrdash_core::types::GUIDES_CSV_FILE;
use ehrdash_security::access::{AccessDecision, AccessPolicy, identity_from_headers};
use tracing::{debug, warn};

use crate::http::{HttpRequest, HttpResponse};
use crate::pages;
use crate::services::app_services::AppServices;

/// Route of the password endpoint.
pub const PASSWORD_API: &str = "/api/password";

/// Produce the response for one request.
pub async fn dispatch(req: &HttpRequest, services: &AppServices, peer: SocketAddr) -> HttpResponse {
    let path = req.path();

    if !AccessPolicy::bypasses(path) {
        let identity = identity_from_headers(|name| req.header(name));
        if let AccessDecision::Redirect(to) = services.authorize(path, req.header("cookie"), identity.as_ref()) {
            debug!(peer = %peer, path, to, "redirecting");
            return HttpResponse::redirect(to);
        }
    }

    if path == PASSWORD_API {
        return password_endpoint(req, services, peer);
    }

    if req.method() != "GET" {
        return HttpResponse::error(405).with_header("Allow", "GET");
    }

    let query = req.query();
    let html = match path {
        "/" => pages::dashboard::render(query),
        "/credentials" => pages::credentials::render(query),
        "/requests" => pages::requests::render(query),
        "/revocations" => pages::revocations::render(query),
        "/issues" => pages::issues::render(query),
        "/team" => pages::team::render(query),
        "/portal" => pages::portal::render(query),
        "/qa-okta" => pages::qa_okta::render(query),
        "/process-docs" => pages::process_docs::render(query, services.load_guides().await),
        "/password" => pages::password::render(),
        "/auth/signin" => pages::auth::render_signin(),
        "/auth/pending" => pages::auth::render_pending(),
        _ if is_guides_asset(path) => return guides_asset(services).await,
        _ => return HttpResponse::error(404),
    };
    HttpResponse::html(html)
}

fn password_endpoint(req: &HttpRequest, services: &AppServices, peer: SocketAddr) -> HttpResponse {
    if req.method() != "POST" {
        return HttpResponse::error(405).with_header("Allow", "POST");
    }
    let outcome = services.check_password(&req.body, peer);
    let response = HttpResponse::json(outcome.status(), &outcome.body());
    if outcome.is_granted() {
        response.with_header("Set-Cookie", services.session_cookie_header())
    } else {
        response
    }
}

fn is_guides_asset(path: &str) -> bool {
    path.strip_prefix("/data/") == Some(GUIDES_CSV_FILE)
}

async fn guides_asset(services: &AppServices) -> HttpResponse {
    match services.read_guides_csv().await {
        Ok(text) => HttpResponse::csv(text),
        Err(e) => {
            warn!(error = %e, "guides asset unavailable");
            HttpResponse::error(404)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::parse_request_head;
    use ehrdash_core::config::AppConfig;

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn request(raw: &str, body: &str) -> HttpRequest {
        HttpRequest {
            head: parse_request_head(raw.as_bytes()).unwrap(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn services(enable_auth: bool) -> AppServices {
        AppServices::without_audit(AppConfig {
            enable_auth,
            ..AppConfig::default()
        })
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let req = request("GET /nope HTTP/1.1\r\nCookie: site_auth=true\r\n\r\n", "");
        assert_eq!(dispatch(&req, &services(false), peer()).await.status, 404);
    }

    #[tokio::test]
    async fn password_endpoint_rejects_get() {
        let req = request("GET /api/password HTTP/1.1\r\n\r\n", "");
        let resp = dispatch(&req, &services(false), peer()).await;
        assert_eq!(resp.status, 405);
        assert_eq!(resp.header("Allow"), Some("POST"));
    }

    #[tokio::test]
    async fn malformed_password_body_is_denied() {
        let req = request("POST /api/password HTTP/1.1\r\n\r\n", "not json");
        let resp = dispatch(&req, &services(false), peer()).await;
        assert_eq!(resp.status, 401);
        assert!(resp.header("Set-Cookie").is_none());
    }

    #[tokio::test]
    async fn pages_reject_post() {
        let req = request("POST /credentials HTTP/1.1\r\nCookie: site_auth=true\r\n\r\n", "");
        assert_eq!(dispatch(&req, &services(false), peer()).await.status, 405);
    }

    #[tokio::test]
    async fn missing_identity_goes_to_signin() {
        let req = request("GET /team HTTP/1.1\r\nCookie: site_auth=true\r\n\r\n", "");
        let resp = dispatch(&req, &services(true), peer()).await;
        assert_eq!(resp.status, 307);
        assert_eq!(resp.header("Location"), Some("/auth/signin"));
    }

    #[tokio::test]
    async fn approved_identity_reaches_page() {
        let req = request(
            "GET /team HTTP/1.1\r\nCookie: site_auth=true\r\nX-Auth-User: mds@example.com\r\nX-Auth-Status: APPROVED\r\n\r\n",
            "",
        );
        let resp = dispatch(&req, &services(true), peer()).await;
        assert_eq!(resp.status, 200);
        assert!(String::from_utf8_lossy(&resp.body).contains("EHR Team"));
    }

    #[test]
    fn guides_asset_path() {
        assert!(is_guides_asset("/data/ehr_process_guides_data.csv"));
        assert!(!is_guides_asset("/data/other.csv"));
        assert!(!is_guides_asset("/ehr_process_guides_data.csv"));
    }
}
