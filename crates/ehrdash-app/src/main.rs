// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EHR Dashboard: password-gated credential dashboard.
//
// Entry point. Initialises logging, loads configuration, builds the backend
// services and serves the pages until Ctrl-C.

mod http;
mod pages;
mod render;
mod router;
mod server;
mod services;
mod state;

use ehrdash_core::config::AppConfig;
use ehrdash_core::error::{EhrDashError, Result};

use server::DashboardServer;
use services::app_services::AppServices;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("EHR Dashboard starting");

    if let Err(e) = run().await {
        tracing::error!(error = %e, "EHR Dashboard exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::load()?;

    let services = match AppServices::init(config.clone()) {
        Ok(s) => {
            tracing::info!("backend services initialised");
            s
        }
        Err(e) => {
            tracing::error!(error = %e, "audit database failed, continuing without audit");
            AppServices::without_audit(config.clone())
        }
    };

    let mut server = DashboardServer::new(&config);
    server.start(services).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| EhrDashError::Server(format!("waiting for Ctrl-C: {e}")))?;
    tracing::info!("shutdown requested");

    server.stop().await
}
