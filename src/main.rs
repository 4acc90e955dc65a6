//! Demo binary: runs one page load against the configured backends with a
//! scripted provider and a tracing surface, so the whole flow can be
//! exercised from a terminal.

use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use herald_access::adapters::events::TracingPageEvents;
use herald_access::adapters::http::{BackendTokenService, PortalClient};
use herald_access::adapters::provider::ScriptedIdentityProvider;
use herald_access::adapters::storage::FileTokenStore;
use herald_access::adapters::surface::TracingSurface;
use herald_access::application::{PageLoad, SessionResolver, SurfaceController};
use herald_access::config::AppConfig;
use herald_access::domain::entitlement::EntitlementEvaluator;
use herald_access::domain::foundation::PageLocation;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("herald-access: {error}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.site.log_level))
        .init();

    tracing::info!(
        site_url = %config.site.site_url,
        production = config.is_production(),
        "Starting demo page load"
    );

    let provider = Arc::new(ScriptedIdentityProvider::signed_out());
    let token_service = Arc::new(BackendTokenService::with_timeout(
        config.backend.base_url.clone(),
        config.backend.request_timeout(),
    ));
    let token_store = Arc::new(FileTokenStore::new(config.storage.token_record_path()));
    let portal = Arc::new(PortalClient::new(config.portal.endpoint_url.clone()));
    let surface = Arc::new(TracingSurface::new());
    let events = Arc::new(TracingPageEvents::new());

    let resolver = SessionResolver::new(
        provider.clone(),
        token_service,
        token_store.clone(),
        config.auth.callback_path.clone(),
    );
    let controller = SurfaceController::new(
        surface,
        events,
        portal,
        provider,
        token_store,
        EntitlementEvaluator::new(config.paywall.allow_list()),
    );

    let mut page = PageLoad::new(resolver, controller);
    let outcome = page.run(&PageLocation::new("/")).await;

    tracing::info!(?outcome, "Demo page load complete");
    Ok(())
}
