pub mod analysis;
pub mod api;
pub mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use analysis::{GeminiClient, SymptomAnalyzer};
use api::types::ApiContext;

pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::Settings::from_env();

    // A missing credential disables analysis but not the page itself; the
    // front end keeps working and /analyze answers with a generic failure.
    let analyzer = match GeminiClient::new(&settings.gemini_api_key, settings.request_timeout) {
        Ok(client) => Some(Arc::new(SymptomAnalyzer::new(
            Box::new(client),
            settings.models.clone(),
        ))),
        Err(e) => {
            tracing::error!(error = %e, "symptom analysis disabled");
            None
        }
    };

    let ctx = ApiContext::new(analyzer);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let mut server = match api::server::start(settings.bind_addr, ctx).await {
            Ok(server) => server,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        };

        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for shutdown signal: {e}");
        }

        server.shutdown();
        server.wait().await;
    });
}
