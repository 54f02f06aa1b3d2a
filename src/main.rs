use std::time::Duration;

use gallery::{auth, config, routes, state, supabase};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }
    let config = config::AppConfig::from_env().expect("invalid configuration");

    // Never fails: a bad URL or key yields the unconfigured backend.
    let backend = supabase::Backend::connect(
        &config.supabase_url,
        &config.supabase_anon_key,
        Duration::from_secs(config.supabase_timeout_secs),
    );
    let state = state::AppState::new(backend, config.image_tables.clone());

    let auth_subscription = match state.backend.auth() {
        Some(provider) => Some(state.auth.attach(provider)),
        None => {
            tracing::warn!("Supabase not configured, auth state fixed to signed out");
            state.auth.set(auth::AuthState::SignedOut);
            None
        }
    };
    let _auth_log = spawn_auth_log(&state.auth);

    let app = routes::app(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "gallery listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    if let Some(subscription) = auth_subscription {
        subscription.cancel();
    }
    tracing::info!("gallery stopped");
}

/// Log every auth-state transition.
fn spawn_auth_log(store: &auth::AuthStore) -> tokio::task::JoinHandle<()> {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            let user_id = current.user().map(|u| u.id.to_string());
            tracing::info!(status = current.label(), user_id = user_id.as_deref(), "auth state");
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
