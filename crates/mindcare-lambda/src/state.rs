use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use mindcare_auth::jwt::TokenVerifier;
use mindcare_storage::s3::S3Store;
use mindcare_storage::Store;

use crate::config::{Config, StoreBackend};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub verifier: Arc<TokenVerifier>,
    /// Random source for chat reply selection.
    pub rng: Arc<Mutex<StdRng>>,
    pub analytics_max_days: u32,
}

impl AppState {
    pub fn new(store: Store, verifier: TokenVerifier, rng: StdRng, analytics_max_days: u32) -> Self {
        Self {
            store,
            verifier: Arc::new(verifier),
            rng: Arc::new(Mutex::new(rng)),
            analytics_max_days,
        }
    }

    pub async fn from_config(config: &Config) -> eyre::Result<Self> {
        let store = match &config.store {
            StoreBackend::S3 { bucket, namespace } => {
                let client = mindcare_storage::client::build_client().await;
                Store::S3(S3Store::new(client, bucket.clone(), namespace.clone()))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; records are lost on restart");
                Store::memory()
            }
        };

        let verifier = config.auth.verifier()?;

        let rng = match config.response_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self::new(store, verifier, rng, config.analytics_max_days))
    }
}
