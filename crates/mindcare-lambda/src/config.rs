use std::env;

use mindcare_auth::error::AuthError;
use mindcare_auth::jwt::TokenVerifier;

const DEFAULT_BUCKET: &str = "mindcare";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_ANALYTICS_MAX_DAYS: u32 = 365;

/// Where records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    S3 { bucket: String, namespace: String },
    Memory,
}

/// How bearer tokens are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    Cognito {
        user_pool_id: String,
        region: String,
        public_key_pem: String,
    },
    SharedSecret {
        secret: String,
        issuer: String,
    },
}

impl AuthConfig {
    pub fn verifier(&self) -> Result<TokenVerifier, AuthError> {
        match self {
            AuthConfig::Cognito {
                user_pool_id,
                region,
                public_key_pem,
            } => TokenVerifier::cognito(public_key_pem.as_bytes(), user_pool_id, region),
            AuthConfig::SharedSecret { secret, issuer } => {
                Ok(TokenVerifier::shared_secret(secret.as_bytes(), issuer))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub auth: AuthConfig,
    /// Seed for reply selection; entropy when unset.
    pub response_seed: Option<u64>,
    /// Upper bound on the analytics window an admin may request.
    pub analytics_max_days: u32,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store = match var("MINDCARE_STORE").as_deref().unwrap_or("s3") {
            "s3" => StoreBackend::S3 {
                bucket: var("MINDCARE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                namespace: var("MINDCARE_PREFIX").unwrap_or_default(),
            },
            "memory" => StoreBackend::Memory,
            other => return Err(eyre::eyre!("unknown MINDCARE_STORE backend: {other}")),
        };

        let auth = if let Some(public_key_pem) = var("MINDCARE_JWT_PUBLIC_KEY_PEM") {
            AuthConfig::Cognito {
                user_pool_id: var("COGNITO_USER_POOL_ID").ok_or_else(|| {
                    eyre::eyre!("COGNITO_USER_POOL_ID is required with MINDCARE_JWT_PUBLIC_KEY_PEM")
                })?,
                region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                public_key_pem,
            }
        } else if let Some(secret) = var("MINDCARE_JWT_SECRET") {
            AuthConfig::SharedSecret {
                secret,
                issuer: var("MINDCARE_JWT_ISSUER")
                    .ok_or_else(|| eyre::eyre!("MINDCARE_JWT_ISSUER is required with MINDCARE_JWT_SECRET"))?,
            }
        } else {
            return Err(eyre::eyre!(
                "no token validation configured: set MINDCARE_JWT_PUBLIC_KEY_PEM or MINDCARE_JWT_SECRET"
            ));
        };

        let response_seed = var("MINDCARE_RESPONSE_SEED")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|e| eyre::eyre!("invalid MINDCARE_RESPONSE_SEED '{v}': {e}"))
            })
            .transpose()?;

        let analytics_max_days = match var("MINDCARE_ANALYTICS_MAX_DAYS") {
            Some(v) => v
                .parse::<u32>()
                .map_err(|e| eyre::eyre!("invalid MINDCARE_ANALYTICS_MAX_DAYS '{v}': {e}"))?
                .max(1),
            None => DEFAULT_ANALYTICS_MAX_DAYS,
        };

        Ok(Self {
            store,
            auth,
            response_seed,
            analytics_max_days,
        })
    }
}
