use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use mindcare_core::models::identity::{Identity, Role};

use crate::error::AuthError;

/// Claims extracted from an identity provider JWT.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub token_use: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    /// Explicit role attribute, when the user pool defines one.
    #[serde(rename = "custom:role", default)]
    pub role: Option<String>,
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
}

/// Validates bearer tokens against one issuer and key.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// RS256 tokens issued by a Cognito user pool, checked with the pool's
    /// PEM-encoded public key.
    pub fn cognito(
        public_key_pem: &[u8],
        user_pool_id: &str,
        region: &str,
    ) -> Result<Self, AuthError> {
        let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");
        let key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| AuthError::Config(format!("invalid RSA public key: {e}")))?;
        Ok(Self::with_key(key, Algorithm::RS256, &issuer))
    }

    /// HS256 tokens signed with a shared secret (local development).
    pub fn shared_secret(secret: &[u8], issuer: &str) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256, issuer)
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm, issuer: &str) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.validate_exp = true;
        Self { key, validation }
    }

    /// Validate `token` and resolve the caller's identity.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::Jwt(e),
            }
        })?;
        let claims = token_data.claims;

        // Verify token_use is "access" or "id"
        if claims.token_use != "access" && claims.token_use != "id" {
            return Err(AuthError::InvalidToken(format!(
                "unexpected token_use: {}",
                claims.token_use
            )));
        }

        let role = resolve_role(&claims)?;
        debug!(sub = %claims.sub, role = %role, "token verified");

        Ok(Identity {
            subject_id: claims.sub,
            role,
            email: claims.email,
        })
    }
}

/// Role precedence: the explicit `custom:role` attribute, then the most
/// privileged recognised group, then student.
fn resolve_role(claims: &Claims) -> Result<Role, AuthError> {
    if let Some(role) = &claims.role {
        return Role::parse(role)
            .ok_or_else(|| AuthError::InvalidToken(format!("unknown role: {role}")));
    }

    let from_groups = claims.groups.iter().filter_map(|g| Role::parse(g)).max_by_key(|r| {
        match r {
            Role::Student => 0,
            Role::Counsellor => 1,
            Role::Admin => 2,
        }
    });

    Ok(from_groups.unwrap_or(Role::Student))
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::MissingToken)?;
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
