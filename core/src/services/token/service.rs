//! Main token service implementation

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use ev_shared::config::MAX_TOKEN_EXPIRY_SECONDS;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, info, warn};

use crate::domain::entities::identity::AuthIdentity;
use crate::domain::entities::role::Role;
use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::value_objects::CredentialState;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Credentials and flags forwarded by a logout/revoke handler
#[derive(Debug, Clone, Default)]
pub struct RevokeRequest {
    /// Access token taken from the Authorization header
    pub access_token: Option<String>,
    /// Refresh token supplied in the request body
    pub refresh_token: Option<String>,
    /// Whether the caller asked to revoke every token of the subject
    pub all_tokens: bool,
    /// Subject of the authenticated caller, if any
    pub subject: Option<String>,
}

/// Which revocation path a request took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeScope {
    /// Registry entry cleared and the presented tokens revoked
    All,
    /// Only the presented tokens revoked
    Specific,
}

/// Service issuing, verifying, rotating and revoking bearer credentials
///
/// All mutable state lives in the injected [`TokenRepository`].
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    access_keys: SigningKeys,
    refresh_keys: SigningKeys,
    validation: Validation,
    expiry_hint_validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token store holding the refresh registry and revocation set
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an internal error for a non-HMAC algorithm,
    /// an empty secret or a lifetime beyond `MAX_TOKEN_EXPIRY_SECONDS`
    pub fn new(repository: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::internal(format!(
                "Token service requires an HMAC algorithm, got {:?}",
                config.algorithm
            )));
        }
        if config.access_secret.is_empty() || config.refresh_secret.is_empty() {
            return Err(DomainError::internal("JWT secrets must not be empty"));
        }
        // Issuance computes `now + lifetime`, which has to stay in range.
        for expiry in [
            config.access_token_expiry_seconds,
            config.refresh_token_expiry_seconds,
        ] {
            if expiry.checked_abs().map_or(true, |e| e > MAX_TOKEN_EXPIRY_SECONDS) {
                return Err(DomainError::internal(format!(
                    "Token lifetimes must not exceed {} seconds",
                    MAX_TOKEN_EXPIRY_SECONDS
                )));
            }
        }

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;

        // Only used to read `exp` from tokens being revoked.
        let mut expiry_hint_validation = Validation::new(config.algorithm);
        expiry_hint_validation.validate_exp = false;
        expiry_hint_validation.validate_aud = false;

        Ok(Self {
            access_keys: SigningKeys::from_secret(&config.access_secret),
            refresh_keys: SigningKeys::from_secret(&config.refresh_secret),
            repository,
            config,
            validation,
            expiry_hint_validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    /// Issues a short-lived access token. No side effects.
    pub fn issue_access_token(&self, subject: &str, role: Role) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(subject, role, self.config.access_token_lifetime());
        let token = self.encode_jwt(&claims, TokenKind::Access)?;
        debug!(subject, role = %role, "Issued access token");
        Ok(token)
    }

    /// Issues a refresh token and registers it as the subject's only
    /// accepted refresh token, superseding any earlier one
    pub async fn issue_refresh_token(
        &self,
        subject: &str,
        role: Role,
    ) -> Result<String, DomainError> {
        let (token, claims) = self.sign_refresh_token(subject, role)?;
        self.repository
            .save_refresh_token(subject, &token, claims.expires_at())
            .await?;
        debug!(subject, role = %role, "Issued refresh token");
        Ok(token)
    }

    /// Issues an access token followed by a refresh token
    ///
    /// The two steps are not atomic: a failure after the refresh token is
    /// registered leaves the registry updated without returning a pair.
    pub async fn issue_token_pair(&self, subject: &str, role: Role) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(subject, role)?;
        let refresh_token = self.issue_refresh_token(subject, role).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_seconds,
        ))
    }

    fn sign_refresh_token(&self, subject: &str, role: Role) -> Result<(String, Claims), DomainError> {
        let claims = Claims::new_refresh_token(subject, role, self.config.refresh_token_lifetime());
        let token = self.encode_jwt(&claims, TokenKind::Refresh)?;
        Ok((token, claims))
    }

    /// Encodes claims into a JWT signed with the secret of `kind`
    pub(crate) fn encode_jwt(&self, claims: &Claims, kind: TokenKind) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.keys(kind).encoding)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Computes the state of a credential
    ///
    /// The revocation set is consulted first; signature, structure, kind
    /// and expiry are checked only for credentials that are not revoked.
    pub async fn evaluate(&self, token: &str, kind: TokenKind) -> Result<CredentialState, DomainError> {
        if self.repository.is_token_revoked(token).await? {
            return Ok(CredentialState::Revoked);
        }
        Ok(self.decode_state(token, kind))
    }

    /// Verifies a credential and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::TokenRevoked)` - Present in the revocation set
    /// * `Err(TokenError::TokenMalformed)` - Bad signature, structure or kind
    /// * `Err(TokenError::TokenExpired)` - Past the embedded expiry
    pub async fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        self.evaluate(token, kind)
            .await?
            .into_claims()
            .map_err(DomainError::Token)
    }

    /// Signature, structure, kind and expiry checks without the revocation gate
    fn decode_state(&self, token: &str, kind: TokenKind) -> CredentialState {
        match decode::<Claims>(token, &self.keys(kind).decoding, &self.validation) {
            Ok(data) if data.claims.kind == kind => CredentialState::Valid(data.claims),
            Ok(_) => CredentialState::Malformed,
            Err(e) if e.kind() == &ErrorKind::ExpiredSignature => CredentialState::Expired,
            Err(_) => CredentialState::Malformed,
        }
    }

    /// Exchanges a refresh token for a new pair, rotating the refresh token
    ///
    /// The presented token is single-use: once exchanged it is added to the
    /// revocation set, and a token superseded by a newer issuance is
    /// rejected through the registry comparison.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The new pair
    /// * `Err(TokenError::MissingRefreshToken)` - Empty input
    /// * `Err(TokenError::TokenRevoked)` - Already used or revoked
    /// * `Err(TokenError::InvalidRefreshToken)` - Bad signature, expired,
    ///   wrong kind, or not the subject's current refresh token
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        if refresh_token.trim().is_empty() {
            return Err(TokenError::MissingRefreshToken.into());
        }

        if self.repository.is_token_revoked(refresh_token).await? {
            warn!("Rejected revoked refresh token");
            return Err(TokenError::TokenRevoked.into());
        }

        let claims = match self.decode_state(refresh_token, TokenKind::Refresh) {
            CredentialState::Valid(claims) => claims,
            state => {
                warn!(?state, "Rejected refresh token that failed verification");
                return Err(TokenError::InvalidRefreshToken.into());
            }
        };
        let subject = claims.user_id.as_str();

        let registered = self.repository.find_refresh_token(subject).await?;
        let is_current = registered
            .as_deref()
            .map(|current| constant_time_eq(current.as_bytes(), refresh_token.as_bytes()))
            .unwrap_or(false);
        if !is_current {
            warn!(subject, "Rejected superseded refresh token");
            return Err(TokenError::InvalidRefreshToken.into());
        }

        let access_token = self.issue_access_token(subject, claims.role)?;
        let (new_refresh_token, new_claims) = self.sign_refresh_token(subject, claims.role)?;

        let rotated = self
            .repository
            .rotate_refresh_token(subject, refresh_token, &new_refresh_token, new_claims.expires_at())
            .await?;
        if !rotated {
            warn!(subject, "Refresh token was rotated concurrently");
            return Err(TokenError::InvalidRefreshToken.into());
        }

        self.repository
            .revoke_token(refresh_token, claims.expires_at())
            .await?;

        info!(subject, "Refresh token rotated");
        Ok(TokenPair::new(
            access_token,
            new_refresh_token,
            self.config.access_token_expiry_seconds,
        ))
    }

    /// Revokes the presented credentials
    ///
    /// With `all_tokens` and a known subject the subject's registry entry is
    /// removed as well. Access tokens that were not presented stay valid
    /// until they expire: they are never recorded, so they cannot be
    /// enumerated.
    pub async fn revoke(&self, request: RevokeRequest) -> Result<RevokeScope, DomainError> {
        let access_token = request.access_token.as_deref().filter(|t| !t.is_empty());
        let refresh_token = request.refresh_token.as_deref().filter(|t| !t.is_empty());

        if request.all_tokens {
            if let Some(subject) = request.subject.as_deref() {
                self.repository.delete_refresh_token(subject).await?;
                if let Some(token) = access_token {
                    self.revoke_credential(token).await?;
                }
                if let Some(token) = refresh_token {
                    self.revoke_credential(token).await?;
                }
                info!(subject, "Revoked all presented tokens and cleared refresh registration");
                return Ok(RevokeScope::All);
            }
        }

        if let Some(token) = access_token {
            self.revoke_credential(token).await?;
        }

        if let Some(token) = refresh_token {
            self.revoke_credential(token).await?;
            if let CredentialState::Valid(claims) = self.decode_state(token, TokenKind::Refresh) {
                self.repository.delete_refresh_token(&claims.user_id).await?;
            }
        }

        debug!(
            access = access_token.is_some(),
            refresh = refresh_token.is_some(),
            "Revoked presented tokens"
        );
        Ok(RevokeScope::Specific)
    }

    async fn revoke_credential(&self, token: &str) -> Result<(), DomainError> {
        let expires_at = self.expiry_hint(token);
        self.repository.revoke_token(token, expires_at).await
    }

    /// When a revocation entry may be dropped
    ///
    /// Tokens signed by this service report their own expiry; anything else
    /// is kept for the longest lifetime this service issues.
    fn expiry_hint(&self, token: &str) -> DateTime<Utc> {
        [TokenKind::Access, TokenKind::Refresh]
            .into_iter()
            .find_map(|kind| {
                decode::<Claims>(token, &self.keys(kind).decoding, &self.expiry_hint_validation)
                    .ok()
                    .map(|data| data.claims.expires_at())
            })
            .unwrap_or_else(|| Utc::now() + self.config.refresh_token_lifetime())
    }

    /// Authenticates a request from its `Authorization` header value
    ///
    /// # Returns
    ///
    /// * `Ok(AuthIdentity)` - Identity decoded from a valid access token
    /// * `Err(TokenError::MissingToken)` - No header, another scheme, or an empty token
    /// * `Err(TokenError::TokenRevoked | TokenExpired | TokenMalformed)` - As for [`Self::verify`]
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AuthIdentity, DomainError> {
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or(DomainError::Token(TokenError::MissingToken))?;

        let claims = self.verify(token, TokenKind::Access).await?;
        Ok(AuthIdentity::from(claims))
    }

    /// Like [`Self::authenticate`], but a missing or unusable token yields `None`
    ///
    /// Store failures are still reported.
    pub async fn authenticate_optional(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<AuthIdentity>, DomainError> {
        match self.authenticate(authorization).await {
            Ok(identity) => Ok(Some(identity)),
            Err(DomainError::Token(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Number of entries currently in the revocation set
    pub async fn revoked_count(&self) -> Result<usize, DomainError> {
        self.repository.count_revoked_tokens().await
    }
}

/// Extracts the token from a `Bearer <token>` header value
///
/// The scheme is matched case-insensitively; any other scheme yields `None`.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
