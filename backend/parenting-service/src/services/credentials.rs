use crate::error::{Result, ServiceError};
use crate::models::ApiCredential;

/// Picks the model key for a request. Order: key in the request body, key in
/// the `X-Gemini-Api-Key` header, then the server's configured key.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    server_credential: Option<ApiCredential>,
}

impl CredentialResolver {
    pub fn new(server_credential: Option<ApiCredential>) -> Self {
        Self { server_credential }
    }

    pub fn has_server_credential(&self) -> bool {
        self.server_credential.is_some()
    }

    pub fn resolve(
        &self,
        body_key: Option<&str>,
        header_key: Option<&str>,
    ) -> Result<ApiCredential> {
        body_key
            .and_then(ApiCredential::new)
            .or_else(|| header_key.and_then(ApiCredential::new))
            .or_else(|| self.server_credential.clone())
            .ok_or(ServiceError::CredentialMissing)
    }
}
