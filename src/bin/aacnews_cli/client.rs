#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use aacnews_admin::config::{LoadError, Settings};
use aacnews_admin::credentials::{CredentialError, CredentialProvider};
use aacnews_admin::telemetry::TelemetryError;
use aacnews_admin::transport::TransportError;
use aacnews_admin::{
    AdminClient, AdminError, FileCredentialStore, ReqwestTransport, StaticCredential,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error("{0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to set up transport: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Api(#[from] AdminError),
    #[error("{0}")]
    Credentials(#[from] CredentialError),
    #[error("token is required (use --token-file or AACNEWS_TOKEN)")]
    MissingToken,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

/// A configured token wins over whatever the store holds.
pub fn credential_provider(settings: &Settings) -> Arc<dyn CredentialProvider> {
    match settings.credentials.token.as_deref() {
        Some(token) => Arc::new(StaticCredential::new(token)),
        None => Arc::new(FileCredentialStore::new(&settings.credentials.store_path)),
    }
}

pub fn build_client(settings: &Settings) -> Result<AdminClient, CliError> {
    let transport = ReqwestTransport::new(settings.api.base_url.as_str())?;
    Ok(
        AdminClient::new(Arc::new(transport), credential_provider(settings))
            .with_cross_post(settings.cross_post.clone()),
    )
}
