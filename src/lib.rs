//! Client-side access layer for the AACNews admin API.
//!
//! [`AdminClient`] wraps every administrative operation (types, posts and
//! their history, newsletters, newsletter delivery, cross-posting) behind one
//! async contract, attaching the session credential to each request.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod telemetry;
pub mod transport;

pub use aacnews_api_types as api_types;
pub use client::{AdminClient, CrossPostOutcome, CrossPostSettings, Resource};
pub use credentials::{Credential, CredentialProvider, FileCredentialStore, StaticCredential};
pub use error::AdminError;
pub use transport::{ReqwestTransport, Transport};
