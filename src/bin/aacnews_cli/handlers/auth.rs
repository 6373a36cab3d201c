#![deny(clippy::all, clippy::pedantic)]

use aacnews_admin::config::Settings;
use aacnews_admin::credentials::{AUTHORIZATION_KEY, CredentialProvider, FileCredentialStore};
use serde_json::json;

use crate::args::AuthCmd;
use crate::client::CliError;
use crate::io::read_opt_value;
use crate::print::print_json;

pub fn handle(settings: &Settings, cmd: AuthCmd) -> Result<(), CliError> {
    let store = FileCredentialStore::new(&settings.credentials.store_path);
    match cmd {
        AuthCmd::Store {
            token_file,
            token_env,
        } => {
            let token = read_opt_value(token_env, token_file)?
                .filter(|t| !t.trim().is_empty())
                .ok_or(CliError::MissingToken)?;
            store.store_token(&token)?;
            eprintln!("token stored in {}", store.path().display());
            Ok(())
        }
        AuthCmd::Status => {
            let source = if settings.credentials.token.is_some() {
                "config"
            } else if store.credential().is_some() {
                "store"
            } else {
                "none"
            };
            print_json(&json!({
                "authenticated": source != "none",
                "source": source,
                "store": store.path().display().to_string(),
            }))
        }
        AuthCmd::Clear => {
            store.remove(AUTHORIZATION_KEY)?;
            eprintln!("token cleared");
            Ok(())
        }
    }
}
