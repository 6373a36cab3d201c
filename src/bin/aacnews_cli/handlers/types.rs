#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use aacnews_admin::AdminClient;

use crate::args::TypesCmd;
use crate::client::CliError;
use crate::io::{read_payload, set_field, set_id};
use crate::print::{print_body, print_json};

pub async fn handle(client: &AdminClient, cmd: TypesCmd) -> Result<(), CliError> {
    match cmd {
        TypesCmd::List => print_json(&client.get_types().await?),
        TypesCmd::Get { id } => print_json(&client.get_type(id).await?),
        TypesCmd::Save {
            id,
            name,
            payload_file,
        } => save(client, id, name, payload_file).await,
        TypesCmd::Delete { id } => {
            let res = client.remove_type(id).await?;
            print_body(&res)?;
            eprintln!("deleted");
            Ok(())
        }
    }
}

async fn save(
    client: &AdminClient,
    id: Option<String>,
    name: Option<String>,
    payload_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut payload = read_payload(payload_file)?;
    set_id(&mut payload, id);
    set_field(&mut payload, "name", name);
    let res = client.save_type(&payload).await?;
    print_json(&res)
}
