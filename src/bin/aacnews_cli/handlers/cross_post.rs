#![deny(clippy::all, clippy::pedantic)]

use aacnews_admin::{AdminClient, CrossPostOutcome};

use crate::args::CrossPostCmd;
use crate::client::CliError;
use crate::io::read_groups;
use crate::print::print_json;

pub async fn handle(client: &AdminClient, cmd: CrossPostCmd) -> Result<(), CliError> {
    match cmd {
        CrossPostCmd::Diigo { file } => {
            let groups = read_groups(&file)?;
            print_json(&client.add_post_diigo(&groups).await?)
        }
        CrossPostCmd::Slack { file } => {
            let groups = read_groups(&file)?;
            match client.add_post_slack(&groups).await? {
                CrossPostOutcome::Published(res) => print_json(&res),
                CrossPostOutcome::Disabled { flattened } => {
                    eprintln!("slack cross-post disabled; {flattened} posts not sent");
                    Ok(())
                }
            }
        }
    }
}
