#![deny(clippy::all, clippy::pedantic)]

use aacnews_admin::AdminClient;

use crate::args::{NewsletterSaveArgs, NewslettersCmd};
use crate::client::CliError;
use crate::io::{parse_date_opt, read_opt_value, read_payload, read_value, set_field, set_id};
use crate::print::{print_body, print_json};

pub async fn handle(client: &AdminClient, cmd: NewslettersCmd) -> Result<(), CliError> {
    match cmd {
        NewslettersCmd::List => print_json(&client.get_newsletters().await?),
        NewslettersCmd::Get { id } => print_json(&client.get_newsletter(id).await?),
        NewslettersCmd::Save(args) => save(client, *args).await,
        NewslettersCmd::Delete { id } => {
            let res = client.remove_newsletter(id).await?;
            print_body(&res)?;
            eprintln!("deleted");
            Ok(())
        }
        NewslettersCmd::Template => print_body(&client.get_template().await?),
        NewslettersCmd::Send {
            title,
            html,
            html_file,
        } => {
            let html = read_value(html, html_file)?;
            let res = client.send_newsletter(&html, &title).await?;
            print_body(&res)
        }
    }
}

async fn save(client: &AdminClient, args: NewsletterSaveArgs) -> Result<(), CliError> {
    let NewsletterSaveArgs {
        id,
        title,
        spoiler,
        preamble,
        preamble_file,
        date,
        payload_file,
    } = args;

    let mut payload = read_payload(payload_file)?;
    set_id(&mut payload, id);
    set_field(&mut payload, "title", title);
    set_field(&mut payload, "spoiler", spoiler);
    set_field(&mut payload, "preamble", read_opt_value(preamble, preamble_file)?);
    set_field(&mut payload, "date", parse_date_opt(date)?);

    let res = client.save_newsletter(&payload).await?;
    print_json(&res)
}
