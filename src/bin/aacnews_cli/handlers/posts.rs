#![deny(clippy::all, clippy::pedantic)]

use aacnews_admin::AdminClient;

use crate::args::{PostSaveArgs, PostsCmd};
use crate::client::CliError;
use crate::io::{id_value, parse_date_opt, read_opt_value, read_payload, set_field, set_id};
use crate::print::{print_body, print_json};

pub async fn handle(client: &AdminClient, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List { published } => {
            let res = if published {
                client.get_posts_published().await?
            } else {
                client.get_posts().await?
            };
            print_json(&res)
        }
        PostsCmd::Get { id } => print_json(&client.get_post(id).await?),
        PostsCmd::Save(args) => save(client, *args).await,
        PostsCmd::Delete { id } => {
            let res = client.remove_post(id).await?;
            print_body(&res)?;
            eprintln!("deleted");
            Ok(())
        }
        PostsCmd::History { id, version } => {
            let res = match version {
                Some(version) => client.get_history_post_by_version(id, version).await?,
                None => client.get_history_post(id).await?,
            };
            print_json(&res)
        }
    }
}

async fn save(client: &AdminClient, args: PostSaveArgs) -> Result<(), CliError> {
    let PostSaveArgs {
        id,
        title,
        text,
        text_file,
        url,
        author,
        date,
        type_id,
        publish,
        payload_file,
    } = args;

    let mut payload = read_payload(payload_file)?;
    set_id(&mut payload, id);
    set_field(&mut payload, "title", title);
    set_field(&mut payload, "text", read_opt_value(text, text_file)?);
    set_field(&mut payload, "url", url);
    set_field(&mut payload, "author", author);
    set_field(&mut payload, "date", parse_date_opt(date)?);
    set_field(&mut payload, "type_id", type_id.as_deref().map(id_value));
    set_field(&mut payload, "publish", publish);

    let res = client.save_post(&payload).await?;
    print_json(&res)
}
