use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use log::{debug, warn};
use postfeed_core::posts::{FetchError, PostRecord, BATCH_SIZE};
use postfeed_core::session::{parse_command, SessionCommand, SessionState};
use rand::Rng;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use super::client::PostSource;
use super::pipeline::{Clock, Pipeline};

type FetchResult = Result<Vec<PostRecord>, FetchError>;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SessionOptions {
    /// Number of posts to keep from each fetch
    #[arg(short, long, env = "POSTFEED_LIMIT", default_value_t = BATCH_SIZE)]
    pub limit: usize,
}

pub async fn run(options: SessionOptions, global: crate::Global) -> Result<()> {
    let pipeline = Arc::new(Mutex::new(super::build_pipeline(&global, options.limit)?));
    let (tx, mut rx) = mpsc::channel::<FetchResult>(1);
    let mut state = SessionState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", format_help());

    loop {
        print_prompt(&state)?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Ok(SessionCommand::Quit) => break,
                    Ok(SessionCommand::Fetch) => {
                        if !state.begin_fetch() {
                            println!("{}", "A fetch is already in flight.".yellow());
                            continue;
                        }
                        if global.verbose {
                            eprintln!("Fetching posts...");
                        }
                        spawn_fetch(pipeline.clone(), tx.clone());
                    }
                    Ok(command) => print!("{}", apply_command(&mut state, command)),
                    Err(message) => eprintln!("{}", message.red()),
                }
            }
            Some(result) = rx.recv() => {
                print!("{}", apply_fetch_result(&mut state, result));
            }
        }
    }

    Ok(())
}

/// Run one fetch in the background and send its outcome on `tx`
pub fn spawn_fetch<S, C, R>(
    pipeline: Arc<Mutex<Pipeline<S, C, R>>>,
    tx: mpsc::Sender<FetchResult>,
) -> tokio::task::JoinHandle<()>
where
    S: PostSource + 'static,
    C: Clock + 'static,
    R: Rng + Send + 'static,
{
    tokio::spawn(async move {
        let result = pipeline.lock().await.fetch_and_transform().await;
        if tx.send(result).await.is_err() {
            warn!("Session closed before the fetch finished");
        }
    })
}

fn print_prompt(state: &SessionState) -> Result<()> {
    print!("{} > ", f!("[{}]", state.fetch_label()).bright_black());
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")
}

/// Apply a finished fetch and render what the user should see
fn apply_fetch_result(state: &mut SessionState, result: FetchResult) -> String {
    match state.finish_fetch(result) {
        Ok(count) => {
            debug!("Replaced collection with {count} posts");
            format_post_list(state)
        }
        Err(err) => f!("{}\n", err.to_string().red()),
    }
}

/// Apply a command that does not touch the network
fn apply_command(state: &mut SessionState, command: SessionCommand) -> String {
    match command {
        SessionCommand::List => format_post_list(state),
        SessionCommand::Show(id) => match state.select(id) {
            Ok(post) => format_post_detail(post),
            Err(message) => f!("{}\n", message.red()),
        },
        SessionCommand::Back => {
            state.back();
            format_post_list(state)
        }
        SessionCommand::Delete(id) => match state.delete(id) {
            Ok(deleted) => {
                debug!("Deleted post {deleted}");
                f!(
                    "{}\n{}",
                    f!("Deleted post {deleted}.").green(),
                    format_post_list(state)
                )
            }
            Err(message) => f!("{}\n", message.red()),
        },
        SessionCommand::Edit => f!("{}\n", "Editing posts is not supported.".yellow()),
        SessionCommand::Help => format_help(),
        SessionCommand::Fetch | SessionCommand::Quit => String::new(),
    }
}

fn format_post_list(state: &SessionState) -> String {
    let posts = state.collection().posts();
    if posts.is_empty() {
        return f!(
            "{}\n",
            "No posts. Type 'fetch' to load some.".yellow()
        );
    }

    let mut table = new_table();
    table.set_titles(prettytable::row!["ID", "TITLE"]);
    for post in posts {
        table.add_row(prettytable::row![post.id, post.title]);
    }

    f!("\n{}\n", table)
}

fn format_post_detail(post: &PostRecord) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{} {}\n",
        f!("[{}]", post.id).yellow().bold(),
        post.title.white().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("\n{}\n", post.body));
    result.push_str(&f!(
        "\n{}: {}\n",
        "Image".green(),
        post.image_url.cyan().underline()
    ));
    result.push_str(&f!(
        "\n{}\n",
        "back | edit | delete".bright_black()
    ));

    result
}

fn format_help() -> String {
    let commands = [
        ("fetch", "Fetch a new batch of posts, replacing the current one"),
        ("list", "List the current posts"),
        ("show <id>", "Show a single post"),
        ("back", "Go back to the list"),
        ("delete [<id>]", "Delete a post, or the one being shown"),
        ("edit", "Edit the post being shown (not supported)"),
        ("help", "Show this help"),
        ("quit", "Leave the session"),
    ];

    let mut result = f!("\n{}\n", "COMMANDS".bright_white().bold());
    for (name, description) in commands {
        result.push_str(&f!("  {:<16} {}\n", name.cyan(), description));
    }
    result.push('\n');
    result
}
