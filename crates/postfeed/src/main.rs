use crate::prelude::*;
use clap::Parser;

mod error;
mod posts;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch posts from a content API and show them shuffled"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the content API serving `/posts`
    #[clap(
        long,
        env = "POSTFEED_BASE_URL",
        global = true,
        default_value = posts::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Seed for the title and body shuffling, for reproducible output
    #[clap(long, env = "POSTFEED_SEED", global = true)]
    seed: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "POSTFEED_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Fetch and browse posts
    Posts(crate::posts::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Posts(sub_app) => crate::posts::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
