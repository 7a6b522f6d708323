use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use azwebapp::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web app HTTP API
    Serve(ServeOptions),

    /// List web apps
    List(ListOptions),

    /// Show a single web app as JSON
    Show(WebAppArgs),

    /// Show the app settings of a web app
    Settings(WebAppArgs),

    /// Create or update a web app on the configured app service plan
    Deploy(DeployArgs),

    /// Delete a web app
    Delete(WebAppArgs),

    /// Print the publish profile XML of a web app
    PublishProfile(WebAppArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on (defaults to SERVER_ADDRESS or 127.0.0.1:8080)
    #[clap(long)]
    pub address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    /// Only list web apps in this resource group
    #[clap(long)]
    pub resource_group: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct WebAppArgs {
    /// Resource group of the web app
    pub resource_group: String,
    /// Name of the web app
    pub web_app: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeployArgs {
    /// Resource group, created when missing
    pub resource_group: String,
    /// Location of the resource group and the web app
    pub location: String,
    /// Name of the web app
    pub web_app: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            init_tracing("info,azwebapp=debug,tower_http=debug");
            cli::serve(opt.address).await
        }
        Command::List(opt) => {
            init_tracing("warn");
            cli::list(opt.resource_group).await
        }
        Command::Show(app) => {
            init_tracing("warn");
            cli::show(app.resource_group, app.web_app).await
        }
        Command::Settings(app) => {
            init_tracing("warn");
            cli::settings(app.resource_group, app.web_app).await
        }
        Command::Deploy(opt) => {
            init_tracing("warn");
            cli::deploy(opt.resource_group, opt.location, opt.web_app).await
        }
        Command::Delete(app) => {
            init_tracing("warn");
            cli::delete(app.resource_group, app.web_app).await
        }
        Command::PublishProfile(app) => {
            init_tracing("warn");
            cli::publish_profile(app.resource_group, app.web_app).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
