//! ConnectAPI search page - Entry Point

use clap::Parser;
use connectapi::backend::{HttpBackend, SearchBackend};
use connectapi::command::{parse_command, Command, HELP};
use connectapi::identity::{
    CredentialStore, FileCredentialStore, IdentityResolver, JwtDecoder, StaticCredentialStore,
};
use connectapi::model::AppError;
use connectapi::render::render_page;
use connectapi::{Controller, ControllerOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// ConnectAPI - search the public API directory
#[derive(Parser, Debug)]
#[command(name = "connectapi")]
#[command(version)]
#[command(about = "Search the ConnectAPI directory, or browse trending APIs")]
pub struct Args {
    /// Search query (shows trending APIs when omitted)
    pub query: Vec<String>,

    /// Read queries and commands from stdin until :quit
    #[arg(short, long)]
    pub interactive: bool,

    /// Expand the card with this id in the output
    #[arg(long, value_name = "ID")]
    pub open: Option<String>,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// File holding the stored user token
    #[arg(long, value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Ignore responses to searches that were superseded by a newer one
    #[arg(long)]
    pub discard_stale: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Positional words joined into one query; `None` when none were given.
    fn query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = connectapi::config::load_config_with_precedence(args.config.clone())?;
        let merged = connectapi::config::merge_config(config_file);
        let with_env = connectapi::config::apply_env_overrides(merged);
        let discard_override = args.discard_stale.then_some(true);
        connectapi::config::apply_cli_overrides(
            with_env,
            args.api_url.clone(),
            args.token_file.clone(),
            discard_override,
        )
    };

    connectapi::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // The store is read exactly once; identity and auth share the value.
    let credential = FileCredentialStore::new(&config.credential_path).credential();
    let bearer = credential.clone().filter(|_| config.auth_header);
    let resolver = IdentityResolver::new(StaticCredentialStore::new(credential), JwtDecoder::new());

    let backend = Arc::new(HttpBackend::new(
        config.api_base_url.clone(),
        config.request_timeout(),
        bearer,
    ));
    let mut controller = Controller::init(backend, &resolver, ControllerOptions::from(&config));

    if args.interactive {
        run_interactive(controller).await?;
        return Ok(());
    }

    if let Some(query) = args.query() {
        controller.submit(query);
    }
    controller.settle_all().await;
    if let Some(id) = args.open {
        controller.toggle(id);
    }
    print!("{}", render_page(&controller.view().page()));

    Ok(())
}

/// Line-oriented event loop: stdin lines and backend settlements are
/// handled as they arrive, one at a time.
async fn run_interactive<B: SearchBackend>(mut controller: Controller<B>) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print!("{}", render_page(&controller.view().page()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Search(query) => {
                        controller.submit(query);
                    }
                    Command::Toggle(id) => controller.toggle(id),
                    Command::Dismiss => {
                        controller.dismiss_error();
                    }
                    Command::Help => {
                        println!("{HELP}");
                        continue;
                    }
                    Command::Quit => break,
                    Command::Unknown(input) => {
                        println!("Unknown command: {input} (try :help)");
                        continue;
                    }
                }
            }
            Some(settlement) = controller.next_settlement() => {
                controller.apply(settlement);
            }
        }

        println!();
        print!("{}", render_page(&controller.view().page()));
    }

    info!("Interactive session ended");
    Ok(())
}
