//! Command line front end.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::links::LinkHandlerFinder;
use crate::app::service::LinkService;
use crate::domain::model::{LinkType, Selection};
use crate::infra::clipboard;
use crate::infra::config::Config;
use crate::infra::git::GitCli;

#[derive(Debug, Parser)]
#[command(author, version, about = "Build web links to files in Git repositories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the web link for a file
    Link {
        file: PathBuf,
        /// Lines to highlight: `12`, `12-20` or `12:5-20:9`
        #[arg(short, long, value_name = "RANGE")]
        lines: Option<Selection>,
        /// Link to the current branch or the current commit
        #[arg(short = 't', long, value_enum)]
        link_type: Option<LinkType>,
        /// Also copy the link to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print the link and its provider as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the provider that handles a remote URL
    Handler { remote: String },
    /// List providers in the order they are tried
    Handlers,
    /// Generate shell completions
    Completions { shell: Shell },
}

/// Parse the process arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Link {
            file,
            lines,
            link_type,
            copy,
            json,
        } => {
            let config = Config::load(&file)?;
            let link_type = link_type.unwrap_or_else(|| config.links.link_type());
            let finder = LinkHandlerFinder::new(&config);
            let git = GitCli::new();

            let link = LinkService::new(&git, &finder)
                .link_for(&file, lines.as_ref(), link_type)
                .with_context(|| format!("failed to create a link for {}", file.display()))?;

            if json {
                serde_json::to_writer(&mut out, &link).context("failed to write JSON")?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", link.url)?;
            }

            if copy {
                let backend = clipboard::copy_link(&link.url)?;
                tracing::info!(%backend, "link copied");
            }
        }
        Commands::Handler { remote } => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            let config = Config::load(&cwd)?;
            let finder = LinkHandlerFinder::new(&config);
            match finder.find_for_remote(&remote) {
                Some(handler) => writeln!(out, "{}", handler.name())?,
                None => bail!("unsupported hosting provider for remote {remote}"),
            }
        }
        Commands::Handlers => {
            for handler in LinkHandlerFinder::default().handlers() {
                writeln!(out, "{}", handler.name())?;
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut out);
        }
    }

    Ok(())
}
