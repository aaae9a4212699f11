use std::path::Path;

use anyhow::Result;
use log::debug;
use reqwest::blocking::Client;
use zigtc_core::{ToolchainError, VersionSelector};
use zigtc_installer::{activate_selected, download_archive, download_selected, extract_archive};
use zigtc_inventory::{reconcile, Inventory};
use zigtc_registry::{fetch_index, http_client};

use crate::config::ToolchainConfig;
use crate::render::{
    current_output_style, format_activate_outcome, format_download_outcome, format_local_lines,
    format_remote_lines, render_status_line, DownloadBar, OutputStyle,
};
use crate::{Cli, Commands};

/// A command with its version argument already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    ListRemote,
    ListLocal,
    Download(VersionSelector),
    Activate(VersionSelector),
}

impl Action {
    pub(crate) fn from_command(command: Commands) -> Result<Self, ToolchainError> {
        Ok(match command {
            Commands::List => Self::ListRemote,
            Commands::Show => Self::ListLocal,
            Commands::Download { version } => Self::Download(version.parse()?),
            Commands::Activate { version } => Self::Activate(version.parse()?),
        })
    }
}

pub(crate) fn run_cli(cli: Cli) -> Result<(), ToolchainError> {
    let action = Action::from_command(cli.command)?;
    let config = ToolchainConfig::from_env()?;
    let output_style = current_output_style();
    let client = http_client()?;
    let mut inventory = load_inventory(&config, &client)?;

    match action {
        Action::ListRemote => print_lines(&format_remote_lines(&inventory, output_style)),
        Action::ListLocal => print_lines(&format_local_lines(&inventory, output_style)),
        Action::Download(selector) => {
            let outcome = download_selected(&mut inventory, &selector, |url, destination| {
                fetch_archive(&client, output_style, url, destination)
            })?;
            println!("{}", format_download_outcome(&outcome, output_style));
        }
        Action::Activate(selector) => {
            let outcome = activate_selected(
                &config.layout,
                config.host,
                &mut inventory,
                &selector,
                |url, destination| fetch_archive(&client, output_style, url, destination),
                |archive, destination| {
                    println!(
                        "{}",
                        render_status_line(
                            output_style,
                            "step",
                            &format!("extracting {}", archive.display())
                        )
                    );
                    extract_archive(archive, destination)
                },
            )?;
            println!("{}", format_activate_outcome(&outcome, output_style));
        }
    }

    Ok(())
}

fn load_inventory(config: &ToolchainConfig, client: &Client) -> Result<Inventory, ToolchainError> {
    config.layout.ensure_base_dirs()?;
    let index = fetch_index(client, &config.index_url)?;
    let observations = config.layout.observe(config.host, &index)?;
    let inventory = reconcile(&observations)?;
    debug!("inventory has {} items", inventory.len());
    Ok(inventory)
}

fn fetch_archive(
    client: &Client,
    output_style: OutputStyle,
    url: &str,
    destination: &Path,
) -> Result<()> {
    println!(
        "{}",
        render_status_line(output_style, "step", &format!("downloading {url}"))
    );
    let bar = DownloadBar::start(output_style, "download");
    let result = download_archive(client, url, destination, |progress| bar.update(progress));
    bar.finish();
    result.map(|_| ())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
