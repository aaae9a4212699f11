use std::error::Error as _;
use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{ProgressBar, ProgressStyle};
use zigtc_core::{ErrorClass, ItemState, ReleaseItem, ToolchainError};
use zigtc_installer::{ActivateOutcome, DownloadOutcome, DownloadProgress};
use zigtc_inventory::Inventory;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn current_output_style() -> OutputStyle {
    resolve_output_style(
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
    )
}

pub(crate) fn resolve_output_style(stdout_is_tty: bool, no_color: bool) -> OutputStyle {
    if stdout_is_tty && !no_color {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) fn format_remote_lines(inventory: &Inventory, style: OutputStyle) -> Vec<String> {
    let mut lines = vec![
        format!(
            "List of indexed zig versions ({} {}):",
            paint(style, active_style(), "[active]"),
            paint(style, downloaded_style(), "[downloaded]")
        ),
        String::new(),
    ];
    lines.extend(
        inventory
            .indexed()
            .map(|item| format_item_line(item, style, true)),
    );
    lines
}

pub(crate) fn format_local_lines(inventory: &Inventory, style: OutputStyle) -> Vec<String> {
    let mut lines = vec![
        format!(
            "List of downloaded zig versions ({}):",
            paint(style, active_style(), "[active]")
        ),
        String::new(),
    ];
    lines.extend(
        inventory
            .downloaded()
            .map(|item| format_item_line(item, style, false)),
    );
    lines
}

/// One `==> VERSION` row. Rich output carries the state in color, plain
/// output spells it out as a trailing tag.
fn format_item_line(item: &ReleaseItem, style: OutputStyle, mark_downloaded: bool) -> String {
    let version = item.version.to_string();
    let state = match item.state() {
        ItemState::Active => Some((active_style(), "[active]")),
        ItemState::Downloaded if mark_downloaded => Some((downloaded_style(), "[downloaded]")),
        ItemState::Downloaded | ItemState::NotDownloaded => None,
    };

    let mut line = match (style, state) {
        (OutputStyle::Rich, Some((color, _))) => {
            format!("{} {}", colorize(color, "==>"), colorize(color, &version))
        }
        (OutputStyle::Plain, Some((_, tag))) => format!("==> {version} {tag}"),
        (_, None) => format!("==> {version}"),
    };

    if item.master {
        line.push(' ');
        line.push_str(&paint(style, master_style(), "[master]"));
    }
    line
}

pub(crate) fn format_download_outcome(outcome: &DownloadOutcome, style: OutputStyle) -> String {
    match outcome {
        DownloadOutcome::AlreadyDownloaded { version, path } => render_status_line(
            style,
            "skip",
            &format!("{version} is already downloaded ({})", path.display()),
        ),
        DownloadOutcome::Downloaded { version, path } => render_status_line(
            style,
            "ok",
            &format!("downloaded {version} to {}", path.display()),
        ),
    }
}

pub(crate) fn format_activate_outcome(outcome: &ActivateOutcome, style: OutputStyle) -> String {
    match outcome {
        ActivateOutcome::AlreadyActive { version } => {
            render_status_line(style, "skip", &format!("{version} is already active"))
        }
        ActivateOutcome::Activated {
            version,
            install_dir,
            link,
        } => render_status_line(
            style,
            "ok",
            &format!(
                "activated {version}: {} -> {}",
                link.display(),
                install_dir.display()
            ),
        ),
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    let badge = format!("[{status}]");
    match style {
        OutputStyle::Plain => format!("{badge} {message}"),
        OutputStyle::Rich => format!("{} {message}", colorize(status_style(status), &badge)),
    }
}

/// Lines written to stderr for a failed run. Fatal errors also list their
/// cause chain.
pub(crate) fn format_error_lines(err: &ToolchainError) -> Vec<String> {
    let mut lines = vec![format!("error: {err}")];
    if err.class() == ErrorClass::Fatal {
        let mut source = err.source();
        while let Some(cause) = source {
            lines.push(format!("  caused by: {cause}"));
            source = cause.source();
        }
    }
    lines
}

/// Byte progress for a single archive download; silent in plain mode.
pub(crate) struct DownloadBar {
    progress_bar: Option<ProgressBar>,
}

impl DownloadBar {
    pub(crate) fn start(style: OutputStyle, label: &str) -> Self {
        if style == OutputStyle::Plain {
            return Self { progress_bar: None };
        }

        let progress_bar = ProgressBar::no_length();
        if let Ok(template) = ProgressStyle::with_template(
            "{spinner:.cyan.bold} {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec}",
        ) {
            progress_bar.set_style(template.progress_chars("=>-"));
        }
        progress_bar.set_message(label.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(80));
        Self {
            progress_bar: Some(progress_bar),
        }
    }

    pub(crate) fn update(&self, progress: DownloadProgress) {
        let Some(progress_bar) = &self.progress_bar else {
            return;
        };
        if let Some(total) = progress.total {
            progress_bar.set_length(total);
        }
        progress_bar.set_position(progress.downloaded);
    }

    pub(crate) fn finish(mut self) {
        if let Some(progress_bar) = self.progress_bar.take() {
            progress_bar.finish_and_clear();
        }
    }
}

fn active_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::Green.into()))
}

fn downloaded_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::Blue.into()))
}

fn master_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::Red.into()))
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "ok" => AnsiColor::BrightGreen,
        "skip" => AnsiColor::BrightYellow,
        _ => AnsiColor::BrightCyan,
    };
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn paint(style: OutputStyle, color: Style, text: &str) -> String {
    match style {
        OutputStyle::Plain => text.to_string(),
        OutputStyle::Rich => colorize(color, text),
    }
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
