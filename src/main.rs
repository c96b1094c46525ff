//! crxload CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use crxload::{parse_store_url, Extension, Settings};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crxload")]
#[command(about = "Download and unpack Chrome Web Store extensions for automated browsers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the name and id encoded in a store link
    Parse {
        /// Chrome Web Store link
        link: String,
    },

    /// Download the extension if needed and print the launch argument
    Load {
        #[command(flatten)]
        target: Target,

        /// Download even if the unpacked copy is up to date
        #[arg(short, long)]
        force: bool,

        /// Print the bare path instead of --load-extension=<path>
        #[arg(long)]
        path_only: bool,

        /// Configuration entry KEY=VALUE (VALUE is parsed as JSON, else kept as text)
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, Value)>,

        /// Chrome version reported to the update service
        #[arg(long)]
        chrome_version: Option<String>,
    },

    /// List files of an unpacked extension
    Files {
        #[command(flatten)]
        target: Target,

        #[arg(short, long, value_enum, default_value_t = FileKind::All)]
        kind: FileKind,
    },
}

#[derive(Args)]
struct Target {
    /// Chrome Web Store link
    #[arg(short, long, conflicts_with_all = ["id", "name"])]
    link: Option<String>,

    /// 32-letter extension id
    #[arg(long, requires = "name")]
    id: Option<String>,

    /// Directory name under extensions/
    #[arg(long, requires = "id")]
    name: Option<String>,

    /// Base directory (defaults to the current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FileKind {
    Js,
    Json,
    Html,
    Css,
    All,
}

impl FileKind {
    fn suffix(self) -> &'static str {
        match self {
            FileKind::Js => ".js",
            FileKind::Json => ".json",
            FileKind::Html => ".html",
            FileKind::Css => ".css",
            FileKind::All => "",
        }
    }
}

fn parse_option(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err("option key must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

impl Target {
    fn builder(&self, settings: Settings) -> crxload::ExtensionBuilder {
        let mut builder = Extension::builder().settings(settings);
        if let Some(link) = &self.link {
            builder = builder.link(link.clone());
        }
        if let Some(id) = &self.id {
            builder = builder.id(id.clone());
        }
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        builder
    }

    fn settings(&self) -> Settings {
        let settings = Settings::default();
        match &self.dir {
            Some(dir) => settings.with_base_dir(dir.clone()),
            None => settings,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,crxload=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", "❌ Failed!".red().bold());
        eprintln!("{}", format!("Error: {e:#}").red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse { link } => {
            let (name, id) = parse_store_url(&link)?;
            println!("{} {}", "Name:".bold(), name);
            println!("{} {}", "Id:  ".bold(), id);
        }

        Commands::Load { target, force, path_only, options, chrome_version } => {
            let mut settings = target.settings();
            if let Some(version) = chrome_version {
                settings = settings.with_chrome_version(version);
            }

            let mut builder = target.builder(settings).force_update(force);
            for (key, value) in options {
                builder = builder.option(key, value);
            }
            let extension = builder.build().context("invalid extension")?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner());
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner.set_message(format!("Preparing {} ...", extension.name()));

            let result = extension.load(!path_only);
            spinner.finish_and_clear();

            println!("{}", result?);
        }

        Commands::Files { target, kind } => {
            let extension = target.builder(target.settings()).build()?;
            if !extension.exists() {
                println!(
                    "{}",
                    format!("{} is not unpacked yet, run `crxload load` first", extension.name()).yellow()
                );
                return Ok(());
            }

            let files = extension.files(kind.suffix());
            for file in &files {
                let relative = file.path().strip_prefix(extension.absolute_path()).unwrap_or(file.path());
                println!("  📄 {}", relative.display().to_string().cyan());
            }
            println!();
            println!("{} file(s) in {}", files.len(), extension.absolute_path().display());
        }
    }

    Ok(())
}
