use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use doc_intake::export::ExportFormat;
use doc_intake::session::overlay::OverlayKind;
use doc_intake::session::Session;
use doc_intake::{IntakeConfig, RawFile};

#[derive(Parser)]
#[command(name = "doc-intake")]
#[command(about = "Validate, preview and export uploaded documents", long_about = None)]
pub struct Cli {
    /// Per-file size limit in bytes (overrides DOC_INTAKE_MAX_FILE_SIZE)
    #[arg(long, global = true)]
    pub max_file_size: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a batch of files through the intake and show the results
    Process {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Export the extracted content (json, markdown or all); repeatable
        #[arg(short, long)]
        export: Vec<ExportFormat>,

        /// Directory exports are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Select the Nth accepted file (1-based) and print the viewer
        #[arg(short, long)]
        select: Option<usize>,

        /// Overlay to switch on in the viewer; repeatable
        #[arg(long = "overlay")]
        overlays: Vec<OverlayKind>,

        /// Wait for image previews before printing
        #[arg(short, long)]
        wait_previews: bool,
    },

    /// Show the declared type of a file and whether the intake accepts it
    Inspect {
        file: PathBuf,
    },

    /// Print the intake policy
    Policy,
}

pub fn load_config(cli: &Cli) -> anyhow::Result<IntakeConfig> {
    let mut config = IntakeConfig::from_env().context("failed to load configuration")?;
    if let Some(limit) = cli.max_file_size {
        config.max_file_size = limit;
    }
    Ok(config)
}

pub async fn execute_command(config: IntakeConfig, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Process { files, export, output_dir, select, overlays, wait_previews } => {
            let mut batch = Vec::with_capacity(files.len());
            for path in &files {
                let raw = RawFile::from_path(path)
                    .await
                    .with_context(|| format!("cannot read {}", path.display()))?;
                debug!(file = %raw.name, media_type = %raw.media_type, "candidate read");
                batch.push(raw);
            }

            let mut session = Session::new(&config);
            let ids = session.upload(batch).await?;

            if wait_previews {
                session.wait_for_previews().await;
            } else {
                session.drain_previews();
            }

            for file in session.files() {
                println!("accepted {} ({}, {}) id={}", file.name, file.media_type, file.size_label(), file.id);
                if let Some(preview) = &file.preview {
                    println!("  preview {} bytes", preview.len());
                }
            }
            if let Some(error) = session.error() {
                println!("error: {}", error);
            }
            for language in session.languages() {
                println!("language {} {}", language.language, language.confidence_label());
            }
            println!("summary: {}", session.summary());

            for kind in overlays {
                session.toggle_overlay(kind);
            }
            if let Some(n) = select {
                let Some(id) = n.checked_sub(1).and_then(|i| ids.get(i)) else {
                    bail!("--select {} is out of range ({} accepted)", n, ids.len());
                };
                session.select(id)?;
                println!("{}", serde_json::to_string_pretty(&session.viewer())?);
            }

            if !export.is_empty() {
                let dir = output_dir.unwrap_or_else(|| config.export_dir.clone());
                for format in export {
                    match session.export_to(format, &dir).await? {
                        Some(path) => println!("exported {}", path.display()),
                        None => println!("nothing to export as {}", format),
                    }
                }
            }
        }
        Commands::Inspect { file } => {
            let raw = RawFile::from_path(&file)
                .await
                .with_context(|| format!("cannot read {}", file.display()))?;
            let session = Session::new(&config);
            let policy = session.policy();

            println!("name: {}", raw.name);
            println!("media type: {}", raw.media_type);
            println!("size: {} bytes", raw.size);
            match policy.check(&raw) {
                Ok(()) => println!("verdict: accepted"),
                Err(rejection) => println!("verdict: rejected ({})", rejection),
            }
        }
        Commands::Policy => {
            let session = Session::new(&config);
            let policy = session.policy();
            println!("accepted types:");
            for media_type in policy.accepted_types() {
                println!("  {}", media_type);
            }
            println!("max file size: {} bytes", policy.max_file_size());
        }
    }

    Ok(())
}
