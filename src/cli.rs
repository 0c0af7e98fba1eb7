//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::backends::walk::WalkOptions;
use crate::core::config::{CheckConfig, DEFAULT_EXTENSION};
use crate::core::render::{OutputFormat, RenderConfig};

/// refcheck - verify cross-references in AsciiDoc documents.
#[derive(Parser, Debug)]
#[command(name = "refcheck")]
#[command(
    author,
    version,
    about,
    long_about = r#"refcheck scans AsciiDoc documents for anchors and cross-references and
reports every reference that does not resolve.

Internal references (<<name>>) must match an anchor declared in the same
document. External references (<<file.adoc#name>>, xref:file.adoc#name[])
must point at an existing file that declares [[name]].

Output formats:
- text: one line per message plus a summary (default)
- jsonl: one JSON object per message
- json: a single JSON array of per-document reports
- md: human-friendly Markdown

The exit status is 0 when every document passes and 1 otherwise.

Examples:
    refcheck check docs/
    refcheck check guide.adoc --base .
    refcheck --format jsonl check docs/ --jobs 8
    refcheck list docs/intro.adoc
"#
)]
pub struct Cli {
    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        env = "REFCHECK_FORMAT",
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Document file extension.
    #[arg(
        long,
        global = true,
        env = "REFCHECK_EXTENSION",
        default_value = DEFAULT_EXTENSION,
        value_name = "EXT",
        long_help = "File extension of documents. Used to pick documents when walking\n\
directories and to tell external references from internal ones.\n\n\
A missing leading dot is added."
    )]
    pub extension: String,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored severity tags. This is useful when piping to files or when\n\
your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only print error messages in text and md output, without the summary line.\n\
Machine-readable formats are unaffected."
    )]
    pub quiet: bool,

    /// Verbose logging on stderr (-v info, -vv debug).
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        long_help = "Increase log verbosity on stderr. -v logs each checked document,\n\
-vv adds per-reference detail. RUST_LOG overrides this when set."
    )]
    pub verbose: u8,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on text/md formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that every reference in the given documents resolves.
    #[command(
        long_about = "Scan each document, then validate its internal and external references.\n\
Directories are walked for documents with the configured extension.\n\n\
Examples:\n\
  refcheck check docs/\n\
  refcheck check a.adoc b.adoc --base docs\n\
  refcheck check docs/ --hidden --no-ignore --jobs 4\n"
    )]
    Check {
        /// Documents or directories to check.
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Base path for document names in messages.
        #[arg(
            long,
            value_name = "DIR",
            long_help = "Document names in messages are shown relative to this directory.\n\n\
If omitted, documents found by walking a directory are shown relative to that\n\
directory and documents given directly are shown as given."
        )]
        base: Option<PathBuf>,

        /// Maximum concurrent external checks per document.
        #[arg(
            long,
            env = "REFCHECK_JOBS",
            value_name = "N",
            long_help = "Limit the number of external reference checks in flight for one\n\
document. If omitted (or 0), every unique target is checked at once."
        )]
        jobs: Option<usize>,

        /// Include hidden files/directories (dotfiles).
        #[arg(long)]
        hidden: bool,

        /// Disable .gitignore and other ignore rules.
        #[arg(long)]
        no_ignore: bool,

        /// Maximum directory depth when walking.
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },

    /// List anchors and references found in documents without validating.
    #[command(
        long_about = "Scan each document and print the anchors it declares and the internal\n\
and external references it makes. Duplicate anchors are reported.\n\n\
Examples:\n\
  refcheck list docs/intro.adoc\n\
  refcheck --format json list docs/\n"
    )]
    List {
        /// Documents or directories to list.
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Base path for document names.
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,

        /// Include hidden files/directories (dotfiles).
        #[arg(long)]
        hidden: bool,

        /// Disable .gitignore and other ignore rules.
        #[arg(long)]
        no_ignore: bool,
    },
}

/// Run the CLI with parsed arguments; returns whether everything passed
pub async fn run(cli: Cli) -> Result<bool> {
    let format: OutputFormat = cli.format.parse().map_err(|e: String| anyhow!(e))?;
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_color(!cli.no_color)
        .with_quiet(cli.quiet);

    match cli.command {
        Commands::Check {
            paths,
            base,
            jobs,
            hidden,
            no_ignore,
            max_depth,
        } => {
            let config = CheckConfig::new(&cli.extension, jobs);
            let options = WalkOptions {
                hidden,
                ignore: !no_ignore,
                max_depth,
            };
            crate::refs::api::run_check(&paths, base.as_deref(), options, &config, render_config)
                .await
        }

        Commands::List {
            paths,
            base,
            hidden,
            no_ignore,
        } => {
            let config = CheckConfig::new(&cli.extension, None);
            let options = WalkOptions {
                hidden,
                ignore: !no_ignore,
                ..Default::default()
            };
            crate::refs::api::run_list(&paths, base.as_deref(), options, &config, render_config)
                .await
        }
    }
}
