use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use maildex_git::GitSource;
use maildex_index::{last_indexed_at, InMemoryIndex, MessageIndex};
use maildex_ingest::collect_pending;
use maildex_mail::{MessageParser, Rfc822Parser};
use maildex_types::{BlobId, MessageSource};

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        git_dir,
        config,
        format,
    } = cli;
    let config = Config::resolve(config.as_deref())?;
    let source = git_dir.or_else(|| config.git_dir.clone()).map(GitSource::new);
    match command {
        Command::Scan(args) => cmd_scan(args, source.as_ref(), &config, &format),
        Command::Cat(args) => cmd_cat(args, require_source(source)?),
        Command::Extract(args) => cmd_extract(args, require_source(source)?),
        Command::Show(args) => cmd_show(args, require_source(source)?, &format),
    }
}

fn require_source(source: Option<GitSource>) -> anyhow::Result<GitSource> {
    source.context("no repository configured: pass --git-dir or set git_dir in the config file")
}

fn cmd_scan(
    args: ScanArgs,
    source: Option<&GitSource>,
    config: &Config,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let Some(source) = source else {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Text => println!("No repository configured; nothing to scan."),
        }
        return Ok(());
    };

    let index = match &args.known {
        Some(path) => load_known(path)?,
        None => InMemoryIndex::new(),
    };
    let since = if args.full {
        None
    } else {
        config.database.as_deref().and_then(last_indexed_at)
    };
    tracing::debug!(?since, known = index.len()?, "starting scan");
    let pending = collect_pending(Some(source), &index, since);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pending)?),
        OutputFormat::Text => {
            for message in &pending {
                if let Some(id) = message.source.blob_id() {
                    println!("  {} {}", "new:".green(), id);
                }
            }
            let noun = if pending.len() == 1 { "message" } else { "messages" };
            println!(
                "{} {} new {} in {}",
                "✓".green().bold(),
                pending.len().to_string().bold(),
                noun,
                source.git_dir().display().to_string().bold(),
            );
        }
    }
    Ok(())
}

fn cmd_cat(args: CatArgs, source: GitSource) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let data = source.read_blob(&id)?;
    std::io::stdout().write_all(&data)?;
    Ok(())
}

fn cmd_extract(args: ExtractArgs, source: GitSource) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    source.extract_blob(&id, &args.dest)?;
    println!(
        "{} Extracted {} to {}",
        "✓".green().bold(),
        id.short().yellow(),
        args.dest.display().to_string().bold(),
    );
    Ok(())
}

fn cmd_show(args: ShowArgs, source: GitSource, format: &OutputFormat) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let data = source.read_blob(&id)?;
    let message = Rfc822Parser::new()
        .parse(id.as_str(), &data)
        .with_context(|| format!("blob {} is not a message", id.short()))?;

    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "source": message.source(),
                "headers": message.headers(),
                "body": message.body_text(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            println!("{} {}", "Message".bold(), id.short().yellow());
            for header in message.headers() {
                println!("  {}: {}", header.name.cyan(), header.value);
            }
            println!();
            print!("{}", message.body_text());
        }
    }
    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<BlobId> {
    BlobId::parse(&raw.to_ascii_lowercase()).with_context(|| format!("`{raw}` is not a blob id"))
}

/// Read a file of blob ids, one per line, into an index — stands in for a
/// message database written by an earlier indexing run.
fn load_known(path: &Path) -> anyhow::Result<InMemoryIndex> {
    let text =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    let index = InMemoryIndex::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let id = BlobId::parse(line)
            .with_context(|| format!("{}:{}: not a blob id", path.display(), lineno + 1))?;
        index.record(MessageSource::git_blob(id))?;
    }
    Ok(index)
}
