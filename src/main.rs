mod cli;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dirtree::fs::RealFileSystem;
use dirtree::core::write_tree;
use dirtree::{AnsiStyler, BuildOptions, DepthMap, Directory, PlainStyler, Styler, Summary, TreeBuilder};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dirtree: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("DIRTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let options = BuildOptions {
        max_concurrency: cli.max_concurrency,
    };
    let builder = TreeBuilder::with_options(RealFileSystem, &options)?;

    let trees = match &cli.spec {
        Some(spec_path) => {
            let map = read_depth_map(spec_path).await?;
            builder.build_many(&map).await?
        }
        None => {
            let root = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));
            let tree = builder
                .build(&root, cli.depth())
                .await
                .with_context(|| format!("cannot build tree for {}", root.display()))?;
            vec![tree]
        }
    };

    let use_colors = cli.color.enabled(io::stdout().is_terminal());
    let mut out = io::stdout().lock();
    print_trees(&mut out, cli, &trees, use_colors)?;
    out.flush()?;
    Ok(())
}

async fn read_depth_map(path: &Path) -> Result<DepthMap> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid depth map in {}", path.display()))
}

fn print_trees<W: Write>(
    out: &mut W,
    cli: &Cli,
    trees: &[Directory],
    use_colors: bool,
) -> Result<()> {
    if cli.json {
        match trees {
            [tree] if cli.spec.is_none() => serde_json::to_writer_pretty(&mut *out, tree)?,
            _ => serde_json::to_writer_pretty(&mut *out, trees)?,
        }
        writeln!(out)?;
    } else {
        let ansi = AnsiStyler::default();
        let styler: &dyn Styler = if use_colors {
            &ansi
        } else {
            &PlainStyler
        };
        for tree in trees {
            write_tree(out, tree, styler)?;
            writeln!(out)?;
        }
    }

    if cli.summary {
        writeln!(out)?;
        writeln!(out, "{}", Summary::of(trees))?;
    }

    Ok(())
}
