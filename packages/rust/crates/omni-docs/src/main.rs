//! omni-docs CLI: document undocumented declarations, refresh stale comments.
//!
//! Settings come from `packages/conf/docs.yaml` and
//! `<config home>/omni-docs/settings.yaml`; flags override both.
//!
//! Logging: set `RUST_LOG=omni_docs=debug` (or pass `--verbose`) to see pipeline logs on stderr.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_ast::Lang;
use omni_docs::{
    DocPipeline, DocsConfig, adapter_for, discover_files, load_settings, set_config_home_override,
};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_docs=debug"
        } else {
            "omni_docs=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut config = DocsConfig::from_settings(load_settings());
    cli.apply(&mut config);

    if let Some(language) = &cli.print_rule {
        return print_rules(language, &config);
    }

    config.validate()?;
    let files = discover_files(&cli.paths, cli.glob.as_deref())?;
    tracing::info!(
        files = files.len(),
        missing = config.missing,
        update = config.update,
        dry_run = config.dry_run,
        mock = config.mock,
        "starting run"
    );

    let dry_run = config.dry_run;
    let summary = DocPipeline::from_config(config)
        .run(&files)
        .await
        .context("documentation run failed")?;

    if dry_run {
        for diff in summary.diffs() {
            println!("{diff}");
        }
    }
    print!("{}", summary.render_table());
    if !summary.failed_files.is_empty() {
        println!("{} file(s) skipped:", summary.failed_files.len());
        for file in &summary.failed_files {
            println!("  {file}");
        }
    }
    if summary.budget_exhausted {
        println!("edit budget exhausted after {} edits", summary.total_edits());
    }
    Ok(())
}

fn print_rules(language: &str, config: &DocsConfig) -> anyhow::Result<()> {
    let lang = Lang::try_from(language.trim_start_matches('.'))?;
    let adapter = adapter_for(lang);
    for (title, with_existing_doc) in [("missing", false), ("update", true)] {
        let rule = adapter.build_match_rule(
            &config.entity_kinds,
            config.exports_only,
            with_existing_doc,
        );
        println!("# {} ({title})", adapter.name());
        println!("{}", rule.to_json());
    }
    Ok(())
}
