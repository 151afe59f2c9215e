//! Facet filter CLI.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use facet_cli::commands::{apply, apply_exit_code, browse, browse_exit_code};
use facet_cli::logging::{LogConfig, LogFormat, init_logging};
use facet_cli::render::{render_error, render_facets, render_result};
use facet_client::{ClientConfig, HttpBackend};

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {}", render_error(&error));
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> anyhow::Result<i32> {
    let backend = backend_from_cli(cli)?;
    tracing::info!("Using backend {}", backend.base_url());

    let code = match &cli.command {
        Command::Browse(args) => {
            let view = browse(backend, &args.selections()).await;
            println!("{}", render_facets(&view));
            browse_exit_code(&view)
        }
        Command::Apply(args) => {
            let view = apply(backend, &args.selections()).await;
            println!("{}", render_facets(&view));
            if let Some(result) = render_result(&view.result) {
                println!();
                println!("{result}");
            }
            apply_exit_code(&view)
        }
    };
    Ok(code)
}

/// Config file values, then command-line overrides.
fn backend_from_cli(cli: &Cli) -> anyhow::Result<HttpBackend> {
    let mut config =
        ClientConfig::load(cli.config.as_deref()).context("failed to load client config")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if cli.timeout.is_some() {
        config = config.with_request_timeout_secs(cli.timeout);
    }
    HttpBackend::new(&config).context("failed to set up backend")
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
