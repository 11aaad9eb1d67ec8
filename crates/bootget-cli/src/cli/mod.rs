//! CLI for bootget.

mod commands;

use anyhow::Result;
use bootget_core::config;
use bootget_core::env::parse_hex;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_printenv, run_wget, WgetOptions};

/// Top-level CLI for bootget.
#[derive(Debug, Parser)]
#[command(name = "bootget")]
#[command(about = "bootget: fetch one file over plain HTTP into a load buffer", long_about = None)]
pub struct Cli {
    /// Log filter directives, overriding RUST_LOG (e.g. "debug").
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download http://<host>[:<port>]/<path> into the load buffer and save it.
    Wget {
        /// http:// URL to fetch.
        url: String,

        /// Load address the buffer is published under (hex, 0x optional). Defaults to config.
        #[arg(short, long, value_parser = parse_load_address, value_name = "ADDR")]
        addr: Option<u64>,

        /// File to save the downloaded bytes to. Defaults to the last URL path segment.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Capacity of the load buffer in bytes. Defaults to config.
        #[arg(long, value_name = "BYTES")]
        max_size: Option<usize>,

        /// Keep fileaddr/filesize in memory instead of the persisted env store.
        #[arg(long)]
        no_save_env: bool,
    },

    /// Print stored result variables (fileaddr, filesize).
    Printenv {
        /// Print only this variable.
        name: Option<String>,
    },
}

/// Parse a load address in hex, with or without `0x`.
pub(crate) fn parse_load_address(s: &str) -> Result<u64, String> {
    parse_hex(s).ok_or_else(|| format!("invalid hex address: {s}"))
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Wget {
                url,
                addr,
                output,
                max_size,
                no_save_env,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = WgetOptions {
                    url,
                    addr,
                    output,
                    max_size,
                    save_env: !no_save_env,
                };
                run_wget(&cfg, &opts)?;
            }
            CliCommand::Printenv { name } => run_printenv(name.as_deref())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
