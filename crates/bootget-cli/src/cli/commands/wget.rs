//! `bootget wget <url>` – fetch one file into the load buffer and save it.

use anyhow::{bail, Context, Result};
use bootget_core::config::BootgetConfig;
use bootget_core::env::{format_hex, EnvStore, MemoryEnv, ResultChannel};
use bootget_core::transport::CurlEngine;
use bootget_core::url_model::derive_output_filename;
use bootget_core::{run_to_completion, Download, Outcome};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for one `wget` invocation, after CLI parsing.
#[derive(Debug, Clone)]
pub struct WgetOptions {
    pub url: String,
    pub addr: Option<u64>,
    pub output: Option<PathBuf>,
    pub max_size: Option<usize>,
    pub save_env: bool,
}

pub fn run_wget(cfg: &BootgetConfig, opts: &WgetOptions) -> Result<()> {
    let base_address = opts.addr.unwrap_or(cfg.load_address);
    let capacity = opts.max_size.unwrap_or(cfg.buffer_size);
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(derive_output_filename(&opts.url)));

    let mut dest = vec![0u8; capacity];
    let mut engine = CurlEngine::new(cfg.transport.clone());

    let bytes = if opts.save_env {
        let mut store = EnvStore::open_default()?;
        download(&mut dest, base_address, &opts.url, &mut engine, &mut store)?
    } else {
        download(&mut dest, base_address, &opts.url, &mut engine, MemoryEnv::default())?
    };

    let data = dest.get(..bytes).context("download reported more bytes than the buffer holds")?;
    save_output(&output, data)?;
    println!(
        "{} bytes downloaded to {} (fileaddr={} filesize={})",
        bytes,
        output.display(),
        format_hex(base_address),
        format_hex(bytes as u64)
    );
    Ok(())
}

/// Runs one download into `dest` and returns the number of bytes received.
fn download<R: ResultChannel>(
    dest: &mut [u8],
    base_address: u64,
    url: &str,
    engine: &mut CurlEngine,
    results: R,
) -> Result<usize> {
    let mut dl = Download::new(dest, base_address, results);

    if let Err(err) = dl.request(url, engine) {
        let code = err.exit_code();
        return Err(anyhow::Error::new(err).context(format!("wget {url} failed (code {code})")));
    }

    let outcome = match run_to_completion(engine, &mut dl) {
        Ok(outcome) => outcome,
        Err(err) => {
            let code = err.exit_code();
            return Err(anyhow::Error::new(err).context(format!("wget {url} failed (code {code})")));
        }
    };

    match outcome {
        Outcome::Success { .. } => Ok(dl.session().total_bytes()),
        other => bail!("wget {url} failed (code {}): {}", other.exit_code(), other),
    }
}

fn save_output(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output dir {}", dir.display()))?;
    }
    fs::write(path, data).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::info!("saved {} bytes to {}", data.len(), path.display());
    Ok(())
}
