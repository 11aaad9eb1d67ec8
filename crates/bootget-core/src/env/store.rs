//! Persisted variable store under the XDG state directory.
//!
//! The whole store is rewritten on every publish so a later `printenv` (or a
//! script reading `env.toml`) sees `fileaddr` even if the download that set it
//! never finishes.

use super::{format_hex, parse_hex, PublishError, ResultChannel};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct EnvStore {
    path: PathBuf,
    vars: BTreeMap<String, String>,
}

impl EnvStore {
    /// Open `~/.local/state/bootget/env.toml`, creating nothing until the first publish.
    pub fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("bootget")?;
        let path = xdg_dirs.get_state_home().join("bootget").join("env.toml");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let vars = if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read env store: {}", path.display()))?;
            toml::from_str(&data)
                .with_context(|| format!("invalid env store: {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            vars,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn get_hex(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(parse_hex)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(&self.vars)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ResultChannel for EnvStore {
    fn publish(&mut self, name: &str, value: u64) -> Result<(), PublishError> {
        let previous = self.vars.insert(name.to_string(), format_hex(value));
        if let Err(e) = self.save() {
            match previous {
                Some(old) => self.vars.insert(name.to_string(), old),
                None => self.vars.remove(name),
            };
            return Err(PublishError {
                name: name.to_string(),
                reason: format!("{:#}", e),
            });
        }
        tracing::debug!(name, value = %format_hex(value), "env updated");
        Ok(())
    }
}
