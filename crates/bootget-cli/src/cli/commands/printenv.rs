//! `bootget printenv [name]` – show stored result variables.

use anyhow::{bail, Result};
use bootget_core::env::EnvStore;

pub fn run_printenv(name: Option<&str>) -> Result<()> {
    let store = EnvStore::open_default()?;
    match name {
        Some(name) => match store.get(name) {
            Some(value) => println!("{name}={value}"),
            None => bail!("\"{name}\" not defined in {}", store.path().display()),
        },
        None => {
            for (name, value) in store.iter() {
                println!("{name}={value}");
            }
        }
    }
    Ok(())
}
