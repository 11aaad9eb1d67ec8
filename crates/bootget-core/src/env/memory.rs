//! In-process variable store (dry runs, tests).

use super::{format_hex, parse_hex, PublishError, ResultChannel};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn get_hex(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(parse_hex)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ResultChannel for MemoryEnv {
    fn publish(&mut self, name: &str, value: u64) -> Result<(), PublishError> {
        self.vars.insert(name.to_string(), format_hex(value));
        Ok(())
    }
}
