use crate::core::config::Config;
use std::collections::btree_set::BTreeSet;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Eq)]
pub struct EnvVar {
    key: String,
    value: String,
}

impl PartialEq for EnvVar {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Ord for EnvVar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for EnvVar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl Hash for EnvVar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // only hash by the key name
        self.key.hash(state);
    }
}

impl EnvVar {
    pub fn with(key: &str, value: &str) -> Self {
        Self::new().key(key).value(value)
    }

    pub fn new() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Sets the environment key.
    pub fn key(mut self, s: &str) -> Self {
        // normalize the key name upon entry
        self.key = s.to_ascii_uppercase().replace('-', "_");
        self
    }

    /// Sets the environment value.
    pub fn value(mut self, s: &str) -> Self {
        self.value = s.to_owned();
        self
    }

    pub fn get_key(&self) -> &str {
        &self.key
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

impl std::fmt::Display for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

pub struct Environment(BTreeSet<EnvVar>);

impl Environment {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, var: EnvVar) -> bool {
        self.0.insert(var)
    }

    pub fn add(mut self, var: EnvVar) -> Self {
        self.0.insert(var);
        self
    }

    pub fn get(&self, key: &str) -> Option<&EnvVar> {
        self.0.get(&EnvVar::new().key(key))
    }

    /// Loads an `Environment` from the `[env]` table of a `Config` document.
    ///
    /// These variables are handed to the spawned toolchain processes, which
    /// lets a configuration forward vendor settings (license servers, install
    /// paths) without touching the caller's shell profile.
    pub fn from_config(mut self, config: &Config) -> Self {
        if let Some(map) = config.get_env() {
            map.iter().for_each(|(key, val)| {
                self.insert(EnvVar::new().key(key).value(val));
            });
        }
        self
    }

    pub fn into_map(&self) -> HashMap<&String, &String> {
        self.0.iter().map(|v| (&v.key, &v.value)).collect()
    }
}

pub const XBENCH_HOME: &str = "XBENCH_HOME";
pub const XBENCH_TEMP_DIR: &str = "XBENCH_TEMP_DIR";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_key_names() {
        let var = EnvVar::new().key("xilinxd-license-file").value("2100@acme");
        assert_eq!(var.get_key(), "XILINXD_LICENSE_FILE");
        assert_eq!(var.get_value(), "2100@acme");
    }

    #[test]
    fn overwrite_by_key() {
        let mut env = Environment::new();
        env.insert(EnvVar::with("A", "1"));
        // keys compare equal regardless of value
        assert_eq!(env.insert(EnvVar::with("A", "2")), false);
        assert_eq!(env.get("A").unwrap().get_value(), "1");
    }
}
