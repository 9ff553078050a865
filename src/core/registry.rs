use crate::error::Error;
use crate::error::Hint;
use crate::error::LastError;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

pub const REGISTRY_FILE: &str = "testbenches.toml";

/// A registered testbench, keyed in the registry by its fully-qualified
/// entity name.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Testbench {
    module: String,
    files: PathBuf,
    #[serde(rename = "batch-script")]
    batch_script: PathBuf,
    #[serde(rename = "gui-script")]
    gui_script: PathBuf,
    waveform: Option<PathBuf>,
}

impl Testbench {
    /// Name of the top-level testbench entity to elaborate and simulate.
    pub fn get_module(&self) -> &str {
        &self.module
    }

    /// Path to the file-list manifest, relative to the project root.
    pub fn get_files(&self) -> &PathBuf {
        &self.files
    }

    pub fn get_batch_script(&self) -> &PathBuf {
        &self.batch_script
    }

    pub fn get_gui_script(&self) -> &PathBuf {
        &self.gui_script
    }

    pub fn get_waveform(&self) -> Option<&PathBuf> {
        self.waveform.as_ref()
    }

    /// Displays a testbench's information in a single line for quick glance.
    pub fn quick_info(&self, fqn: &str) -> String {
        format!("{:<32}{}", fqn, self.files.display())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    testbench: HashMap<String, Testbench>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            testbench: HashMap::new(),
        }
    }

    pub fn from_file(path: &PathBuf) -> Result<Self, Error> {
        let contents = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(Error::RegistryNotRead(path.clone(), LastError(e.to_string()))),
        };
        match Self::from_str(&contents) {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::RegistryParseFailed(
                path.clone(),
                LastError(e.to_string()),
            )),
        }
    }

    /// Finds the testbench stored under the fully-qualified name `fqn`.
    ///
    /// This check happens before any file-list is read from disk.
    pub fn get(&self, fqn: &str) -> Result<&Testbench, Error> {
        match self.testbench.get(fqn) {
            Some(tb) => Ok(tb),
            None => Err(Error::TestbenchNotFound(
                fqn.to_string(),
                Hint::TestbenchList,
            )),
        }
    }

    /// Collects all registered fully-qualified names in alphabetical order.
    pub fn fqns(&self) -> Vec<&String> {
        let mut keys: Vec<&String> = self.testbench.keys().collect();
        keys.sort();
        keys
    }

    /// Creates a string to display the list of registered testbenches.
    pub fn list_testbenches(&self) -> String {
        let mut list = String::new();
        for fqn in self.fqns() {
            list += &format!("{}\n", self.testbench.get(fqn).unwrap().quick_info(fqn));
        }
        list
    }
}

impl FromStr for Registry {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
