use crate::error::Error;
use crate::error::LastError;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(rename = "temp-dir")]
    temp_dir: Option<String>,
}

impl General {
    pub fn new() -> Self {
        Self { temp_dir: None }
    }

    /// Directory for generated `.prj` and `.log` files, relative to the
    /// project root.
    pub fn get_temp_dir(&self) -> String {
        self.temp_dir
            .as_ref()
            .unwrap_or(&String::from("xsim"))
            .clone()
    }
}

#[derive(PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vivado {
    path: Option<PathBuf>,
}

impl Vivado {
    pub fn get_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

#[derive(PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    general: Option<General>,
    vivado: Option<Vivado>,
    env: Option<HashMap<String, String>>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            general: None,
            vivado: None,
            env: None,
        }
    }

    pub fn from_file(path: &PathBuf) -> Result<Self, Error> {
        let contents = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(Error::ConfigNotLoaded(LastError(e.to_string()))),
        };
        match Self::from_str(&contents) {
            Ok(c) => Ok(c),
            Err(e) => Err(Error::ConfigNotLoaded(LastError(e.to_string()))),
        }
    }

    pub fn get_temp_dir(&self) -> String {
        match &self.general {
            Some(g) => g.get_temp_dir(),
            None => General::new().get_temp_dir(),
        }
    }

    /// Access the directory holding the `xelab` and `xsim` binaries, if one
    /// was configured. Otherwise the tools are expected on the PATH.
    pub fn get_vivado_path(&self) -> Option<&PathBuf> {
        self.vivado.as_ref()?.get_path()
    }

    pub fn get_env(&self) -> Option<&HashMap<String, String>> {
        self.env.as_ref()
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const C_1: &str = r#"
[general]
temp-dir = "temp/xsim"

[vivado]
path = "/tools/Xilinx/Vivado/2015.4/bin"

[env]
XILINXD_LICENSE_FILE = "2100@acme"
"#;

    #[test]
    fn from_toml_string() {
        let cfg = Config::from_str(C_1).unwrap();
        assert_eq!(cfg.get_temp_dir(), String::from("temp/xsim"));
        assert_eq!(
            cfg.get_vivado_path(),
            Some(&PathBuf::from("/tools/Xilinx/Vivado/2015.4/bin"))
        );
        assert_eq!(
            cfg.get_env().unwrap().get("XILINXD_LICENSE_FILE"),
            Some(&String::from("2100@acme"))
        );
    }

    #[test]
    fn defaults() {
        let cfg = Config::from_str("").unwrap();
        assert_eq!(cfg.get_temp_dir(), String::from("xsim"));
        assert_eq!(cfg.get_vivado_path(), None);
        assert_eq!(cfg.get_env(), None);
    }

    #[test]
    fn reject_unknown_keys() {
        let cfg = Config::from_str("[general]\nbuild-dir = \"build\"\n");
        assert_eq!(cfg.is_err(), true);
    }
}
