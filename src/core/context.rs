use crate::core::config::Config;
use crate::core::registry::REGISTRY_FILE;
use crate::error::Error;
use std::env;
use std::path;
use std::path::PathBuf;

/// Shared runtime data resolved once before a subcommand executes.
pub struct Context {
    home_path: PathBuf,
    root_path: Option<PathBuf>,
    config: Config,
}

impl Context {
    pub fn new() -> Context {
        Context {
            home_path: std::env::temp_dir(),
            root_path: None,
            config: Config::new(),
        }
    }

    /// Sets the home directory. By default this is `$HOME/.xbench`. If set by
    /// `key`, it must be an existing directory.
    pub fn home(mut self, key: &str) -> Result<Context, ContextError> {
        self.home_path = if let Ok(s) = env::var(key) {
            PathBuf::from(s)
        } else {
            let hp = match home::home_dir() {
                Some(p) => p.join(".xbench"),
                None => {
                    return Err(ContextError(format!(
                        "failed to detect user's home directory; please set the XBENCH_HOME environment variable"
                    )))
                }
            };
            // create the directory if does not exist
            if path::Path::exists(&hp) == false {
                std::fs::create_dir(&hp).expect("failed to create .xbench directory");
            }
            hp
        };
        // do not allow a non-existent directory to be set for the home
        if path::Path::exists(&self.home_path) == false {
            return Err(ContextError(format!(
                "directory {} does not exist for XBENCH_HOME",
                self.home_path.display()
            )));
        }
        // verify the environment variable is set
        env::set_var(key, &self.home_path);
        Ok(self)
    }

    /// Reads the settings file `s` living directly under the home directory,
    /// creating an empty one if it is absent.
    pub fn settings(mut self, s: &str) -> Result<Context, ContextError> {
        let cfg_path = self.home_path.join(s);
        if path::Path::exists(&cfg_path) == false {
            std::fs::write(&cfg_path, "").expect("failed to create settings file");
        }
        self.config = match Config::from_file(&cfg_path) {
            Ok(c) => c,
            Err(e) => return Err(ContextError(e.to_string())),
        };
        Ok(self)
    }

    /// Detects the project root from the current working directory.
    pub fn current_project_dir(mut self) -> Result<Context, ContextError> {
        self.root_path = Context::find_project_path(
            &std::env::current_dir().expect("failed to get current directory"),
        );
        Ok(self)
    }

    /// Finds the complete path to the current project's root directory.
    ///
    /// This function recursively backtracks down `dir` until finding the
    /// first directory holding a testbench registry file.
    pub fn find_project_path(dir: &PathBuf) -> Option<PathBuf> {
        let mut cwd = dir.clone();
        // search for the registry file
        loop {
            if cwd.join(REGISTRY_FILE).is_file() == true {
                break Some(cwd);
            } else if cwd.pop() == false {
                break None;
            }
        }
    }

    /// Access the configuration data.
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// The directory holding the testbench registry, required for running or
    /// listing simulations.
    pub fn get_project_root(&self) -> Result<&PathBuf, Error> {
        match &self.root_path {
            Some(p) => Ok(p),
            None => Err(Error::NoRegistryFound),
        }
    }
}

#[derive(Debug)]
pub struct ContextError(String);

impl std::error::Error for ContextError {}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
