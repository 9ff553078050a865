use crate::core::manifest::ManifestError;
use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("testbench {0:?} is not registered{1}")]
    TestbenchNotFound(String, Hint),
    #[error("a testbench must be specified{0}")]
    TestbenchNotSpecified(Hint),
    #[error("no testbench registry found in current directory or any parent directory")]
    NoRegistryFound,
    #[error("failed to read registry {0:?}: {1}")]
    RegistryNotRead(PathBuf, LastError),
    #[error("failed to parse registry {0:?}: {1}")]
    RegistryParseFailed(PathBuf, LastError),
    #[error("error while parsing file list {0:?}")]
    ManifestParse(PathBuf, #[source] ManifestError),
    #[error("found {0} critical warning(s) while parsing file list {1:?}")]
    CriticalWarnings(usize, PathBuf),
    #[error("cannot add {0:?} to the xsim project file: file does not exist")]
    MissingSourceFile(PathBuf),
    #[error("file list produced no vhdl source files")]
    EmptyFileList,
    #[error("exited with error code: {0}")]
    ChildProcErrorCode(i32),
    #[error("terminated by signal")]
    ChildProcTerminated,
    #[error("failed to execute {0}: {1}")]
    ToolProcFailed(String, LastError),
    #[error("failed to load configuration: {0}")]
    ConfigNotLoaded(LastError),
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = s.split_whitespace().into_iter().next().unwrap();
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    TestbenchList,
    RegistryKey,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::TestbenchList => "use `xbench list` to see the registered testbenches",
            Self::RegistryKey => "register the testbench in the testbenches.toml file",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}
