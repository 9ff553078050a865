use crate::core::manifest::SourceFile;
use crate::error::Error;
use crate::util::anyerror::{AnyError, Fault};
use std::path::PathBuf;
use std::str::FromStr;

/// Library the testbench unit is forced to resolve in.
///
/// Workaround for Vivado 2015.4: xelab fails to pick up the top-level unit
/// unless the final file of the project compiles into this fixed library.
pub const TESTBENCH_LIBRARY: &str = "work";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum VhdlVersion {
    V87,
    V93,
    V02,
    V08,
}

impl VhdlVersion {
    /// The language keyword used in xsim project files.
    ///
    /// Only the 2008 standard has its own dialect keyword; every earlier
    /// revision is plain `vhdl`.
    pub fn dialect(&self) -> &str {
        match self {
            Self::V08 => "vhdl2008",
            _ => "vhdl",
        }
    }
}

impl Default for VhdlVersion {
    fn default() -> Self {
        Self::V93
    }
}

impl FromStr for VhdlVersion {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "87" | "1987" => Self::V87,
            "93" | "1993" => Self::V93,
            "02" | "2002" => Self::V02,
            "08" | "2008" => Self::V08,
            _ => {
                return Err(AnyError(format!(
                    "unsupported vhdl version '{}' (expects 87, 93, 02, or 08)",
                    s
                )))
            }
        })
    }
}

impl std::fmt::Display for VhdlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V87 => write!(f, "87"),
            Self::V93 => write!(f, "93"),
            Self::V02 => write!(f, "02"),
            Self::V08 => write!(f, "08"),
        }
    }
}

/// Renders the xsim project-file grammar from an ordered list of sources.
///
/// Lines take the shape `<dialect> <library> "<path>"`. The final entry is
/// the testbench and its library name is rewritten (see [TESTBENCH_LIBRARY]).
#[derive(Debug, PartialEq)]
pub struct ProjectFile<'a> {
    files: &'a [SourceFile],
    version: VhdlVersion,
    testbench_library: String,
}

impl<'a> ProjectFile<'a> {
    pub fn new(files: &'a [SourceFile], version: VhdlVersion) -> Self {
        Self {
            files: files,
            version: version,
            testbench_library: TESTBENCH_LIBRARY.to_string(),
        }
    }

    /// Overrides the library the final (testbench) entry is rewritten into.
    pub fn testbench_library(mut self, lib: &str) -> Self {
        self.testbench_library = lib.to_string();
        self
    }

    /// Produces the project-file text.
    ///
    /// Fails fast with [Error::MissingSourceFile] if any referenced path does
    /// not exist on disk, rather than deferring the failure to xelab.
    pub fn render(&self) -> Result<String, Error> {
        let (tb, rest) = match self.files.split_last() {
            Some(pair) => pair,
            None => return Err(Error::EmptyFileList),
        };
        let mut contents = String::new();
        for file in rest {
            contents += &self.line(file, file.get_library())?;
        }
        // the testbench keeps its path but not its declared library
        contents += &self.line(tb, &self.testbench_library)?;
        Ok(contents)
    }

    /// Writes the rendered text to `dest`, overwriting any existing content.
    ///
    /// Nothing is written if rendering fails.
    pub fn save(&self, dest: &PathBuf) -> Result<(), Fault> {
        let contents = self.render()?;
        std::fs::write(&dest, contents)?;
        Ok(())
    }

    fn line(&self, file: &SourceFile, library: &str) -> Result<String, Error> {
        if file.get_path().exists() == false {
            return Err(Error::MissingSourceFile(file.get_path().clone()));
        }
        Ok(format!(
            "{} {} \"{}\"\n",
            self.version.dialect(),
            library,
            file.get_path().display()
        ))
    }
}
