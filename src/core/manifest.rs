use std::path::PathBuf;

/// Maximum depth of nested `include` directives before the parse is aborted.
const MAX_INCLUDE_DEPTH: usize = 16;

/// A vhdl source file entry taken from a file-list manifest.
///
/// The entry is immutable once constructed; whether `path` exists on disk is
/// checked when the project file is rendered, not here.
#[derive(Debug, PartialEq, Clone)]
pub struct SourceFile {
    library: String,
    path: PathBuf,
}

impl SourceFile {
    pub fn new(library: &str, path: PathBuf) -> Self {
        Self {
            library: library.to_string(),
            path: path,
        }
    }

    pub fn get_library(&self) -> &str {
        &self.library
    }

    pub fn get_path(&self) -> &PathBuf {
        &self.path
    }
}

/// A reference to a precompiled external vhdl library.
///
/// The name is handed to xelab as a search library; the path is only checked
/// for existence here since the tool resolves compiled contents through its
/// own `xsim.ini` search path.
#[derive(Debug, PartialEq)]
pub struct ExternalLibrary {
    name: String,
    path: PathBuf,
}

impl ExternalLibrary {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_path(&self) -> &PathBuf {
        &self.path
    }
}

#[derive(Debug, PartialEq)]
pub struct ManifestWarning {
    line: usize,
    message: String,
    critical: bool,
}

impl ManifestWarning {
    fn new(line: usize, message: String, critical: bool) -> Self {
        Self {
            line: line,
            message: message,
            critical: critical,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

impl std::fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read {0:?}: {1}")]
    ReadFailed(PathBuf, String),
    #[error("line {0}: missing library name after 'vhdl' keyword")]
    MissingLibrary(usize),
    #[error("line {0}: missing file path after library name")]
    MissingPath(usize),
    #[error("line {0}: missing file path after 'include' keyword")]
    MissingIncludePath(usize),
    #[error("line {1}: included file list {0:?} does not exist")]
    IncludeNotFound(PathBuf, usize),
    #[error("exceeded maximum include depth of {0}")]
    IncludeDepthExceeded(usize),
    #[error("line {0}: missing path after external library name")]
    MissingLibraryPath(usize),
    #[error("line {1}: invalid pattern '{0}': {2}")]
    BadPattern(String, usize, String),
}

/// The evaluated contents of a `.files` manifest.
///
/// Grammar, one construct per line:
/// - `# ...` comment
/// - `vhdl <library> <path>` source file (path may be quoted or a glob)
/// - `include <path>` nested manifest
/// - `library <name> <path>` external precompiled library
#[derive(Debug, PartialEq)]
pub struct FileList {
    files: Vec<SourceFile>,
    libraries: Vec<ExternalLibrary>,
    warnings: Vec<ManifestWarning>,
}

impl FileList {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            libraries: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Parses the manifest at `path`, following `include` directives.
    pub fn from_file(path: &PathBuf) -> Result<Self, ManifestError> {
        let mut list = Self::new();
        list.load(path, 0)?;
        Ok(list)
    }

    /// Source files in their declaration order.
    pub fn get_files(&self) -> &Vec<SourceFile> {
        &self.files
    }

    pub fn get_libraries(&self) -> &Vec<ExternalLibrary> {
        &self.libraries
    }

    pub fn get_warnings(&self) -> &Vec<ManifestWarning> {
        &self.warnings
    }

    /// Counts the warnings severe enough to abort a simulation run.
    pub fn count_critical_warnings(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_critical()).count()
    }

    fn load(&mut self, path: &PathBuf, depth: usize) -> Result<(), ManifestError> {
        if depth > MAX_INCLUDE_DEPTH {
            return Err(ManifestError::IncludeDepthExceeded(MAX_INCLUDE_DEPTH));
        }
        let contents = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(ManifestError::ReadFailed(path.clone(), e.to_string())),
        };
        // paths inside the manifest are relative to the manifest itself
        let base = match path.parent() {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from("."),
        };
        for (i, raw) in contents.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();
            if line.is_empty() == true || line.starts_with('#') == true {
                continue;
            }
            let (keyword, rest) = match line.split_once(char::is_whitespace) {
                Some((k, r)) => (k, r.trim()),
                None => (line, ""),
            };
            match keyword {
                "vhdl" => self.add_source(rest, &base, lineno)?,
                "include" => {
                    if rest.is_empty() == true {
                        return Err(ManifestError::MissingIncludePath(lineno));
                    }
                    let inc = base.join(strip_quotes(rest));
                    if inc.exists() == false {
                        return Err(ManifestError::IncludeNotFound(inc, lineno));
                    }
                    self.load(&inc, depth + 1)?;
                }
                "library" => {
                    let (name, p) = match rest.split_once(char::is_whitespace) {
                        Some((n, p)) => (n, strip_quotes(p.trim())),
                        None => return Err(ManifestError::MissingLibraryPath(lineno)),
                    };
                    let lib_path = base.join(p);
                    if lib_path.exists() == false {
                        self.warnings.push(ManifestWarning::new(
                            lineno,
                            format!("external library {:?} not found at {:?}", name, lib_path),
                            false,
                        ));
                    }
                    self.libraries.push(ExternalLibrary {
                        name: name.to_string(),
                        path: lib_path,
                    });
                }
                other => {
                    self.warnings.push(ManifestWarning::new(
                        lineno,
                        format!("unknown keyword '{}'", other),
                        true,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Handles a `vhdl <library> <path>` construct.
    fn add_source(&mut self, rest: &str, base: &PathBuf, lineno: usize) -> Result<(), ManifestError> {
        if rest.is_empty() == true {
            return Err(ManifestError::MissingLibrary(lineno));
        }
        let (library, p) = match rest.split_once(char::is_whitespace) {
            Some((l, p)) => (l, strip_quotes(p.trim())),
            None => return Err(ManifestError::MissingPath(lineno)),
        };
        if p.is_empty() == true {
            return Err(ManifestError::MissingPath(lineno));
        }
        match is_pattern(p) {
            true => {
                let pattern = base.join(p).display().to_string();
                let paths = match glob::glob(&pattern) {
                    Ok(it) => it,
                    Err(e) => {
                        return Err(ManifestError::BadPattern(
                            p.to_string(),
                            lineno,
                            e.msg.to_string(),
                        ))
                    }
                };
                let mut matched: Vec<PathBuf> = paths.filter_map(|r| r.ok()).collect();
                matched.sort();
                if matched.is_empty() == true {
                    self.warnings.push(ManifestWarning::new(
                        lineno,
                        format!("pattern '{}' matched no files", p),
                        true,
                    ));
                }
                for m in matched {
                    self.push_file(SourceFile::new(library, m), lineno);
                }
            }
            false => {
                self.push_file(SourceFile::new(library, base.join(p)), lineno);
            }
        }
        Ok(())
    }

    fn push_file(&mut self, file: SourceFile, lineno: usize) {
        if self.files.iter().any(|f| f.get_path() == file.get_path()) == true {
            self.warnings.push(ManifestWarning::new(
                lineno,
                format!("duplicate entry for {:?}", file.get_path()),
                false,
            ));
        }
        self.files.push(file);
    }
}

/// Removes one layer of surrounding double quotes, if present.
fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') == true && s.ends_with('"') == true {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Checks if `s` carries glob metacharacters.
fn is_pattern(s: &str) -> bool {
    s.contains('*') || s.contains('?') || s.contains('[')
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_manifest(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parse_sources() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(
            dir.path(),
            "adder.files",
            "# adder sources\n\nvhdl lib_a \"dut.vhdl\"\nvhdl work_tmp adder_tb.vhdl\n",
        );
        let list = FileList::from_file(&m).unwrap();
        assert_eq!(list.get_files().len(), 2);
        assert_eq!(list.get_files()[0].get_library(), "lib_a");
        assert_eq!(list.get_files()[0].get_path(), &dir.path().join("dut.vhdl"));
        assert_eq!(list.get_files()[1].get_library(), "work_tmp");
        assert_eq!(list.get_warnings().len(), 0);
    }

    #[test]
    fn unknown_keyword_is_critical() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(dir.path(), "x.files", "verilog work dut.v\n");
        let list = FileList::from_file(&m).unwrap();
        assert_eq!(list.get_files().len(), 0);
        assert_eq!(list.count_critical_warnings(), 1);
    }

    #[test]
    fn duplicate_entry_is_not_critical() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(
            dir.path(),
            "x.files",
            "vhdl work a.vhdl\nvhdl work a.vhdl\n",
        );
        let list = FileList::from_file(&m).unwrap();
        assert_eq!(list.get_files().len(), 2);
        assert_eq!(list.get_warnings().len(), 1);
        assert_eq!(list.count_critical_warnings(), 0);
    }

    #[test]
    fn follow_includes() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "common.files", "vhdl common pkg.vhdl\n");
        let m = write_manifest(
            dir.path(),
            "top.files",
            "include common.files\nvhdl work top_tb.vhdl\n",
        );
        let list = FileList::from_file(&m).unwrap();
        assert_eq!(list.get_files().len(), 2);
        // included entries come first to preserve compile order
        assert_eq!(list.get_files()[0].get_library(), "common");
        assert_eq!(list.get_files()[1].get_library(), "work");
    }

    #[test]
    fn missing_include() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(dir.path(), "top.files", "include missing.files\n");
        assert_eq!(
            FileList::from_file(&m).unwrap_err(),
            ManifestError::IncludeNotFound(dir.path().join("missing.files"), 1)
        );
    }

    #[test]
    fn self_include_is_cut_off() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(dir.path(), "loop.files", "include loop.files\n");
        assert_eq!(
            FileList::from_file(&m).unwrap_err(),
            ManifestError::IncludeDepthExceeded(MAX_INCLUDE_DEPTH)
        );
    }

    #[test]
    fn expand_glob_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "b.vhdl", "");
        write_manifest(dir.path(), "a.vhdl", "");
        let m = write_manifest(dir.path(), "x.files", "vhdl work *.vhdl\n");
        let list = FileList::from_file(&m).unwrap();
        // deterministic sorted order
        assert_eq!(
            list.get_files()
                .iter()
                .map(|f| f.get_path().clone())
                .collect::<Vec<PathBuf>>(),
            vec![dir.path().join("a.vhdl"), dir.path().join("b.vhdl")]
        );
    }

    #[test]
    fn unmatched_glob_is_critical() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(dir.path(), "x.files", "vhdl work *.vhd\n");
        let list = FileList::from_file(&m).unwrap();
        assert_eq!(list.get_files().len(), 0);
        assert_eq!(list.count_critical_warnings(), 1);
    }

    #[test]
    fn external_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(dir.path(), "x.files", "library unisim ./unisim\n");
        let list = FileList::from_file(&m).unwrap();
        assert_eq!(list.get_libraries().len(), 1);
        assert_eq!(list.get_libraries()[0].get_name(), "unisim");
        // directory does not exist yet, flagged but not fatal
        assert_eq!(list.count_critical_warnings(), 0);
        assert_eq!(list.get_warnings().len(), 1);
    }

    #[test]
    fn bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let m = write_manifest(dir.path(), "x.files", "vhdl\n");
        assert_eq!(
            FileList::from_file(&m).unwrap_err(),
            ManifestError::MissingLibrary(1)
        );

        let m = write_manifest(dir.path(), "y.files", "vhdl work\n");
        assert_eq!(
            FileList::from_file(&m).unwrap_err(),
            ManifestError::MissingPath(1)
        );
    }

    #[test]
    fn quotes() {
        assert_eq!(strip_quotes("\"a b.vhdl\""), "a b.vhdl");
        assert_eq!(strip_quotes("a.vhdl"), "a.vhdl");
        assert_eq!(strip_quotes("\""), "\"");
    }
}
