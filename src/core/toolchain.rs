use crate::error::Error;
use crate::error::LastError;
use crate::util::anyerror::Fault;
use crate::util::filesystem;
use std::collections::HashMap;
use std::path::PathBuf;

/// A design unit qualified by the library it resolves in.
#[derive(Debug, PartialEq, Clone)]
pub struct UnitName {
    library: String,
    unit: String,
}

impl UnitName {
    pub fn new(library: &str, unit: &str) -> Self {
        Self {
            library: library.to_string(),
            unit: unit.to_string(),
        }
    }

    /// Spells the snapshot selector xsim expects: `<lib>.<unit>#<lib>.<unit>`.
    pub fn snapshot_selector(&self) -> String {
        format!("{0}.{1}#{0}.{1}", self.library, self.unit)
    }
}

impl std::fmt::Display for UnitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.library, self.unit)
    }
}

/// The recognized switches for the xelab (link/elaborate) phase.
///
/// Every axis the tool invocation supports is a typed field here; there is no
/// pass-through for arbitrary switch names.
#[derive(Debug, PartialEq)]
pub struct XelabOptions {
    time_resolution: String,
    multithreading: String,
    range_check: bool,
    optimization: Option<String>,
    search_libraries: Vec<String>,
    debug: String,
    snapshot: String,
    verbosity: String,
    project_file: PathBuf,
    log_file: PathBuf,
    top: UnitName,
}

impl XelabOptions {
    pub fn new(snapshot: &str, project_file: PathBuf, log_file: PathBuf, top: UnitName) -> Self {
        Self {
            // minimum time precision of 1 fs
            time_resolution: String::from("1fs"),
            multithreading: String::from("off"),
            range_check: true,
            optimization: None,
            search_libraries: Vec::new(),
            debug: String::from("typical"),
            snapshot: snapshot.to_string(),
            verbosity: String::from("1"),
            project_file: project_file,
            log_file: log_file,
            top: top,
        }
    }

    pub fn time_resolution(mut self, res: &str) -> Self {
        self.time_resolution = res.to_string();
        self
    }

    pub fn multithreading(mut self, mt: &str) -> Self {
        self.multithreading = mt.to_string();
        self
    }

    pub fn range_check(mut self, b: bool) -> Self {
        self.range_check = b;
        self
    }

    pub fn optimization(mut self, level: &str) -> Self {
        self.optimization = Some(level.to_string());
        self
    }

    /// Adds a precompiled library to search for unresolved design units.
    ///
    /// Only the name is passed along; xelab locates the compiled contents
    /// through its own `xsim.ini` search path.
    pub fn search_library(mut self, name: &str) -> Self {
        self.search_libraries.push(name.to_string());
        self
    }

    pub fn get_log_file(&self) -> &PathBuf {
        &self.log_file
    }

    /// Translates the options into the xelab argument list.
    ///
    /// Boolean flags appear only when enabled; valued switches appear as
    /// `-switch value` pairs; the top-level unit is the trailing argument.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            String::from("-timeprecision_vhdl"),
            self.time_resolution.to_string(),
            String::from("-mt"),
            self.multithreading.to_string(),
        ];
        if self.range_check == true {
            args.push(String::from("-rangecheck"));
        }
        if let Some(level) = &self.optimization {
            args.push(String::from("-O"));
            args.push(level.to_string());
        }
        for lib in &self.search_libraries {
            args.push(String::from("-L"));
            args.push(lib.to_string());
        }
        args.push(String::from("-debug"));
        args.push(self.debug.to_string());
        args.push(String::from("-s"));
        args.push(self.snapshot.to_string());
        args.push(String::from("-v"));
        args.push(self.verbosity.to_string());
        args.push(String::from("-prj"));
        args.push(self.project_file.display().to_string());
        args.push(String::from("-log"));
        args.push(self.log_file.display().to_string());
        args.push(self.top.to_string());
        args
    }
}

/// The recognized switches for the xsim (simulate) phase.
#[derive(Debug, PartialEq)]
pub struct XsimOptions {
    log_file: PathBuf,
    script: PathBuf,
    gui: bool,
    waveform: Option<PathBuf>,
    snapshot: String,
}

impl XsimOptions {
    pub fn new(top: &UnitName, script: PathBuf, log_file: PathBuf) -> Self {
        Self {
            log_file: log_file,
            script: script,
            gui: false,
            waveform: None,
            snapshot: top.snapshot_selector(),
        }
    }

    pub fn gui(mut self, b: bool) -> Self {
        self.gui = b;
        self
    }

    /// Attaches a waveform configuration, only if the file exists on disk.
    ///
    /// When the file is absent the switch is omitted entirely and xsim starts
    /// without saved view state.
    pub fn waveform(mut self, path: &PathBuf) -> Self {
        self.waveform = match path.exists() {
            true => Some(path.clone()),
            false => None,
        };
        self
    }

    pub fn get_waveform(&self) -> Option<&PathBuf> {
        self.waveform.as_ref()
    }

    pub fn get_log_file(&self) -> &PathBuf {
        &self.log_file
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            String::from("-log"),
            self.log_file.display().to_string(),
            String::from("-tclbatch"),
            self.script.display().to_string(),
        ];
        if self.gui == true {
            args.push(String::from("-gui"));
        }
        if let Some(wcfg) = &self.waveform {
            args.push(String::from("-view"));
            args.push(wcfg.display().to_string());
        }
        args.push(self.snapshot.to_string());
        args
    }
}

/// Locates and runs the Vivado simulation executables.
#[derive(Debug, PartialEq)]
pub struct Vivado {
    bin_dir: Option<PathBuf>,
}

pub const XELAB: &str = "xelab";
pub const XSIM: &str = "xsim";

impl Vivado {
    pub fn new() -> Self {
        Self { bin_dir: None }
    }

    /// Sets the directory holding the tool binaries. Without it the tools are
    /// resolved through the PATH.
    pub fn bin_dir(mut self, dir: Option<&PathBuf>) -> Self {
        self.bin_dir = dir.map(|d| d.clone());
        self
    }

    /// Runs the elaborator and hands back the log file it was told to write.
    pub fn elaborate(
        &self,
        options: &XelabOptions,
        cwd: &PathBuf,
        envs: HashMap<&String, &String>,
        verbose: bool,
    ) -> Result<PathBuf, Fault> {
        self.execute(XELAB, options.to_args(), cwd, envs, verbose)?;
        Ok(options.get_log_file().clone())
    }

    /// Runs the simulator and hands back the log file it was told to write.
    ///
    /// The log is produced regardless of what the testbench printed; reading
    /// a pass/fail verdict out of it is not implemented.
    pub fn simulate(
        &self,
        options: &XsimOptions,
        cwd: &PathBuf,
        envs: HashMap<&String, &String>,
        verbose: bool,
    ) -> Result<PathBuf, Fault> {
        self.execute(XSIM, options.to_args(), cwd, envs, verbose)?;
        Ok(options.get_log_file().clone())
    }

    fn command(&self, tool: &str) -> String {
        match &self.bin_dir {
            Some(dir) => dir.join(tool).display().to_string(),
            None => tool.to_string(),
        }
    }

    fn execute(
        &self,
        tool: &str,
        args: Vec<String>,
        cwd: &PathBuf,
        envs: HashMap<&String, &String>,
        verbose: bool,
    ) -> Result<(), Fault> {
        let command = self.command(tool);
        // display the literal command being ran
        if verbose == true {
            let s = args
                .iter()
                .fold(String::new(), |x, y| x + "\"" + &y + "\" ");
            println!("info: running: {} {}", command, s);
        }
        let proc = match filesystem::invoke(cwd, &command, &args, envs) {
            Ok(p) => p,
            Err(e) => {
                return Err(Error::ToolProcFailed(
                    tool.to_string(),
                    LastError(e.to_string()),
                ))?
            }
        };
        match filesystem::wait_on(proc) {
            Ok(()) => Ok(()),
            Err(e) => Err(Error::ToolProcFailed(
                tool.to_string(),
                LastError(e.to_string()),
            ))?,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn top_level_formats() {
        let top = UnitName::new("work", "prng_tb");
        assert_eq!(top.to_string(), "work.prng_tb");
        assert_eq!(top.snapshot_selector(), "work.prng_tb#work.prng_tb");
    }

    #[test]
    fn xelab_args() {
        let opts = XelabOptions::new(
            "prng_tb",
            PathBuf::from("xsim/prng_tb.prj"),
            PathBuf::from("xsim/prng_tb.xelab.log"),
            UnitName::new("work", "prng_tb"),
        );
        assert_eq!(
            opts.to_args(),
            vec![
                "-timeprecision_vhdl",
                "1fs",
                "-mt",
                "off",
                "-rangecheck",
                "-debug",
                "typical",
                "-s",
                "prng_tb",
                "-v",
                "1",
                "-prj",
                "xsim/prng_tb.prj",
                "-log",
                "xsim/prng_tb.xelab.log",
                "work.prng_tb",
            ]
        );
    }

    #[test]
    fn xelab_flag_only_when_true() {
        let opts = XelabOptions::new(
            "prng_tb",
            PathBuf::from("a.prj"),
            PathBuf::from("a.log"),
            UnitName::new("work", "prng_tb"),
        )
        .range_check(false)
        .optimization("2");
        let args = opts.to_args();
        assert_eq!(args.contains(&String::from("-rangecheck")), false);
        assert_eq!(args.contains(&String::from("-O")), true);
        assert_eq!(args.contains(&String::from("2")), true);
    }

    #[test]
    fn xelab_search_libraries() {
        let opts = XelabOptions::new(
            "prng_tb",
            PathBuf::from("a.prj"),
            PathBuf::from("a.log"),
            UnitName::new("work", "prng_tb"),
        )
        .search_library("unisim")
        .search_library("secureip");
        let args = opts.to_args();
        let first = args.iter().position(|a| a == "-L").unwrap();
        assert_eq!(args[first + 1], "unisim");
        assert_eq!(args[first + 2], "-L");
        assert_eq!(args[first + 3], "secureip");
    }

    #[test]
    fn xsim_batch_args() {
        let opts = XsimOptions::new(
            &UnitName::new("work", "prng_tb"),
            PathBuf::from("run.tcl"),
            PathBuf::from("xsim/prng_tb.xsim.log"),
        );
        assert_eq!(
            opts.to_args(),
            vec![
                "-log",
                "xsim/prng_tb.xsim.log",
                "-tclbatch",
                "run.tcl",
                "work.prng_tb#work.prng_tb",
            ]
        );
    }

    #[test]
    fn xsim_gui_args() {
        let opts = XsimOptions::new(
            &UnitName::new("work", "prng_tb"),
            PathBuf::from("run_gui.tcl"),
            PathBuf::from("prng_tb.xsim.log"),
        )
        .gui(true);
        let args = opts.to_args();
        assert_eq!(args.contains(&String::from("-gui")), true);
        // snapshot selector stays the trailing argument
        assert_eq!(args.last().unwrap(), "work.prng_tb#work.prng_tb");
    }

    #[test]
    fn waveform_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("prng_tb.wcfg");
        let opts = XsimOptions::new(
            &UnitName::new("work", "prng_tb"),
            PathBuf::from("run.tcl"),
            PathBuf::from("prng_tb.xsim.log"),
        )
        .waveform(&missing);
        // switch omitted entirely when the file does not exist
        assert_eq!(opts.get_waveform(), None);
        assert_eq!(opts.to_args().contains(&String::from("-view")), false);

        let mut f = std::fs::File::create(&missing).unwrap();
        f.write_all(b"<wave_config/>\n").unwrap();
        let opts = XsimOptions::new(
            &UnitName::new("work", "prng_tb"),
            PathBuf::from("run.tcl"),
            PathBuf::from("prng_tb.xsim.log"),
        )
        .waveform(&missing);
        assert_eq!(opts.get_waveform(), Some(&missing));
        assert_eq!(opts.to_args().contains(&String::from("-view")), true);
    }

    #[test]
    fn tool_location() {
        let vivado = Vivado::new();
        assert_eq!(vivado.command(XELAB), String::from("xelab"));
        let bin = PathBuf::from("/tools/Xilinx/Vivado/2015.4/bin");
        let vivado = Vivado::new().bin_dir(Some(&bin));
        assert_eq!(vivado.command(XSIM), bin.join("xsim").display().to_string());
    }
}
