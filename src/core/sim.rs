use crate::core::manifest::FileList;
use crate::core::project::ProjectFile;
use crate::core::project::VhdlVersion;
use crate::core::project::TESTBENCH_LIBRARY;
use crate::core::registry::Registry;
use crate::core::registry::Testbench;
use crate::core::toolchain::UnitName;
use crate::core::toolchain::Vivado;
use crate::core::toolchain::XelabOptions;
use crate::core::toolchain::XsimOptions;
use crate::error::Error;
use crate::util::anyerror::Fault;
use crate::util::environment::Environment;
use crate::util::filesystem;
use colored::Colorize;
use std::path::PathBuf;

/// Sequences one simulation run: registry lookup, file-list evaluation,
/// project-file generation, elaboration, simulation.
///
/// All generated artifacts (`.prj`, `.log`) land in the temporary directory,
/// and every child process is started from there; the caller's working
/// directory is never changed.
pub struct Simulator {
    vivado: Vivado,
    root: PathBuf,
    temp_path: PathBuf,
    envs: Environment,
    gui: bool,
    verbose: bool,
}

impl Simulator {
    /// Prepares the simulation environment, creating the temporary directory
    /// if it does not yet exist.
    pub fn new(
        vivado: Vivado,
        root: PathBuf,
        temp_path: PathBuf,
        envs: Environment,
    ) -> Result<Self, Fault> {
        if temp_path.exists() == false {
            std::fs::create_dir_all(&temp_path)?;
        }
        Ok(Self {
            vivado: vivado,
            root: root,
            temp_path: temp_path,
            envs: envs,
            gui: false,
            verbose: false,
        })
    }

    pub fn gui(mut self, b: bool) -> Self {
        self.gui = b;
        self
    }

    pub fn verbose(mut self, b: bool) -> Self {
        self.verbose = b;
        self
    }

    pub fn get_temp_path(&self) -> &PathBuf {
        &self.temp_path
    }

    /// Runs every registered testbench in alphabetical order, stopping at the
    /// first failure.
    pub fn run_all(&self, registry: &Registry, version: &VhdlVersion) -> Result<(), Fault> {
        for fqn in registry.fqns() {
            self.run(fqn, registry, version)?;
        }
        Ok(())
    }

    /// Runs the testbench registered under `fqn`.
    pub fn run(&self, fqn: &str, registry: &Registry, version: &VhdlVersion) -> Result<(), Fault> {
        println!("testbench: {}", fqn.yellow());
        // check the registry for the given testbench before touching any files
        let tb = registry.get(fqn)?;

        let list_path = self.root.join(tb.get_files());
        if self.verbose == true {
            println!(
                "info: reading file list {}",
                filesystem::into_std_str(list_path.clone())
            );
        }
        let list = match FileList::from_file(&list_path) {
            Ok(l) => l,
            Err(e) => return Err(Error::ManifestParse(list_path.clone(), e))?,
        };
        // surface every warning before deciding the run's fate
        for warn in list.get_warnings() {
            println!("{}: {}", "warning".yellow(), warn);
        }
        let criticals = list.count_critical_warnings();
        if criticals > 0 {
            return Err(Error::CriticalWarnings(criticals, list_path.clone()))?;
        }

        let top = UnitName::new(TESTBENCH_LIBRARY, tb.get_module());
        self.link(tb.get_module(), &list, version, &top)?;
        self.simulate(tb, &top)?;
        Ok(())
    }

    /// Elaborates the design units into a named snapshot with xelab.
    fn link(
        &self,
        module: &str,
        list: &FileList,
        version: &VhdlVersion,
        top: &UnitName,
    ) -> Result<(), Fault> {
        println!("info: running xelab...");
        let prj_path = self.temp_path.join(format!("{}.prj", module));
        if self.verbose == true {
            println!(
                "info: writing xsim project file to {}",
                filesystem::into_std_str(prj_path.clone())
            );
        }
        ProjectFile::new(list.get_files(), *version).save(&prj_path)?;

        let mut options = XelabOptions::new(
            module,
            prj_path,
            self.temp_path.join(format!("{}.xelab.log", module)),
            top.clone(),
        );
        // external libraries named in the manifest become xelab search libraries
        for lib in list.get_libraries() {
            options = options.search_library(lib.get_name());
        }
        let log = self
            .vivado
            .elaborate(&options, &self.temp_path, self.envs.into_map(), self.verbose)?;
        if self.verbose == true {
            println!("info: xelab log at {}", filesystem::into_std_str(log));
        }
        Ok(())
    }

    /// Simulates the elaborated snapshot with xsim.
    fn simulate(&self, tb: &Testbench, top: &UnitName) -> Result<(), Fault> {
        println!("info: running simulation...");
        let module = tb.get_module();
        let script = match self.gui {
            false => tb.get_batch_script(),
            true => tb.get_gui_script(),
        };
        let mut options = XsimOptions::new(
            top,
            self.root.join(script),
            self.temp_path.join(format!("{}.xsim.log", module)),
        )
        .gui(self.gui);
        if self.gui == true {
            // load saved view state when a waveform config exists on disk
            if let Some(wcfg) = tb.get_waveform() {
                options = options.waveform(&self.root.join(wcfg));
                if self.verbose == true {
                    match options.get_waveform() {
                        Some(p) => println!(
                            "info: found waveform config file {}",
                            filesystem::into_std_str(p.clone())
                        ),
                        None => println!("info: no waveform config file found"),
                    }
                }
            }
        }
        let log = self
            .vivado
            .simulate(&options, &self.temp_path, self.envs.into_map(), self.verbose)?;
        println!("info: simulation log at {}", filesystem::into_std_str(log));
        // TODO: scan the xsim log for a 'SIMULATION RESULT = [PASSED|FAILED]'
        // marker once the testbench collection prints one consistently
        Ok(())
    }
}
