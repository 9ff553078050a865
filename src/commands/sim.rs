use crate::commands::helps::sim;
use crate::core::context::Context;
use crate::core::project::VhdlVersion;
use crate::core::registry::Registry;
use crate::core::registry::REGISTRY_FILE;
use crate::core::sim::Simulator;
use crate::core::toolchain::Vivado;
use crate::error::Error;
use crate::error::Hint;
use crate::util::environment::EnvVar;
use crate::util::environment::Environment;
use crate::util::environment::XBENCH_TEMP_DIR;
use crate::util::filesystem;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Sim {
    bench: Option<String>,
    all: bool,
    gui: bool,
    verbose: bool,
    vhdl: Option<VhdlVersion>,
    temp_dir: Option<String>,
}

impl Subcommand<Context> for Sim {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(sim::HELP))?;
        Ok(Sim {
            // Flags
            all: cli.check(Arg::flag("all"))?,
            gui: cli.check(Arg::flag("gui"))?,
            verbose: cli.check(Arg::flag("verbose"))?,
            // Options
            vhdl: cli.get(Arg::option("vhdl").value("version"))?,
            temp_dir: cli.get(Arg::option("temp-dir").value("dir"))?,
            // Positionals
            bench: cli.get(Arg::positional("testbench"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        // verify running from within a project
        let root = c.get_project_root()?;
        let registry = Registry::from_file(&root.join(REGISTRY_FILE))?;

        // determine the temporary directory based on cli priority
        let default_temp_dir = c.get_config().get_temp_dir();
        let temp_dir = self.temp_dir.as_ref().unwrap_or(&default_temp_dir);

        let vivado = Vivado::new().bin_dir(c.get_config().get_vivado_path());
        // tcl scripts may reference the temp directory through the environment
        let envs = Environment::new().from_config(c.get_config()).add(EnvVar::with(
            XBENCH_TEMP_DIR,
            &filesystem::into_std_str(root.join(temp_dir)),
        ));

        let sim = Simulator::new(vivado, root.clone(), root.join(temp_dir), envs)?
            .gui(self.gui)
            .verbose(self.verbose);

        let version = self.vhdl.unwrap_or(VhdlVersion::default());
        match self.all {
            true => sim.run_all(&registry, &version)?,
            false => match &self.bench {
                Some(fqn) => sim.run(fqn, &registry, &version)?,
                None => Err(Error::TestbenchNotSpecified(Hint::TestbenchList))?,
            },
        }
        Ok(())
    }
}
