use crate::commands::helps::xbench;
use crate::commands::list::List;
use crate::commands::sim::Sim;
use crate::core::context::Context;
use crate::util::environment::XBENCH_HOME;

use crate::core::config::CONFIG_FILE;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Xbench {
    version: bool,
    command: Option<XbenchSubcommand>,
}

impl Command for Xbench {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(xbench::HELP))?;
        Ok(Xbench {
            version: cli.check(Arg::flag("version"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // prioritize version information
        if self.version == true {
            println!("xbench {}", VERSION);
            Ok(())
        // run the specified command
        } else if let Some(c) = self.command {
            // set up the context
            let context = Context::new()
                .home(XBENCH_HOME)?
                .settings(CONFIG_FILE)?
                .current_project_dir()?;
            // pass the context to the given command
            c.execute(&context)
        // if no command is given then print default help
        } else {
            Ok(println!("{}", xbench::HELP))
        }
    }
}

#[derive(Debug, PartialEq)]
enum XbenchSubcommand {
    Sim(Sim),
    List(List),
}

impl Subcommand<Context> for XbenchSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli.select(&["sim", "list"])?.as_ref() {
            "sim" => Ok(XbenchSubcommand::Sim(Sim::interpret(cli)?)),
            "list" => Ok(XbenchSubcommand::List(List::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, c: &Context) -> proc::Result {
        match self {
            XbenchSubcommand::Sim(s) => s.execute(c),
            XbenchSubcommand::List(s) => s.execute(c),
        }
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
