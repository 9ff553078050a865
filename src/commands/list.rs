use crate::commands::helps::list;
use crate::core::context::Context;
use crate::core::registry::Registry;
use crate::core::registry::REGISTRY_FILE;

use cliproc::{cli, proc, stage::*};
use cliproc::{Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct List {}

impl Subcommand<Context> for List {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(list::HELP))?;
        Ok(List {})
    }

    fn execute(self, c: &Context) -> proc::Result {
        let root = c.get_project_root()?;
        let registry = Registry::from_file(&root.join(REGISTRY_FILE))?;
        print!("{}", registry.list_testbenches());
        Ok(())
    }
}
