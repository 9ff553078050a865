pub const HELP: &str = r#"Elaborate and simulate a registered testbench.

Usage:
    xbench sim [options] [testbench]

Options:
    <testbench>         fully-qualified name of the testbench to run
    --all               run every registered testbench
    --vhdl <version>    vhdl standard revision: 87, 93, 02, 08
    --temp-dir <dir>    directory for generated project and log files
    --gui               open the simulator in gui mode
    --verbose           display the commands being executed

Use 'xbench list' to see the registered testbenches.
"#;
