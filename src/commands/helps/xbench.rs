pub const HELP: &str = "\
Xbench drives Xilinx Vivado xSim testbench simulations.

Usage:
    xbench [options] [command]

Commands:
    sim             elaborate and simulate a registered testbench
    list            view the registered testbenches

Options:
    --version       print version information and exit
    --help, -h      print help information

Use 'xbench <command> --help' for more information about a command.
";
