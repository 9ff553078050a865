pub const HELP: &str = r#"View the registered testbenches.

Usage:
    xbench list

The listing displays each fully-qualified testbench name next to its
file-list manifest, in alphabetical order.
"#;
