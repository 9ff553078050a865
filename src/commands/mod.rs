// entry program
pub mod xbench;

// commands
mod list;
mod sim;

// informational content for help about commands
mod helps;
