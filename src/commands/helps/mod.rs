pub mod list;
pub mod sim;
pub mod xbench;
