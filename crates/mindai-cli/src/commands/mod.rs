pub mod identity;
pub mod load;
pub mod repl;
pub mod solution;
