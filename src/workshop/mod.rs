pub mod repl;
pub mod session;
pub mod terminal;
