pub mod preview;
pub mod reader;
pub mod response_parser;
pub mod tree;
pub mod writer;
