mod code_table;
mod tree;

pub use code_table::CodeTable;
pub use tree::{HuffmanTree, Node};
