mod arena;
mod balance;
mod handle;
mod node;
mod raw_rb_tree;

pub(crate) use raw_rb_tree::{InOrder, RawRBTree, write_bracketed};

#[cfg(test)]
pub(crate) use node::Color;
#[cfg(test)]
pub(crate) use raw_rb_tree::tests::colored_level_order;
