pub mod link_rewriter;
pub mod pseudo_class;
