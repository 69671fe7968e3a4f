pub mod address;
pub mod error;
pub mod parser;
pub mod replay_transform;
pub mod style;

pub use address::{resolve_url, AddressResolver};
pub use error::RewriteError;
pub use parser::css_refs::{locate_references, CssReference, ReferenceKind};
pub use parser::quote::{unquote, Quote, QuotedValue};
pub use replay_transform::replay_css::transform;
pub use style::link_rewriter::rewrite_css_links;
pub use style::pseudo_class::{rewrite_pseudo_classes, PSEUDO_CLASS_SUBSTITUTES};
