pub mod css_refs;
pub mod quote;
