use crate::address::AddressResolver;
use crate::style::{link_rewriter, pseudo_class};

pub mod replay_css {
    use super::*;

    /// Make every reference in `css` absolute against `base` and swap the
    /// interaction pseudo-classes for their replay classes.
    ///
    /// If `base` is not a valid absolute URL the references are left as they
    /// are; the rest of the pipeline still runs.
    pub fn transform(base: &str, css: &str) -> String {
        let linked = match AddressResolver::new(base) {
            Ok(resolver) => {
                link_rewriter::rewrite_css_links(css, |reference| resolver.resolve(reference))
            }
            Err(e) => {
                log::warn!("{}; references left unresolved", e);
                link_rewriter::rewrite_css_links(css, |reference| Ok(reference.to_string()))
            }
        };
        pseudo_class::rewrite_pseudo_classes(&linked)
    }
}
