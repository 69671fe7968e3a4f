use crate::error::RewriteError;
use url::Url;

/// Resolves references against a single, already parsed base address.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    base: Url,
}

impl AddressResolver {
    /// Parse `base`. Fails when it is not an absolute URL (e.g. no scheme).
    pub fn new(base: &str) -> Result<Self, RewriteError> {
        let base = Url::parse(base).map_err(|e| RewriteError::invalid_address(base, e))?;
        Ok(AddressResolver { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve `reference` the way a browser resolves a relative URL.
    ///
    /// Empty references and same-document fragments (`#id`) are returned
    /// untouched.
    pub fn resolve(&self, reference: &str) -> Result<String, RewriteError> {
        if is_local_reference(reference) {
            return Ok(reference.to_string());
        }
        let resolved = self
            .base
            .join(reference)
            .map_err(|e| RewriteError::invalid_address(reference, e))?;
        Ok(resolved.into())
    }
}

/// One-shot form of [`AddressResolver::resolve`].
pub fn resolve_url(base: &str, reference: &str) -> Result<String, RewriteError> {
    if is_local_reference(reference) {
        return Ok(reference.to_string());
    }
    AddressResolver::new(base)?.resolve(reference)
}

fn is_local_reference(reference: &str) -> bool {
    reference.is_empty() || reference.starts_with('#')
}
