//! Built-in routes.
//!
//! Leaf routes match one aspect of a request: a literal path piece, a
//! pattern, the scheme, the host or the method. [`Chain`] and [`Part`]
//! compose partial routes into larger ones.

mod chain;
mod hostname;
mod literal;
mod method;
mod part;
mod regex;
mod scheme;
mod segment;

pub use chain::Chain;
pub use hostname::Hostname;
pub use literal::Literal;
pub use method::Method;
pub use part::Part;
pub use self::regex::Regex;
pub use scheme::Scheme;
pub use segment::Segment;

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;

/// Resolves translated literals through the translator in `options`.
///
/// # Errors
///
/// Returns [`RouterError::MissingTranslator`] when `options` carries no
/// translator.
pub(crate) fn translation(options: &RouteOptions) -> Result<impl Fn(&str) -> String + '_> {
    let translator = options
        .translator
        .as_ref()
        .ok_or(RouterError::MissingTranslator)?;
    let text_domain = options.text_domain_or_default();
    let locale = options.effective_locale();
    Ok(move |key: &str| translator.translate(key, text_domain, locale))
}

/// Translation used when a pattern has no translated literals.
pub(crate) fn untranslated(key: &str) -> String {
    key.to_string()
}
