//! Options threaded through every match and assemble call.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::request::Params;
use crate::translator::{DEFAULT_TEXT_DOMAIN, Translator};

/// Call options for [`Route::match_request`](crate::Route::match_request),
/// [`PartialRoute::partial_match`](crate::PartialRoute::partial_match) and
/// [`Route::assemble`](crate::Route::assemble).
///
/// Composite routes clone the options they receive and adjust them before
/// delegating to their members.
#[derive(Clone, Default)]
pub struct RouteOptions {
    /// Makes method routes report a method failure regardless of the request
    /// method. Set by composites that keep matching only to collect the
    /// allowed methods.
    pub force_method_failure: bool,
    /// Parameters matched by enclosing routes.
    pub parent_match_params: Params,
    /// Tells an assembling route that more path follows it.
    pub has_child: bool,
    /// Route name to assemble, `parent/child` for nested routes.
    pub name: Option<String>,
    /// Translator for translated literals.
    pub translator: Option<Arc<dyn Translator>>,
    /// Text domain for translated literals.
    pub text_domain: Option<String>,
    /// Locale for translated literals.
    pub locale: Option<String>,
    /// Caller defined options, passed through untouched.
    pub extra: HashMap<String, serde_json::Value>,
}

impl RouteOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the route name to assemble.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the translator.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Sets the text domain.
    #[must_use]
    pub fn with_text_domain(mut self, text_domain: impl Into<String>) -> Self {
        self.text_domain = Some(text_domain.into());
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the `has_child` flag.
    #[must_use]
    pub const fn with_has_child(mut self, has_child: bool) -> Self {
        self.has_child = has_child;
        self
    }

    /// Sets the `force_method_failure` flag.
    #[must_use]
    pub const fn with_force_method_failure(mut self, force: bool) -> Self {
        self.force_method_failure = force;
        self
    }

    /// Sets a caller defined option.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Text domain to translate in.
    #[must_use]
    pub fn text_domain_or_default(&self) -> &str {
        self.text_domain.as_deref().unwrap_or(DEFAULT_TEXT_DOMAIN)
    }

    /// Locale to translate for: the explicit locale, else a `locale`
    /// parameter matched by an enclosing route.
    #[must_use]
    pub fn effective_locale(&self) -> Option<&str> {
        self.locale
            .as_deref()
            .or_else(|| self.parent_match_params.get("locale").map(String::as_str))
    }

    /// Adds matched parameters to `parent_match_params`, keeping values
    /// already present.
    pub(crate) fn inherit_params(&mut self, params: &Params) {
        for (name, value) in params {
            self.parent_match_params
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

impl fmt::Debug for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOptions")
            .field("force_method_failure", &self.force_method_failure)
            .field("parent_match_params", &self.parent_match_params)
            .field("has_child", &self.has_child)
            .field("name", &self.name)
            .field("translator", &self.translator.as_ref().map(|_| "<translator>"))
            .field("text_domain", &self.text_domain)
            .field("locale", &self.locale)
            .field("extra", &self.extra)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RouteOptions::new();
        assert!(!options.force_method_failure);
        assert!(!options.has_child);
        assert_eq!(options.text_domain_or_default(), "default");
        assert_eq!(options.effective_locale(), None);
    }

    #[test]
    fn test_locale_falls_back_to_parent_params() {
        let mut options = RouteOptions::new();
        options
            .parent_match_params
            .insert("locale".into(), "de-DE".into());
        assert_eq!(options.effective_locale(), Some("de-DE"));

        let options = options.with_locale("en-US");
        assert_eq!(options.effective_locale(), Some("en-US"));
    }

    #[test]
    fn test_inherit_params_keeps_existing() {
        let mut options = RouteOptions::new();
        options.parent_match_params.insert("a".into(), "1".into());

        let mut params = Params::new();
        params.insert("a".into(), "2".into());
        params.insert("b".into(), "3".into());
        options.inherit_params(&params);

        assert_eq!(options.parent_match_params["a"], "1");
        assert_eq!(options.parent_match_params["b"], "3");
    }
}
