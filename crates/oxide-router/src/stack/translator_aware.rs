//! Stack decorator supplying a translator.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::MatchOutcome;
use crate::route::{AssembledUri, PartialRoute, Route};
use crate::stack::RouteStack;
use crate::translator::{DEFAULT_TEXT_DOMAIN, Translator};

/// Wraps a stack and hands its translator and text domain to every match
/// and assemble call whose options do not carry their own.
pub struct TranslatorAwareRouteStack<S> {
    inner: S,
    translator: Arc<dyn Translator>,
    text_domain: String,
    enabled: bool,
}

impl<S: RouteStack> TranslatorAwareRouteStack<S> {
    /// Decorates `inner`, translating in the default text domain.
    pub fn new(inner: S, translator: Arc<dyn Translator>) -> Self {
        Self {
            inner,
            translator,
            text_domain: DEFAULT_TEXT_DOMAIN.to_string(),
            enabled: true,
        }
    }

    /// Sets the text domain.
    #[must_use]
    pub fn with_text_domain(mut self, text_domain: impl Into<String>) -> Self {
        self.text_domain = text_domain.into();
        self
    }

    /// Replaces the translator.
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) {
        self.translator = translator;
    }

    /// Returns the translator.
    #[must_use]
    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    /// Returns the text domain.
    #[must_use]
    pub fn text_domain(&self) -> &str {
        &self.text_domain
    }

    /// Turns injection on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the translator is injected.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the decorated stack.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the decorated stack, mutably.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    fn decorate<'a>(&self, options: &'a RouteOptions) -> Cow<'a, RouteOptions> {
        if !self.enabled || (options.translator.is_some() && options.text_domain.is_some()) {
            return Cow::Borrowed(options);
        }
        let mut options = options.clone();
        if options.translator.is_none() {
            options.translator = Some(Arc::clone(&self.translator));
        }
        if options.text_domain.is_none() {
            options.text_domain = Some(self.text_domain.clone());
        }
        Cow::Owned(options)
    }
}

impl<S: fmt::Debug> fmt::Debug for TranslatorAwareRouteStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorAwareRouteStack")
            .field("inner", &self.inner)
            .field("text_domain", &self.text_domain)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl<S: RouteStack + 'static> Route for TranslatorAwareRouteStack<S> {
    fn match_request(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<MatchOutcome> {
        self.inner
            .match_request(request, path_offset, &self.decorate(options))
    }

    fn assemble(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri> {
        self.inner.assemble(uri, params, &self.decorate(options))
    }

    fn into_partial(self: Box<Self>) -> std::result::Result<Box<dyn PartialRoute>, Box<dyn Route>> {
        Err(self)
    }

    fn as_stack(&self) -> Option<&dyn RouteStack> {
        Some(self)
    }
}

impl<S: RouteStack + 'static> RouteStack for TranslatorAwareRouteStack<S> {
    fn add_route(&mut self, name: &str, route: Box<dyn Route>, priority: Option<i32>) {
        self.inner.add_route(name, route, priority);
    }

    fn remove_route(&mut self, name: &str) -> Option<Box<dyn Route>> {
        self.inner.remove_route(name)
    }

    fn route(&self, name: &str) -> Option<&dyn Route> {
        self.inner.route(name)
    }

    fn route_names(&self) -> Vec<&str> {
        self.inner.route_names()
    }

    fn clear_routes(&mut self) {
        self.inner.clear_routes();
    }

    fn set_default_params(&mut self, params: Params) {
        self.inner.set_default_params(params);
    }
}
