//! Translation of route literals.
//!
//! Path patterns may contain `{key}` literals whose text depends on the
//! locale. Routes look the text up through a [`Translator`] supplied in the
//! call options.

use std::collections::HashMap;

/// Text domain used when the options do not name one.
pub const DEFAULT_TEXT_DOMAIN: &str = "default";

/// Translates message keys.
pub trait Translator: Send + Sync {
    /// Returns the translation of `message` in `text_domain` for `locale`.
    ///
    /// `locale` is `None` when the caller did not pick one; implementations
    /// use their default locale then.
    fn translate(&self, message: &str, text_domain: &str, locale: Option<&str>) -> String;
}

/// In-memory translator keyed by text domain and locale.
///
/// Messages without a translation translate to their key.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    default_locale: String,
    messages: HashMap<(String, String), HashMap<String, String>>,
}

impl MessageCatalog {
    /// Creates an empty catalog using `default_locale` when no locale is given.
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Adds a translation.
    #[must_use]
    pub fn message(
        mut self,
        text_domain: impl Into<String>,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.messages
            .entry((text_domain.into(), locale.into()))
            .or_default()
            .insert(key.into(), text.into());
        self
    }

    /// Returns the default locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, message: &str, text_domain: &str, locale: Option<&str>) -> String {
        let locale = locale.unwrap_or(&self.default_locale);
        self.messages
            .get(&(text_domain.to_string(), locale.to_string()))
            .and_then(|messages| messages.get(message))
            .map_or_else(|| message.to_string(), Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new("en-US")
            .message("default", "en-US", "fw", "framework")
            .message("default", "de-DE", "fw", "baukasten")
            .message("alternative", "en-US", "fw", "fw-alternative")
    }

    #[test]
    fn test_default_locale() {
        assert_eq!(catalog().translate("fw", "default", None), "framework");
    }

    #[test]
    fn test_explicit_locale_and_domain() {
        let catalog = catalog();
        assert_eq!(catalog.translate("fw", "default", Some("de-DE")), "baukasten");
        assert_eq!(catalog.translate("fw", "alternative", None), "fw-alternative");
    }

    #[test]
    fn test_falls_back_to_key() {
        assert_eq!(catalog().translate("fw", "default", Some("fr-FR")), "fw");
    }
}
