//! Locale-keyed message catalogs.
//!
//! Catalogs are nested JSON objects compiled into the binary and flattened
//! to dotted keys (`auth.sign_in`). A key missing from a catalog renders as
//! `[[key]]` so untranslated text is visible without breaking the page.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::domain::types::Locale;

const EN: &str = include_str!("../messages/en.json");
const DA: &str = include_str!("../messages/da.json");

/// Error raised when an embedded catalog is not a JSON object.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog for {locale} is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog for {0} must be a JSON object")]
    NotAnObject(Locale),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<Locale, HashMap<String, String>>,
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, nested, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

impl Catalog {
    /// Loads the catalogs bundled with the binary.
    pub fn load() -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        catalog.insert(Locale::En, EN)?;
        catalog.insert(Locale::Da, DA)?;
        Ok(catalog)
    }

    /// Adds or replaces the catalog of `locale` from JSON source.
    pub fn insert(&mut self, locale: Locale, source: &str) -> Result<(), CatalogError> {
        let value: Value =
            serde_json::from_str(source).map_err(|source| CatalogError::Parse { locale, source })?;
        if !value.is_object() {
            return Err(CatalogError::NotAnObject(locale));
        }
        let mut flat = HashMap::new();
        flatten("", &value, &mut flat);
        self.messages.insert(locale, flat);
        Ok(())
    }

    /// Message for `key` in `locale`, or the `[[key]]` placeholder.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        match self.messages.get(&locale).and_then(|m| m.get(key)) {
            Some(text) => text.clone(),
            None => {
                log::warn!("Missing {locale} translation for '{key}'");
                format!("[[{key}]]")
            }
        }
    }
}

/// Tera function `t(key="...", locale="...")`.
pub struct TranslateFn {
    catalog: Catalog,
    default_locale: Locale,
}

impl TranslateFn {
    pub fn new(catalog: Catalog, default_locale: Locale) -> Self {
        Self {
            catalog,
            default_locale,
        }
    }
}

impl tera::Function for TranslateFn {
    fn call(&self, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let key = args
            .get("key")
            .and_then(tera::Value::as_str)
            .ok_or_else(|| tera::Error::msg("t() requires a string `key` argument"))?;
        let locale = args
            .get("locale")
            .and_then(tera::Value::as_str)
            .and_then(|raw| Locale::try_from(raw).ok())
            .unwrap_or(self.default_locale);

        Ok(tera::Value::String(self.catalog.translate(locale, key)))
    }

    fn is_safe(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Function;

    #[test]
    fn bundled_catalogs_share_keys() {
        let catalog = Catalog::load().unwrap();
        let en = &catalog.messages[&Locale::En];
        let da = &catalog.messages[&Locale::Da];
        let mut missing: Vec<&String> = en.keys().filter(|k| !da.contains_key(*k)).collect();
        missing.extend(da.keys().filter(|k| !en.contains_key(*k)));
        assert!(missing.is_empty(), "keys missing in one catalog: {missing:?}");
    }

    #[test]
    fn nested_keys_are_flattened() {
        let mut catalog = Catalog::default();
        catalog
            .insert(Locale::En, r#"{"auth": {"sign_in": "Sign in"}}"#)
            .unwrap();
        assert_eq!(catalog.translate(Locale::En, "auth.sign_in"), "Sign in");
    }

    #[test]
    fn missing_key_renders_placeholder() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(
            catalog.translate(Locale::Da, "does.not.exist"),
            "[[does.not.exist]]"
        );
    }

    #[test]
    fn tera_function_falls_back_to_default_locale() {
        let mut catalog = Catalog::default();
        catalog.insert(Locale::En, r#"{"hello": "Hello"}"#).unwrap();
        catalog.insert(Locale::Da, r#"{"hello": "Hej"}"#).unwrap();
        let t = TranslateFn::new(catalog, Locale::Da);

        let mut args = HashMap::new();
        args.insert("key".to_string(), tera::Value::from("hello"));
        assert_eq!(t.call(&args).unwrap(), tera::Value::from("Hej"));

        args.insert("locale".to_string(), tera::Value::from("en"));
        assert_eq!(t.call(&args).unwrap(), tera::Value::from("Hello"));
    }
}
