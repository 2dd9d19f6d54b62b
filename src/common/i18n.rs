// src/common/i18n.rs

use std::collections::HashMap;

use anyhow::Context;

pub const DEFAULT_LANG: &str = "vi";

// Catálogos embutidos no binário
const CATALOGS: [(&str, &str); 2] = [
    ("vi", include_str!("../../locales/vi.json")),
    ("en", include_str!("../../locales/en.json")),
];

/// Mensagens traduzidas por idioma: `lang -> (chave -> texto)`.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Catálogo de mensagens inválido: {}", lang))?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self { catalogs })
    }

    /// Idioma desconhecido cai no vietnamita; chave desconhecida volta a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .or_else(|| {
                self.catalogs
                    .get(DEFAULT_LANG)
                    .and_then(|messages| messages.get(key))
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let vi = &store.catalogs["vi"];
        let en = &store.catalogs["en"];
        let mut vi_keys: Vec<_> = vi.keys().collect();
        let mut en_keys: Vec<_> = en.keys().collect();
        vi_keys.sort();
        en_keys.sort();
        assert_eq!(vi_keys, en_keys);
    }

    #[test]
    fn unknown_language_falls_back_to_vietnamese() {
        let store = I18nStore::load().unwrap();
        assert!(!store.catalogs.contains_key("pt"));
        assert_eq!(store.translate("pt", "user_not_found"), "Không tìm thấy người dùng.");
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("en", "no_such_key"), "no_such_key");
    }
}
