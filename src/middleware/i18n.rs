// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::DEFAULT_LANG;

const SUPPORTED_LANGS: [&str; 2] = ["vi", "en"];

// Extrator de idioma (Accept-Language)
#[derive(Debug, Clone, PartialEq)]
pub struct Locale(pub String);

impl Locale {
    /// Primeiro idioma suportado do cabeçalho, por ordem de preferência.
    /// "en-US" vale como "en". Sem cabeçalho ou nada suportado: vietnamita.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| {
                accept_language::parse(raw).into_iter().find_map(|tag| {
                    let primary = tag.split('-').next().unwrap_or(&tag).to_lowercase();
                    SUPPORTED_LANGS
                        .iter()
                        .find(|supported| **supported == primary)
                        .map(|supported| supported.to_string())
                })
            })
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}
