//! AI-assisted translation for localized content fields.
//!
//! The admin edit forms let an operator write English copy and fill the
//! remaining languages through an OpenAI-compatible chat-completion API.
//! Translation is assistive: a failed target language is left empty with a
//! warning, never an error that blocks the save, and the English source is
//! never overwritten.

use crate::config::Config;
use crate::i18n::{Language, LocalizedString};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Build the system prompt for translation
fn build_translation_system_prompt(target_language: &str) -> String {
    format!(
        r#"You are a professional translator for a digital agency's marketing website. Translate the given copy from English to {}.

## Translation Rules

### DO NOT translate:
- Brand names, product names and company names
- URLs and email addresses
- Technical terms commonly used in English (SEO, UI/UX, branding)

### DO translate:
- Headlines, descriptions and calls to action
- Navigation labels and form copy

### Tone:
- Keep the same persuasive but professional tone
- Prefer natural phrasing over literal translation
- If a term has no good translation, keep the English term

Reply with the translated text only, no commentary."#,
        target_language
    )
}

/// Translate a piece of site copy from English to the target language.
///
/// Returns the translated text on success. The canonical language is
/// returned unchanged without a network call.
pub async fn translate_text(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    target_language: Language,
) -> Result<String> {
    if target_language.is_canonical() {
        return Ok(text.to_string());
    }

    let Some(api_key) = config.translation_api_key.as_deref() else {
        bail!("TRANSLATION_API_KEY not set");
    };

    let request = TranslationRequest {
        model: config.translation_model.clone(),
        messages: vec![
            Message {
                role: "system".to_string(),
                content: build_translation_system_prompt(target_language.name()),
            },
            Message {
                role: "user".to_string(),
                content: text.to_string(),
            },
        ],
        max_completion_tokens: 2000,
        temperature: Some(0.3),
    };

    let response = client
        .post(&config.translation_api_url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&request)
        .send()
        .await
        .context("Translation request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("Translation API returned {}: {}", status, body);
    }

    let chat: ChatResponse = response
        .json()
        .await
        .context("Failed to parse translation response")?;

    let translated = chat
        .choices
        .first()
        .map(|choice| choice.message.content.trim().to_string())
        .unwrap_or_default();

    if translated.is_empty() {
        bail!("Translation API returned an empty completion");
    }

    Ok(translated)
}

/// Fill the missing languages of a localized field from its English value.
///
/// Languages that already hold text are left untouched. A failed target is
/// left empty and logged; the result is always returned so the operator can
/// save whatever did translate.
pub async fn fill_missing_languages(
    client: &reqwest::Client,
    config: &Config,
    field: &LocalizedString,
) -> LocalizedString {
    let mut result = field.clone();
    let source = field.get(Language::canonical()).to_string();
    let targets = field.missing_languages();
    if source.is_empty() || targets.is_empty() {
        return result;
    }

    let translations = futures::future::join_all(
        targets
            .iter()
            .map(|&lang| translate_text(client, config, &source, lang)),
    )
    .await;

    for (lang, translation) in targets.into_iter().zip(translations) {
        match translation {
            Ok(text) => result.set(lang, text),
            Err(e) => warn!("Translation to {} failed: {}", lang.code(), e),
        }
    }

    result
}
