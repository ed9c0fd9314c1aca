use crate::document::{Block, DEFAULT_PREHEADER, DEFAULT_SUBJECT, EmailDocument};
use crate::textgen::TextGenerator;
use crate::theme::ThemeMap;
use crate::value::bag;

/// System prompt used when a draft's hero text is written by a model.
pub const DRAFT_SYSTEM_PROMPT: &str = "Ты пишешь короткие продающие тексты для email-рассылок. Отвечай на русском языке, 2-3 предложения, без заголовка и без разметки.";

/// Header plus hero whose description is `prompt` verbatim.
pub fn draft_document(prompt: &str) -> EmailDocument {
    EmailDocument {
        kind: String::new(),
        subject: DEFAULT_SUBJECT.to_string(),
        preheader: DEFAULT_PREHEADER.to_string(),
        theme: Some(ThemeMap::from([
            ("primary".to_string(), "#1a1a1a".to_string()),
            ("accent".to_string(), "#4f6ef7".to_string()),
        ])),
        blocks: vec![
            Block::new("header", bag([("logo", "BRAND")])),
            Block::new(
                "hero",
                bag([("title", "Заголовок"), ("description", prompt)]),
            ),
        ],
    }
}

/// Like [`draft_document`], but the hero text comes from `generator`.
///
/// Falls back to the prompt itself when generation fails.
pub fn generate_draft<G: TextGenerator + ?Sized>(generator: &G, prompt: &str) -> EmailDocument {
    let description = match generator.complete(prompt, Some(DRAFT_SYSTEM_PROMPT)) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => prompt.to_string(),
        Err(err) => {
            log::warn!("draft text generation failed, using prompt verbatim: {}", err);
            prompt.to_string()
        }
    };
    draft_document(&description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::assemble;
    use crate::fields;
    use crate::textgen::TextGenError;

    struct Canned(Result<String, ()>);

    impl TextGenerator for Canned {
        fn complete(&self, _prompt: &str, system: Option<&str>) -> Result<String, TextGenError> {
            assert_eq!(system, Some(DRAFT_SYSTEM_PROMPT));
            self.0.clone().map_err(|_| TextGenError::EmptyResponse)
        }
    }

    #[test]
    fn draft_has_header_and_hero_with_prompt() {
        let doc = draft_document("Летняя распродажа <до 50%>");

        assert_eq!(doc.subject, "Email");
        assert_eq!(doc.preheader, "Узнайте больше");
        assert_eq!(doc.blocks.len(), 2);
        assert!(doc.blocks.iter().all(|b| b.enabled));
        assert_eq!(doc.blocks[0].kind, "header");
        assert_eq!(fields::text(&doc.blocks[0].data, "logo", ""), "BRAND");
        assert_eq!(doc.blocks[1].kind, "hero");
        assert_eq!(
            fields::text(&doc.blocks[1].data, "description", ""),
            "Летняя распродажа <до 50%>"
        );

        let html = assemble(&doc);
        assert!(html.contains(">Летняя распродажа <до 50%></div>"));
    }

    #[test]
    fn generated_draft_uses_model_text() {
        let doc = generate_draft(&Canned(Ok("  Скидки!  ".into())), "prompt");
        assert_eq!(fields::text(&doc.blocks[1].data, "description", ""), "Скидки!");
    }

    #[test]
    fn failed_generation_falls_back_to_prompt() {
        let doc = generate_draft(&Canned(Err(())), "prompt");
        assert_eq!(fields::text(&doc.blocks[1].data, "description", ""), "prompt");
    }
}
