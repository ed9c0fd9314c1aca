//! Block-based HTML email builder.
//!
//! [`document::assemble`] turns an [`EmailDocument`] into one self-contained,
//! table-based HTML string. Rendering is pure: malformed block data falls back
//! to defaults and unknown block types render nothing.

pub mod blocks;
pub mod config;
pub mod document;
pub mod draft;
pub mod error;
pub mod fields;
pub mod html;
pub mod ident;
pub mod storage;
pub mod textgen;
pub mod theme;
pub mod value;

pub use document::{Block, EmailDocument, RenderOptions, RenderedEmail, assemble, render};
pub use error::{Error, Result};
pub use html::Escaping;
pub use theme::{Palette, Theme};
pub use value::{FieldBag, Value};

/// Parses a document from JSON, YAML or TOML text, chosen by `format`
/// (a file extension; anything unrecognized is read as JSON).
pub fn parse_document(content: &str, format: &str) -> Result<EmailDocument> {
    match format.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| Error::Document(e.to_string())),
        "toml" => toml::from_str(content).map_err(|e| Error::Document(e.to_string())),
        _ => serde_json::from_str(content).map_err(|e| Error::Document(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_document;

    #[test]
    fn documents_parse_from_every_format() {
        let json = r#"{"subject":"S","blocks":[{"type":"text","enabled":true,"data":{"content":"c"}}]}"#;
        let yaml = "subject: S\nblocks:\n  - type: text\n    enabled: true\n    data:\n      content: c\n";
        let toml = "subject = \"S\"\n[[blocks]]\ntype = \"text\"\nenabled = true\n[blocks.data]\ncontent = \"c\"\n";

        let docs = [
            parse_document(json, "json").expect("json"),
            parse_document(yaml, "YML").expect("yaml"),
            parse_document(toml, "toml").expect("toml"),
        ];
        for doc in &docs {
            assert_eq!(doc, &docs[0]);
            assert_eq!(doc.blocks[0].kind, "text");
            assert!(doc.blocks[0].enabled);
        }
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(parse_document("{", "json").is_err());
    }
}
