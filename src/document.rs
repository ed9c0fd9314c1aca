use serde::{Deserialize, Serialize};

use crate::blocks::{self, RenderContext, Registry};
use crate::html::Escaping;
use crate::ident;
use crate::theme::{Palette, ThemeMap};
use crate::value::{FieldBag, Value};

pub const DEFAULT_SUBJECT: &str = "Email";
pub const DEFAULT_PREHEADER: &str = "Узнайте больше";

/// Closes the content table; always the last row of every email.
pub const FOOTER_ROW: &str = "<tr><td style=\"background:#1a1a2e; color:#6a7a8a; padding:28px 32px; text-align:center; font-size:12px;\">\n\t© 2026 Компания · <a href=\"#\" style=\"color:#4a5a6a;\">Отписаться</a>\n\t</td></tr>";

const CLOSING: &str = "\n\t</table></td></tr></table></body></html>";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailDocument {
    /// Free-form document kind supplied by callers; not used for rendering.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub preheader: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMap>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// One typed content unit. Built leniently from any mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    pub data: FieldBag,
}

impl Block {
    pub fn new(kind: impl Into<String>, data: FieldBag) -> Self {
        Self {
            kind: kind.into(),
            enabled: true,
            data,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        let map = match value {
            Value::Map(map) => map,
            _ => FieldBag::new(),
        };

        Self {
            kind: map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            enabled: map.get("enabled").and_then(Value::as_bool).unwrap_or(false),
            data: map
                .get("data")
                .and_then(Value::as_map)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl EmailDocument {
    pub fn subject_or_default(&self) -> &str {
        if self.subject.is_empty() {
            DEFAULT_SUBJECT
        } else {
            &self.subject
        }
    }

    pub fn preheader_or_default(&self) -> &str {
        if self.preheader.is_empty() {
            DEFAULT_PREHEADER
        } else {
            &self.preheader
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub escaping: Escaping,
}

/// A finished email and the identifier it was issued under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub id: String,
    pub html: String,
}

/// Renders with the built-in registry and raw insertion.
pub fn assemble(doc: &EmailDocument) -> String {
    assemble_with(doc, blocks::builtin(), RenderOptions::default())
}

pub fn assemble_with(doc: &EmailDocument, registry: &Registry, options: RenderOptions) -> String {
    let palette = match options.escaping {
        Escaping::Raw => Palette::resolve(doc.theme.as_ref()),
        Escaping::Html => Palette::resolve(doc.theme.as_ref()).sanitized(),
    };
    let cx = RenderContext::new(&palette, options.escaping);

    log::debug!(
        "Assembling email '{}' with {} blocks",
        doc.subject_or_default(),
        doc.blocks.len()
    );

    let mut html = head(&cx, doc.subject_or_default(), doc.preheader_or_default());

    for (index, block) in doc.blocks.iter().enumerate() {
        if !block.enabled {
            log::trace!("skipping disabled block #{} ({})", index, block.kind);
            continue;
        }
        html.push_str(&registry.render(&block.kind, &block.data, &cx));
    }

    html.push_str(FOOTER_ROW);
    html.push_str(CLOSING);
    html
}

/// Assembles `doc` and pairs it with a fresh document id.
pub fn render(doc: &EmailDocument) -> RenderedEmail {
    render_with(doc, blocks::builtin(), RenderOptions::default())
}

pub fn render_with(doc: &EmailDocument, registry: &Registry, options: RenderOptions) -> RenderedEmail {
    RenderedEmail {
        id: ident::document_id(),
        html: assemble_with(doc, registry, options),
    }
}

fn head(cx: &RenderContext<'_>, subject: &str, preheader: &str) -> String {
    let bg = &cx.palette.background;
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.0 Transitional//EN">
<html lang="ru">
<head>
<meta http-equiv="Content-Type" content="text/html; charset=utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{subject}</title>
<style>
body, table, td {{ font-family: Arial, Helvetica, sans-serif; }}
</style>
</head>
<body style="margin:0; padding:0; background-color:{bg};">
<div style="font-size:0; color:{bg};">{preheader}&nbsp;&nbsp;</div>
<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%" style="background-color:{bg};">
<tr><td align="center" style="padding:28px 15px;">
<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="600" style="max-width:600px;">"#,
        subject = cx.esc(subject),
        preheader = cx.esc(preheader),
        bg = bg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ROW_BREAK;
    use crate::value::bag;
    use proptest::prelude::*;

    const CONTENT_OPEN: &str = r#"width="600" style="max-width:600px;">"#;

    /// The markup between the content-table opening and the footer row.
    fn body(html: &str) -> &str {
        let start = html.find(CONTENT_OPEN).expect("content table") + CONTENT_OPEN.len();
        let end = html.find(FOOTER_ROW).expect("footer row");
        &html[start..end]
    }

    fn fragment(tag: &str, data: FieldBag) -> String {
        let palette = Palette::default();
        let cx = RenderContext::new(&palette, Escaping::Raw);
        blocks::builtin().render(tag, &data, &cx)
    }

    #[test]
    fn empty_document_has_defaults_and_no_rows() {
        let html = assemble(&EmailDocument::default());

        assert!(html.contains("<title>Email</title>"));
        assert!(html.contains(">Узнайте больше&nbsp;&nbsp;</div>"));
        assert!(html.contains("© 2026 Компания"));
        assert!(html.contains("Отписаться"));
        assert_eq!(body(&html), "");
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn header_and_button_render_in_order() {
        let doc = EmailDocument {
            blocks: vec![
                Block::new("header", bag([("logo", "ACME")])),
                Block::new("button", bag([("text", "Buy")])),
            ],
            ..Default::default()
        };
        let html = assemble(&doc);
        let rows = body(&html);

        let header = fragment("header", bag([("logo", "ACME")]));
        let button = fragment("button", bag([("text", "Buy")]));
        assert_eq!(rows, format!("{header}{button}"));
        assert!(header.contains(">ACME</td>"));
        assert!(button.contains(">Buy</a>"));
        assert!(rows.find("ACME") < rows.find("Buy"));
    }

    #[test]
    fn disabled_and_unknown_blocks_emit_nothing() {
        let doc = EmailDocument {
            blocks: vec![
                Block::new("text", bag([("content", "hidden")])).disabled(),
                Block::new("holo-deck", bag([("content", "ghost")])),
            ],
            ..Default::default()
        };
        let html = assemble(&doc);
        assert_eq!(body(&html), "");
        assert!(!html.contains("hidden"));
        assert!(!html.contains("ghost"));
    }

    #[test]
    fn pricing_without_items_has_three_default_tiers() {
        let doc = EmailDocument {
            blocks: vec![Block::new("pricing", FieldBag::new())],
            ..Default::default()
        };
        let html = assemble(&doc);
        let rows = body(&html);

        assert_eq!(rows.matches(r#"<td valign="top" width="33%""#).count(), 3);
        let order: Vec<usize> = ["Базовый", "Pro", "Бизнес"]
            .iter()
            .map(|name| rows.find(&format!(">{name}<")).expect("tier present"))
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn progress_uses_whole_numbers() {
        let doc = EmailDocument {
            blocks: vec![Block::new("progress", bag([("current", "12"), ("total", "20")]))],
            ..Default::default()
        };
        assert!(assemble(&doc).contains("width:60%;"));
    }

    #[test]
    fn accent_override_leaves_other_tokens_alone() {
        let doc = EmailDocument {
            theme: Some(ThemeMap::from([("accent".to_string(), "#ff3366".to_string())])),
            blocks: vec![
                Block::new("hero", FieldBag::new()),
                Block::new("button", FieldBag::new()),
            ],
            ..Default::default()
        };
        let html = assemble(&doc);

        assert!(html.contains("background-color:#f0f0f0;"));
        assert!(html.contains("color:#1a1a1a; margin-bottom:16px;"));
        assert!(html.contains("background:#ff3366;"));
        assert!(!html.contains("#4f6ef7"));
    }

    #[test]
    fn json_blocks_are_read_leniently() {
        let doc: EmailDocument = serde_json::from_str(
            r#"{
                "subject": "Hi",
                "blocks": [
                    {"type": "text", "enabled": true, "data": {"content": "one"}},
                    {"type": "text", "data": {"content": "no flag"}},
                    {"type": "text", "enabled": "yes", "data": {"content": "bad flag"}},
                    {"type": 7, "enabled": true},
                    {"type": "header", "enabled": true, "data": "not a map"},
                    "garbage"
                ]
            }"#,
        )
        .expect("document parses");

        assert_eq!(doc.blocks.len(), 6);
        let html = assemble(&doc);
        assert!(html.contains("<title>Hi</title>"));
        assert!(html.contains(">one</td>"));
        assert!(!html.contains("no flag"));
        assert!(!html.contains("bad flag"));
        assert!(html.contains(">BRAND</td>"));
    }

    #[test]
    fn escaping_policy_covers_head_and_colors() {
        let doc = EmailDocument {
            subject: "<b>Sale</b>".into(),
            preheader: "a & b".into(),
            theme: Some(ThemeMap::from([(
                "background".to_string(),
                "red;\"><script>".to_string(),
            )])),
            blocks: vec![Block::new("text", bag([("content", "<i>x</i>")]))],
            ..Default::default()
        };

        let raw = assemble(&doc);
        assert!(raw.contains("<title><b>Sale</b></title>"));
        assert!(raw.contains("red;\"><script>"));

        let escaped = assemble_with(
            &doc,
            blocks::builtin(),
            RenderOptions { escaping: Escaping::Html },
        );
        assert!(escaped.contains("<title>&lt;b&gt;Sale&lt;/b&gt;</title>"));
        assert!(escaped.contains(">a &amp; b&nbsp;&nbsp;</div>"));
        assert!(escaped.contains("&lt;i&gt;x&lt;/i&gt;"));
        assert!(!escaped.contains("<script>"));
        assert!(escaped.contains("background-color:#f0f0f0;"));
    }

    #[test]
    fn render_issues_prefixed_ids() {
        let out = render(&EmailDocument::default());
        assert!(out.id.starts_with("email_"));
        assert_eq!(out.html, assemble(&EmailDocument::default()));
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1000i32..1000).prop_map(|n| Value::Number(n as f64)),
            "[a-zA-Zа-я0-9 <>&]{0,12}".prop_map(Value::Text),
        ];
        leaf.prop_recursive(2, 12, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..4).prop_map(Value::Map),
            ]
        })
    }

    fn arb_block() -> impl Strategy<Value = Block> {
        let tags = blocks::builtin()
            .tags()
            .into_iter()
            .map(str::to_string)
            .chain(["unknown".to_string(), String::new()])
            .collect::<Vec<_>>();
        (
            prop::sample::select(tags),
            any::<bool>(),
            prop::collection::btree_map(
                prop::sample::select(vec![
                    "title", "text", "items", "images", "content", "current", "total", "url",
                ])
                .prop_map(str::to_string),
                arb_value(),
                0..5,
            ),
        )
            .prop_map(|(kind, enabled, data)| Block { kind, enabled, data })
    }

    proptest! {
        #[test]
        fn rendering_is_pure(blocks in prop::collection::vec(arb_block(), 0..8)) {
            let doc = EmailDocument { blocks, ..Default::default() };
            prop_assert_eq!(assemble(&doc), assemble(&doc));
        }

        #[test]
        fn body_is_concatenation_of_enabled_fragments(blocks in prop::collection::vec(arb_block(), 0..8)) {
            let expected: String = blocks
                .iter()
                .filter(|b| b.enabled)
                .map(|b| fragment(&b.kind, b.data.clone()))
                .collect();
            let doc = EmailDocument { blocks, ..Default::default() };
            let html = assemble(&doc);
            prop_assert_eq!(body(&html), expected.as_str());
        }

        #[test]
        fn grid_blocks_break_every_third_item(
            tag in prop::sample::select(vec!["gallery", "features", "cards"]),
            n in 1usize..20,
        ) {
            let field = if tag == "gallery" { "images" } else { "items" };
            let items = Value::List((0..n).map(|i| Value::Text(format!("item-{i}"))).collect());
            let out = fragment(tag, bag([(field, items)]));
            prop_assert_eq!(out.matches(ROW_BREAK).count(), n.div_ceil(3) - 1);
        }
    }
}
