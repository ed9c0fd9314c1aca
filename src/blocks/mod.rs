mod basic;
mod content;
mod grid;
mod interactive;
mod social;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::html::{Escaping, escape_html, is_safe_color};
use crate::theme::Palette;
use crate::value::FieldBag;

pub use grid::ROW_BREAK;

/// Everything a renderer may read besides the block's own data.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub palette: &'a Palette,
    pub escaping: Escaping,
}

impl<'a> RenderContext<'a> {
    pub fn new(palette: &'a Palette, escaping: Escaping) -> Self {
        Self { palette, escaping }
    }

    /// Prepares a user-supplied string for a text node or attribute value.
    pub fn esc<'s>(&self, text: &'s str) -> Cow<'s, str> {
        match self.escaping {
            Escaping::Raw => Cow::Borrowed(text),
            Escaping::Html => Cow::Owned(escape_html(text)),
        }
    }

    /// A block-level color field; falls back when escaping and the value is unsafe.
    pub fn color<'s>(&self, value: &'s str, fallback: &'s str) -> &'s str {
        match self.escaping {
            Escaping::Html if !is_safe_color(value) => fallback,
            _ => value,
        }
    }
}

/// Turns one block's field bag into an HTML fragment, usually a single table row.
pub trait BlockRenderer: Send + Sync {
    fn render(&self, data: &FieldBag, cx: &RenderContext<'_>) -> String;
}

impl<F> BlockRenderer for F
where
    F: Fn(&FieldBag, &RenderContext<'_>) -> String + Send + Sync,
{
    fn render(&self, data: &FieldBag, cx: &RenderContext<'_>) -> String {
        self(data, cx)
    }
}

#[derive(Default)]
pub struct Registry {
    renderers: HashMap<String, Box<dyn BlockRenderer>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.tags())
            .finish()
    }
}

impl Registry {
    /// An empty registry; every tag renders nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("header", basic::header);
        registry.register("hero", basic::hero);
        registry.register("text", basic::text);
        registry.register("button", basic::button);
        registry.register("divider", basic::divider);
        registry.register("spacer", basic::spacer);
        registry.register("image", basic::image);
        registry.register("html", basic::raw_html);
        registry.register("logo", basic::logo);
        registry.register("banner", basic::banner);
        registry.register("alert", basic::alert);
        registry.register("badge", basic::badge);
        registry.register("columns", basic::columns);
        registry.register("footer", basic::footer);

        registry.register("quote", content::quote);
        registry.register("list", content::list);
        registry.register("faq", content::faq);
        registry.register("steps", content::steps);
        registry.register("testimonial", content::testimonial);
        registry.register("rating", content::rating);
        registry.register("progress", content::progress);
        registry.register("stats", content::stats);
        registry.register("event", content::event);
        registry.register("countdown", content::countdown);
        registry.register("timer", content::timer);

        registry.register("gallery", grid::gallery);
        registry.register("features", grid::features);
        registry.register("cards", grid::cards);
        registry.register("pricing", grid::pricing);

        registry.register("cta", interactive::cta);
        registry.register("video", interactive::video);
        registry.register("form", interactive::form);
        registry.register("survey", interactive::survey);
        registry.register("download", interactive::download);
        registry.register("gift", interactive::gift);
        registry.register("share", interactive::share);
        registry.register("qrcode", interactive::qrcode);
        registry.register("barcode", interactive::barcode);
        registry.register("seal", interactive::seal);

        registry.register("instagram", social::instagram);
        registry.register("telegram", social::telegram);
        registry.register("youtube", social::youtube);
        registry.register("spotify", social::spotify);
        registry.register("discord", social::discord);
        registry.register("social", social::links);

        registry
    }

    /// Adds or replaces the renderer for `tag`, returning the previous one.
    pub fn register<R>(&mut self, tag: &str, renderer: R) -> Option<Box<dyn BlockRenderer>>
    where
        R: BlockRenderer + 'static,
    {
        self.renderers.insert(tag.to_string(), Box::new(renderer))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.renderers.contains_key(tag)
    }

    /// Sorted list of registered tags.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn render(&self, tag: &str, data: &FieldBag, cx: &RenderContext<'_>) -> String {
        match self.renderers.get(tag) {
            Some(renderer) => renderer.render(data, cx),
            None => {
                log::trace!("no renderer for block type '{}'", tag);
                String::new()
            }
        }
    }
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// Process-wide registry holding every built-in renderer.
pub fn builtin() -> &'static Registry {
    &BUILTIN
}

/// The call-to-action anchor shared by several blocks.
pub(crate) fn action_button(cx: &RenderContext<'_>, label: &str, url: &str) -> String {
    format!(
        r#"<a href="{}" style="display:inline-block; background:{}; color:white; padding:14px 28px; text-decoration:none; border-radius:4px;">{}</a>"#,
        cx.esc(url),
        cx.palette.accent,
        cx.esc(label),
    )
}

/// Wraps content in a white block row.
pub(crate) fn row(padding: &str, align: &str, inner: &str) -> String {
    format!(
        r#"<tr><td style="background:white; padding:{}; text-align:{};">{}</td></tr>"#,
        padding, align, inner
    )
}
