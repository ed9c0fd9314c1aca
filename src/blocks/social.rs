use super::{RenderContext, row};
use crate::fields;
use crate::value::FieldBag;

struct Platform {
    name: &'static str,
    color: &'static str,
    icon: &'static str,
}

const INSTAGRAM: Platform = Platform { name: "Instagram", color: "#e1306c", icon: "📷" };
const TELEGRAM: Platform = Platform { name: "Telegram", color: "#229ed9", icon: "✈" };
const YOUTUBE: Platform = Platform { name: "YouTube", color: "#ff0000", icon: "▶" };
const SPOTIFY: Platform = Platform { name: "Spotify", color: "#1db954", icon: "♫" };
const DISCORD: Platform = Platform { name: "Discord", color: "#5865f2", icon: "🎮" };

fn platform(network: &str) -> Option<&'static Platform> {
    match network {
        "instagram" => Some(&INSTAGRAM),
        "telegram" => Some(&TELEGRAM),
        "youtube" => Some(&YOUTUBE),
        "spotify" => Some(&SPOTIFY),
        "discord" => Some(&DISCORD),
        _ => None,
    }
}

/// A branded card: icon, headline, subline and a follow link.
fn embed(
    cx: &RenderContext<'_>,
    platform: &Platform,
    headline: &str,
    subline: &str,
    action: &str,
    url: &str,
) -> String {
    row(
        "16px 32px",
        "left",
        &format!(
            r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%" style="border-left:4px solid {c}; background:#fafafa; border-radius:4px;"><tr><td width="52" style="padding:14px; font-size:26px; color:{c};">{}</td><td style="padding:14px 0;"><div style="font-size:12px; color:#999; text-transform:uppercase;">{}</div><div style="font-weight:bold; color:{};">{}</div><div style="font-size:13px; color:#777;">{}</div></td><td align="right" style="padding:14px;"><a href="{}" style="display:inline-block; background:{c}; color:white; padding:8px 14px; border-radius:4px; text-decoration:none; font-size:13px;">{}</a></td></tr></table>"#,
            platform.icon,
            platform.name,
            cx.palette.primary,
            cx.esc(headline),
            cx.esc(subline),
            cx.esc(url),
            cx.esc(action),
            c = platform.color,
        ),
    )
}

pub fn instagram(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let username = fields::text(data, "username", "brand");
    let text = fields::text(data, "text", "Новые фото каждый день");
    let url = fields::text(data, "url", "#");
    let handle = format!("@{}", username.trim_start_matches('@'));
    embed(cx, &INSTAGRAM, &handle, &text, "Подписаться", &url)
}

pub fn telegram(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let channel = fields::text(data, "channel", "Наш канал");
    let text = fields::text(data, "text", "Новости и анонсы первыми");
    let url = fields::text(data, "url", "#");
    embed(cx, &TELEGRAM, &channel, &text, "Открыть", &url)
}

pub fn youtube(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Наш канал на YouTube");
    let text = fields::text(data, "text", "Обзоры и инструкции");
    let url = fields::text(data, "url", "#");
    embed(cx, &YOUTUBE, &title, &text, "Смотреть", &url)
}

pub fn spotify(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Плейлист недели");
    let artist = fields::text(data, "artist", "Разные исполнители");
    let url = fields::text(data, "url", "#");
    embed(cx, &SPOTIFY, &title, &artist, "Слушать", &url)
}

pub fn discord(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let server = fields::text(data, "server", "Сообщество");
    let text = fields::text(data, "text", "Общайтесь с единомышленниками");
    let url = fields::text(data, "url", "#");
    embed(cx, &DISCORD, &server, &text, "Присоединиться", &url)
}

/// Row of follow links; `vk` and unknown networks fall back to a neutral color.
pub fn links(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let links = fields::records_or(
        data,
        "links",
        "network",
        &[
            &[("network", "telegram"), ("url", "#")],
            &[("network", "vk"), ("url", "#")],
            &[("network", "youtube"), ("url", "#")],
        ],
    );

    let anchors: String = links
        .iter()
        .map(|link| {
            let network = fields::text(link, "network", "link").to_ascii_lowercase();
            let (label, color) = match (platform(&network), network.as_str()) {
                (Some(p), _) => (p.name.to_string(), p.color),
                (None, "vk") => ("VK".to_string(), "#0077ff"),
                (None, other) => (other.to_string(), "#555555"),
            };
            format!(
                r#"<a href="{}" style="display:inline-block; margin:0 4px; padding:8px 14px; background:{}; color:white; border-radius:16px; text-decoration:none; font-size:13px;">{}</a>"#,
                cx.esc(&fields::text(link, "url", "#")),
                color,
                cx.esc(&label)
            )
        })
        .collect();

    row("20px 32px", "center", &anchors)
}
