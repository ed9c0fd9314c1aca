use super::{RenderContext, action_button, row};
use crate::fields;
use crate::value::FieldBag;

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x300";

pub fn header(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let logo = fields::text(data, "logo", "BRAND");
    format!(
        r#"<tr><td style="background:#0d1f3c; color:white; padding:22px 32px; font-size:20px; font-weight:bold;">{}</td></tr>"#,
        cx.esc(&logo)
    )
}

pub fn hero(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Заголовок");
    let description = fields::text(data, "description", "Описание");
    let image = fields::text(data, "image", "");

    let picture = if image.is_empty() {
        String::new()
    } else {
        format!(
            "\n\t\t\t<img src=\"{}\" alt=\"\" width=\"536\" style=\"display:block; width:100%; max-width:536px; margin:0 auto 24px; border:0;\">",
            cx.esc(&image)
        )
    };

    format!(
        "<tr><td style=\"background:white; padding:32px; text-align:center;\">{}\n\t\t\t<div style=\"font-size:28px; font-weight:bold; color:{}; margin-bottom:16px;\">{}</div>\n\t\t\t<div style=\"color:#666; margin-bottom:24px;\">{}</div>\n\t\t\t</td></tr>",
        picture,
        cx.palette.primary,
        cx.esc(&title),
        cx.esc(&description),
    )
}

pub fn text(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let content = fields::text(data, "content", "Текст");
    format!(
        r#"<tr><td style="background:white; padding:24px 32px;">{}</td></tr>"#,
        cx.esc(&content)
    )
}

pub fn button(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let label = fields::text(data, "text", "Кнопка");
    let url = fields::text(data, "url", "#");
    format!(
        "<tr><td style=\"background:white; padding:0 32px 32px; text-align:center;\">\n\t\t\t{}\n\t\t\t</td></tr>",
        action_button(cx, &label, &url)
    )
}

pub fn divider(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let color = fields::text(data, "color", "#e0e0e0");
    row(
        "8px 32px",
        "center",
        &format!(
            r#"<div style="border-top:1px solid {}; font-size:0; line-height:0;">&nbsp;</div>"#,
            cx.color(&color, "#e0e0e0")
        ),
    )
}

const DEFAULT_SPACER_HEIGHT: u32 = 24;

pub fn spacer(data: &FieldBag, _cx: &RenderContext<'_>) -> String {
    let height = fields::scalar(data, "height", "")
        .trim()
        .trim_end_matches("px")
        .parse::<u32>()
        .map(|h| h.clamp(1, 200))
        .unwrap_or(DEFAULT_SPACER_HEIGHT);
    format!(
        r#"<tr><td style="height:{h}px; line-height:{h}px; font-size:0;">&nbsp;</td></tr>"#,
        h = height
    )
}

pub fn image(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let src = fields::text(data, "src", PLACEHOLDER_IMAGE);
    let alt = fields::text(data, "alt", "Изображение");
    let url = fields::text(data, "url", "");

    let img = format!(
        r#"<img src="{}" alt="{}" width="600" style="display:block; width:100%; max-width:600px; border:0;">"#,
        cx.esc(&src),
        cx.esc(&alt)
    );
    let inner = if url.is_empty() {
        img
    } else {
        format!(r#"<a href="{}">{}</a>"#, cx.esc(&url), img)
    };

    format!(
        r#"<tr><td style="background:white; padding:0; font-size:0; line-height:0;">{}</td></tr>"#,
        inner
    )
}

/// Inserted verbatim under every escaping policy.
pub fn raw_html(data: &FieldBag, _cx: &RenderContext<'_>) -> String {
    let content = fields::text(data, "content", "");
    format!("<tr><td>{}</td></tr>", content)
}

pub fn logo(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let src = fields::text(data, "src", "");
    let label = fields::text(data, "text", "BRAND");
    let align = match fields::text(data, "align", "center").as_str() {
        "left" => "left",
        "right" => "right",
        _ => "center",
    };

    let inner = if src.is_empty() {
        format!(
            r#"<span style="font-size:24px; font-weight:bold; letter-spacing:2px; color:{};">{}</span>"#,
            cx.palette.primary,
            cx.esc(&label)
        )
    } else {
        format!(
            r#"<img src="{}" alt="{}" height="40" style="height:40px; border:0;">"#,
            cx.esc(&src),
            cx.esc(&label)
        )
    };

    row("24px 32px", align, &inner)
}

pub fn banner(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let label = fields::text(data, "text", "Специальное предложение");
    let subtitle = fields::text(data, "subtitle", "");
    let background = fields::text(data, "background", &cx.palette.accent);
    let color = fields::text(data, "color", "#ffffff");

    let subtitle = if subtitle.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="font-size:14px; margin-top:8px; opacity:0.85;">{}</div>"#,
            cx.esc(&subtitle)
        )
    };

    format!(
        r#"<tr><td style="background:{}; color:{}; padding:28px 32px; text-align:center;"><div style="font-size:22px; font-weight:bold;">{}</div>{}</td></tr>"#,
        cx.color(&background, &cx.palette.accent),
        cx.color(&color, "#ffffff"),
        cx.esc(&label),
        subtitle
    )
}

fn alert_colors(kind: &str) -> (&'static str, &'static str, &'static str) {
    // (background, border, text)
    match kind {
        "success" => ("#e8f7ee", "#2e9e5b", "#1d5c37"),
        "warning" => ("#fff6e0", "#e0a100", "#6b4d00"),
        "error" => ("#fdecec", "#d93025", "#7a1a14"),
        _ => ("#eaf1ff", "#4f6ef7", "#1f3a8a"),
    }
}

pub fn alert(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let message = fields::text(data, "text", "Важное уведомление");
    let kind = fields::text(data, "kind", "info");
    let (background, border, color) = alert_colors(&kind);

    row(
        "16px 32px",
        "left",
        &format!(
            r#"<div style="background:{}; border-left:4px solid {}; color:{}; padding:14px 18px; border-radius:4px;">{}</div>"#,
            background,
            border,
            color,
            cx.esc(&message)
        ),
    )
}

pub fn badge(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let label = fields::text(data, "text", "NEW");
    let color = fields::text(data, "color", &cx.palette.accent);

    row(
        "16px 32px",
        "center",
        &format!(
            r#"<span style="display:inline-block; background:{}; color:white; font-size:12px; font-weight:bold; letter-spacing:1px; padding:6px 14px; border-radius:12px;">{}</span>"#,
            cx.color(&color, &cx.palette.accent),
            cx.esc(&label)
        ),
    )
}

pub fn columns(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let left = fields::text(data, "left", "Левая колонка");
    let right = fields::text(data, "right", "Правая колонка");

    row(
        "24px 32px",
        "left",
        &format!(
            r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%"><tr><td valign="top" width="50%" style="padding-right:12px; color:{p};">{}</td><td valign="top" width="50%" style="padding-left:12px; color:{p};">{}</td></tr></table>"#,
            cx.esc(&left),
            cx.esc(&right),
            p = cx.palette.primary,
        ),
    )
}

pub fn footer(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let company = fields::text(data, "company", "Компания");
    let address = fields::text(data, "address", "");
    let links = fields::records_or(
        data,
        "links",
        "text",
        &[&[("text", "Сайт"), ("url", "#")], &[("text", "Контакты"), ("url", "#")]],
    );

    let links = links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}" style="color:#6a7a8a; text-decoration:underline;">{}</a>"#,
                cx.esc(&fields::text(link, "url", "#")),
                cx.esc(&fields::text(link, "text", "Ссылка"))
            )
        })
        .collect::<Vec<_>>()
        .join(" · ");

    let address = if address.is_empty() {
        String::new()
    } else {
        format!(r#"<div style="margin-top:6px;">{}</div>"#, cx.esc(&address))
    };

    format!(
        r#"<tr><td style="background:#f7f7f9; color:#6a7a8a; padding:24px 32px; text-align:center; font-size:12px;"><div style="font-weight:bold; color:{};">{}</div>{}<div style="margin-top:10px;">{}</div></td></tr>"#,
        cx.palette.primary,
        cx.esc(&company),
        address,
        links
    )
}
