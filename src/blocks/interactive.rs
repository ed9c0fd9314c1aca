use super::{RenderContext, action_button, row};
use crate::fields;
use crate::html::encode_component;
use crate::value::FieldBag;

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";
const BARCODE_SERVICE: &str = "https://bwipjs-api.metafloor.com/";

pub fn cta(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Готовы начать?");
    let text = fields::text(data, "text", "Присоединяйтесь к нам сегодня");
    let label = fields::text(data, "button", "Начать");
    let url = fields::text(data, "url", "#");

    format!(
        r#"<tr><td style="background:#f5f7ff; padding:36px 32px; text-align:center;"><div style="font-size:24px; font-weight:bold; color:{};">{}</div><div style="color:#666; margin:10px 0 22px;">{}</div>{}</td></tr>"#,
        cx.palette.primary,
        cx.esc(&title),
        cx.esc(&text),
        action_button(cx, &label, &url)
    )
}

pub fn video(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let thumbnail = fields::text(data, "thumbnail", "https://placehold.co/536x300");
    let url = fields::text(data, "url", "#");
    let title = fields::text(data, "title", "Смотреть видео");

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<a href="{}" style="text-decoration:none;"><img src="{}" alt="{}" width="536" style="display:block; width:100%; border:0; border-radius:6px;"><div style="margin-top:12px; color:{}; font-weight:bold;">▶ {}</div></a>"#,
            cx.esc(&url),
            cx.esc(&thumbnail),
            cx.esc(&title),
            cx.palette.accent,
            cx.esc(&title)
        ),
    )
}

pub fn form(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Оставьте заявку");
    let inputs = fields::strings_or(data, "fields", &["Имя", "Email", "Телефон"]);
    let label = fields::text(data, "button", "Отправить");
    let action = fields::text(data, "action", "#");

    let inputs: String = inputs
        .iter()
        .map(|name| {
            format!(
                r#"<input type="text" name="{n}" placeholder="{n}" style="display:block; width:100%; box-sizing:border-box; padding:10px 12px; margin-bottom:10px; border:1px solid #d5d9e2; border-radius:4px;">"#,
                n = cx.esc(name)
            )
        })
        .collect();

    row(
        "24px 32px",
        "left",
        &format!(
            r#"<div style="font-size:20px; font-weight:bold; color:{}; margin-bottom:14px;">{}</div><form action="{}" method="post">{}<button type="submit" style="background:{}; color:white; border:0; padding:12px 24px; border-radius:4px;">{}</button></form>"#,
            cx.palette.primary,
            cx.esc(&title),
            cx.esc(&action),
            inputs,
            cx.palette.accent,
            cx.esc(&label)
        ),
    )
}

pub fn survey(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let question = fields::text(data, "question", "Как вам наш сервис?");
    let options = fields::strings_or(data, "options", &["Отлично", "Хорошо", "Плохо"]);
    let url = fields::text(data, "url", "#");
    let separator = if url.contains('?') { '&' } else { '?' };

    let answers: String = options
        .iter()
        .map(|option| {
            format!(
                r#"<a href="{}{}answer={}" style="display:inline-block; margin:4px; padding:10px 18px; border:1px solid {}; color:{}; border-radius:20px; text-decoration:none;">{}</a>"#,
                cx.esc(&url),
                separator,
                encode_component(option),
                cx.palette.accent,
                cx.palette.accent,
                cx.esc(option)
            )
        })
        .collect();

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<div style="font-size:18px; font-weight:bold; color:{}; margin-bottom:14px;">{}</div>{}"#,
            cx.palette.primary,
            cx.esc(&question),
            answers
        ),
    )
}

pub fn download(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Скачать файл");
    let file = fields::text(data, "file", "document.pdf");
    let size = fields::scalar(data, "size", "2.4 MB");
    let url = fields::text(data, "url", "#");

    row(
        "20px 32px",
        "left",
        &format!(
            r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%" style="border:1px solid #e3e6ee; border-radius:6px;"><tr><td width="48" style="padding:14px; font-size:28px;">📄</td><td style="padding:14px 0;"><div style="font-weight:bold; color:{};">{}</div><div style="font-size:13px; color:#888;">{} · {}</div></td><td align="right" style="padding:14px;"><a href="{}" style="color:{}; font-weight:bold; text-decoration:none;">{} ↓</a></td></tr></table>"#,
            cx.palette.primary,
            cx.esc(&file),
            cx.esc(&file_kind(&file)),
            cx.esc(&size),
            cx.esc(&url),
            cx.palette.accent,
            cx.esc(&title)
        ),
    )
}

fn file_kind(file: &str) -> String {
    match file.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_uppercase(),
        _ => "FILE".to_string(),
    }
}

pub fn gift(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Подарок для вас");
    let code = fields::text(data, "code", "GIFT2026");
    let text = fields::text(data, "text", "Используйте промокод при оформлении заказа");

    row(
        "28px 32px",
        "center",
        &format!(
            r#"<div style="font-size:36px;">🎁</div><div style="font-size:20px; font-weight:bold; color:{}; margin:8px 0;">{}</div><div style="display:inline-block; border:2px dashed {}; color:{}; font-size:22px; font-weight:bold; letter-spacing:3px; padding:10px 24px; border-radius:6px;">{}</div><div style="color:#777; font-size:13px; margin-top:12px;">{}</div>"#,
            cx.palette.primary,
            cx.esc(&title),
            cx.palette.accent,
            cx.palette.accent,
            cx.esc(&code),
            cx.esc(&text)
        ),
    )
}

fn share_link(network: &str, url: &str) -> Option<(&'static str, String)> {
    let url = encode_component(url);
    let link = match network {
        "telegram" => ("Telegram", format!("https://t.me/share/url?url={}", url)),
        "vk" => ("VK", format!("https://vk.com/share.php?url={}", url)),
        "whatsapp" => ("WhatsApp", format!("https://wa.me/?text={}", url)),
        "facebook" => ("Facebook", format!("https://www.facebook.com/sharer/sharer.php?u={}", url)),
        "twitter" | "x" => ("X", format!("https://twitter.com/intent/tweet?url={}", url)),
        "email" => ("Email", format!("mailto:?body={}", url)),
        _ => return None,
    };
    Some(link)
}

pub fn share(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Поделитесь с друзьями");
    let url = fields::text(data, "url", "#");
    let networks = fields::strings_or(data, "networks", &["telegram", "vk", "whatsapp"]);

    let links: String = networks
        .iter()
        .filter_map(|network| share_link(&network.to_ascii_lowercase(), &url))
        .map(|(name, href)| {
            format!(
                r#"<a href="{}" style="display:inline-block; margin:4px; padding:8px 16px; background:{}; color:white; border-radius:4px; text-decoration:none; font-size:13px;">{}</a>"#,
                cx.esc(&href),
                cx.palette.primary,
                name
            )
        })
        .collect();

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<div style="color:#666; margin-bottom:10px;">{}</div>{}"#,
            cx.esc(&title),
            links
        ),
    )
}

pub fn qrcode(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let payload = fields::text(data, "data", "https://example.com");
    let size = fields::scalar(data, "size", "150")
        .trim()
        .parse::<u32>()
        .map(|s| s.clamp(50, 600))
        .unwrap_or(150);
    let caption = fields::text(data, "caption", "Отсканируйте код");

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<img src="{}?size={s}x{s}&amp;data={}" alt="QR" width="{s}" height="{s}" style="display:block; margin:0 auto; border:0;"><div style="color:#888; font-size:13px; margin-top:8px;">{}</div>"#,
            QR_SERVICE,
            encode_component(&payload),
            cx.esc(&caption),
            s = size
        ),
    )
}

pub fn barcode(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let code = fields::scalar(data, "code", "4600000000000");
    let caption = fields::text(data, "caption", "");

    let caption = if caption.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="color:#888; font-size:13px; margin-top:4px;">{}</div>"#,
            cx.esc(&caption)
        )
    };

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<img src="{}?bcid=code128&amp;text={}&amp;scale=2" alt="{}" style="display:block; margin:0 auto; max-width:100%; border:0;"><div style="font-family:'Courier New', monospace; letter-spacing:3px; color:{}; margin-top:6px;">{}</div>{}"#,
            BARCODE_SERVICE,
            encode_component(&code),
            cx.esc(&code),
            cx.palette.primary,
            cx.esc(&code),
            caption
        ),
    )
}

pub fn seal(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let text = fields::text(data, "text", "Гарантия качества");
    let icon = fields::text(data, "icon", "✓");

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<div style="display:inline-block; width:96px; height:96px; line-height:96px; border-radius:48px; border:3px double {}; color:{}; font-size:40px; font-weight:bold;">{}</div><div style="margin-top:10px; font-weight:bold; color:{}; text-transform:uppercase; letter-spacing:1px; font-size:13px;">{}</div>"#,
            cx.palette.accent,
            cx.palette.accent,
            cx.esc(&icon),
            cx.palette.primary,
            cx.esc(&text)
        ),
    )
}
