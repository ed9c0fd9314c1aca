use super::{RenderContext, action_button, row};
use crate::fields;
use crate::value::FieldBag;

pub fn quote(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let text = fields::text(data, "text", "Лучший сервис, которым я пользовался!");
    let author = fields::text(data, "author", "Анна Смирнова");

    row(
        "24px 32px",
        "left",
        &format!(
            r#"<div style="border-left:4px solid {}; padding:4px 0 4px 20px;"><div style="font-size:18px; font-style:italic; color:{};">&laquo;{}&raquo;</div><div style="margin-top:10px; color:#888; font-size:14px;">&mdash; {}</div></div>"#,
            cx.palette.accent,
            cx.palette.primary,
            cx.esc(&text),
            cx.esc(&author)
        ),
    )
}

pub fn list(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "");
    let ordered = fields::flag(data, "ordered", false);
    let items = fields::strings_or(
        data,
        "items",
        &["Первый пункт", "Второй пункт", "Третий пункт"],
    );

    let tag = if ordered { "ol" } else { "ul" };
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="font-size:18px; font-weight:bold; color:{}; margin-bottom:8px;">{}</div>"#,
            cx.palette.primary,
            cx.esc(&title)
        )
    };
    let items: String = items
        .iter()
        .map(|item| format!(r#"<li style="margin-bottom:6px;">{}</li>"#, cx.esc(item)))
        .collect();

    row(
        "16px 32px",
        "left",
        &format!(
            r#"{}<{tag} style="margin:0; padding-left:22px; color:#333;">{}</{tag}>"#,
            title,
            items,
            tag = tag
        ),
    )
}

pub fn faq(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Частые вопросы");
    let items = fields::records_or(
        data,
        "items",
        "question",
        &[
            &[("question", "Как оформить заказ?"), ("answer", "Выберите товар и нажмите «Купить».")],
            &[("question", "Сколько стоит доставка?"), ("answer", "Доставка бесплатна от 3000 ₽.")],
            &[("question", "Можно ли вернуть товар?"), ("answer", "Да, в течение 14 дней.")],
        ],
    );

    let entries: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<div style="padding:12px 0; border-bottom:1px solid #eee;"><div style="font-weight:bold; color:{};">{}</div><div style="margin-top:6px; color:#666;">{}</div></div>"#,
                cx.palette.primary,
                cx.esc(&fields::text(item, "question", "Вопрос")),
                cx.esc(&fields::text(item, "answer", "Ответ"))
            )
        })
        .collect();

    row(
        "24px 32px",
        "left",
        &format!(
            r#"<div style="font-size:20px; font-weight:bold; color:{}; margin-bottom:8px;">{}</div>{}"#,
            cx.palette.primary,
            cx.esc(&title),
            entries
        ),
    )
}

pub fn steps(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let items = fields::records_or(
        data,
        "items",
        "title",
        &[
            &[("title", "Регистрация"), ("description", "Создайте аккаунт за минуту")],
            &[("title", "Настройка"), ("description", "Заполните профиль")],
            &[("title", "Готово"), ("description", "Пользуйтесь всеми возможностями")],
        ],
    );

    let rows: String = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                r#"<tr><td valign="top" width="44" style="padding:8px 0;"><div style="width:32px; height:32px; line-height:32px; border-radius:16px; background:{}; color:white; text-align:center; font-weight:bold;">{}</div></td><td valign="top" style="padding:8px 0;"><div style="font-weight:bold; color:{};">{}</div><div style="color:#666; font-size:14px;">{}</div></td></tr>"#,
                cx.palette.accent,
                i + 1,
                cx.palette.primary,
                cx.esc(&fields::text(item, "title", "Шаг")),
                cx.esc(&fields::text(item, "description", ""))
            )
        })
        .collect();

    row(
        "24px 32px",
        "left",
        &format!(
            r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%">{}</table>"#,
            rows
        ),
    )
}

pub fn testimonial(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let items = fields::records_or(
        data,
        "items",
        "text",
        &[
            &[
                ("text", "Пользуюсь уже год, всё отлично работает."),
                ("author", "Мария"),
                ("role", "Дизайнер"),
            ],
            &[
                ("text", "Поддержка отвечает за пять минут."),
                ("author", "Алексей"),
                ("role", "Предприниматель"),
            ],
        ],
    );

    let cards: String = items
        .iter()
        .map(|item| {
            let role = fields::text(item, "role", "");
            let role = if role.is_empty() {
                String::new()
            } else {
                format!(r#", <span style="color:#999;">{}</span>"#, cx.esc(&role))
            };
            format!(
                r#"<div style="background:#f7f8fc; border-radius:6px; padding:18px; margin-bottom:12px;"><div style="color:#333; font-style:italic;">{}</div><div style="margin-top:10px; font-size:14px; font-weight:bold; color:{};">{}{}</div></div>"#,
                cx.esc(&fields::text(item, "text", "Отзыв")),
                cx.palette.primary,
                cx.esc(&fields::text(item, "author", "Клиент")),
                role
            )
        })
        .collect();

    row("24px 32px", "left", &cards)
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn rating(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Оцените нас");
    let max = parse_number(&fields::scalar(data, "max", "5"))
        .map(|v| v.round().clamp(1.0, 10.0) as usize)
        .unwrap_or(5);
    let filled = parse_number(&fields::scalar(data, "rating", "5"))
        .map(|v| v.round().clamp(0.0, max as f64) as usize)
        .unwrap_or(0);

    let stars = format!(
        r#"<span style="color:#f5a623;">{}</span><span style="color:#d0d0d0;">{}</span>"#,
        "★".repeat(filled),
        "☆".repeat(max - filled)
    );

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<div style="color:{}; margin-bottom:8px;">{}</div><div style="font-size:28px; letter-spacing:4px;">{}</div>"#,
            cx.palette.primary,
            cx.esc(&title),
            stars
        ),
    )
}

/// Percent of `current` over `total`, parsing the whole number.
///
/// Non-numeric input or a non-positive total gives 0; the result is clamped to 0..=100.
pub fn progress_percent(current: &str, total: &str) -> u32 {
    match (parse_number(current), parse_number(total)) {
        (Some(current), Some(total)) if total > 0.0 => {
            (current / total * 100.0).round().clamp(0.0, 100.0) as u32
        }
        _ => 0,
    }
}

pub fn progress(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Прогресс");
    let current = fields::scalar(data, "current", "3");
    let total = fields::scalar(data, "total", "5");
    let percent = progress_percent(&current, &total);

    row(
        "24px 32px",
        "left",
        &format!(
            r#"<div style="color:{}; font-weight:bold; margin-bottom:8px;">{} &mdash; {}%</div><div style="background:#e9ecf2; border-radius:6px; height:12px; overflow:hidden;"><div style="background:{}; width:{}%; height:12px; border-radius:6px;"></div></div>"#,
            cx.palette.primary,
            cx.esc(&title),
            percent,
            cx.palette.accent,
            percent
        ),
    )
}

pub fn stats(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let items = fields::records_or(
        data,
        "items",
        "value",
        &[
            &[("value", "10K+"), ("label", "Клиентов")],
            &[("value", "98%"), ("label", "Довольных")],
            &[("value", "24/7"), ("label", "Поддержка")],
        ],
    );
    let width = 100 / items.len().max(1);

    let cells: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<td align="center" width="{}%" style="padding:8px;"><div style="font-size:26px; font-weight:bold; color:{};">{}</div><div style="font-size:13px; color:#888;">{}</div></td>"#,
                width,
                cx.palette.accent,
                cx.esc(&fields::scalar(item, "value", "0")),
                cx.esc(&fields::text(item, "label", ""))
            )
        })
        .collect();

    row(
        "24px 32px",
        "center",
        &format!(
            r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%"><tr>{}</tr></table>"#,
            cells
        ),
    )
}

pub fn event(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Онлайн-вебинар");
    let date = fields::text(data, "date", "15 марта 2026");
    let time = fields::text(data, "time", "19:00");
    let location = fields::text(data, "location", "Онлайн");
    let label = fields::text(data, "button", "Зарегистрироваться");
    let url = fields::text(data, "url", "#");

    row(
        "28px 32px",
        "center",
        &format!(
            r#"<div style="font-size:22px; font-weight:bold; color:{}; margin-bottom:12px;">{}</div><div style="color:#555; margin-bottom:4px;">📅 {} · {}</div><div style="color:#555; margin-bottom:20px;">📍 {}</div>{}"#,
            cx.palette.primary,
            cx.esc(&title),
            cx.esc(&date),
            cx.esc(&time),
            cx.esc(&location),
            action_button(cx, &label, &url)
        ),
    )
}

fn time_box(cx: &RenderContext<'_>, value: &str, unit: &str) -> String {
    format!(
        r#"<td align="center" style="padding:0 6px;"><div style="background:{}; color:white; font-size:28px; font-weight:bold; width:64px; padding:12px 0; border-radius:6px;">{}</div><div style="font-size:12px; color:#888; margin-top:6px;">{}</div></td>"#,
        cx.palette.primary,
        cx.esc(value),
        unit
    )
}

pub fn countdown(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "До конца акции");
    let days = fields::scalar(data, "days", "03");
    let hours = fields::scalar(data, "hours", "12");
    let minutes = fields::scalar(data, "minutes", "45");

    row(
        "28px 32px",
        "center",
        &format!(
            r#"<div style="font-size:18px; color:{}; margin-bottom:16px;">{}</div><table role="presentation" cellpadding="0" cellspacing="0" border="0" align="center"><tr>{}{}{}</tr></table>"#,
            cx.palette.primary,
            cx.esc(&title),
            time_box(cx, &days, "дней"),
            time_box(cx, &hours, "часов"),
            time_box(cx, &minutes, "минут")
        ),
    )
}

pub fn timer(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let title = fields::text(data, "title", "Предложение истекает через");
    let deadline = fields::text(data, "deadline", "23:59:59");

    row(
        "20px 32px",
        "center",
        &format!(
            r#"<span style="color:#666;">{}</span> <span style="display:inline-block; font-family:'Courier New', monospace; font-size:22px; font-weight:bold; color:{}; background:#f3f4f8; padding:6px 12px; border-radius:4px;">{}</span>"#,
            cx.esc(&title),
            cx.palette.accent,
            cx.esc(&deadline)
        ),
    )
}
