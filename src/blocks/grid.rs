use super::{RenderContext, action_button, row};
use crate::fields;
use crate::value::{FieldBag, Value};

/// Closes one grid row and opens the next.
pub const ROW_BREAK: &str = "</tr><tr>";

const COLUMNS: usize = 3;

/// Lays cells out three per row; a break precedes every item whose index is a
/// non-zero multiple of three, so `n` cells produce `ceil(n / 3) - 1` breaks.
pub(crate) fn grid_cells<I>(cells: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for (index, cell) in cells.into_iter().enumerate() {
        if index % COLUMNS == 0 && index > 0 {
            out.push_str(ROW_BREAK);
        }
        out.push_str(&cell);
    }
    out
}

fn grid_table(cells: String) -> String {
    format!(
        r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%"><tr>{}</tr></table>"#,
        cells
    )
}

pub fn gallery(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let images = fields::records_or(
        data,
        "images",
        "src",
        &[
            &[("src", "https://placehold.co/180x180"), ("alt", "Фото 1")],
            &[("src", "https://placehold.co/180x180"), ("alt", "Фото 2")],
            &[("src", "https://placehold.co/180x180"), ("alt", "Фото 3")],
        ],
    );

    let cells = images.iter().map(|image| {
        format!(
            r#"<td width="33%" style="padding:4px;"><img src="{}" alt="{}" width="176" style="display:block; width:100%; border:0; border-radius:4px;"></td>"#,
            cx.esc(&fields::text(image, "src", "https://placehold.co/180x180")),
            cx.esc(&fields::text(image, "alt", ""))
        )
    });

    row("16px 28px", "center", &grid_table(grid_cells(cells)))
}

pub fn features(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let items = fields::records_or(
        data,
        "items",
        "title",
        &[
            &[("icon", "⚡"), ("title", "Быстро"), ("description", "Запуск за пять минут")],
            &[("icon", "🔒"), ("title", "Надёжно"), ("description", "Данные под защитой")],
            &[("icon", "💬"), ("title", "Поддержка"), ("description", "Отвечаем круглосуточно")],
        ],
    );

    let cells = items.iter().map(|item| {
        format!(
            r#"<td valign="top" width="33%" style="padding:12px; text-align:center;"><div style="font-size:28px;">{}</div><div style="font-weight:bold; color:{}; margin:8px 0 4px;">{}</div><div style="font-size:13px; color:#777;">{}</div></td>"#,
            cx.esc(&fields::text(item, "icon", "★")),
            cx.palette.primary,
            cx.esc(&fields::text(item, "title", "Преимущество")),
            cx.esc(&fields::text(item, "description", ""))
        )
    });

    row("24px 20px", "center", &grid_table(grid_cells(cells)))
}

pub fn cards(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let items = fields::records_or(
        data,
        "items",
        "title",
        &[
            &[
                ("image", "https://placehold.co/180x120"),
                ("title", "Товар 1"),
                ("text", "Краткое описание"),
                ("url", "#"),
            ],
            &[
                ("image", "https://placehold.co/180x120"),
                ("title", "Товар 2"),
                ("text", "Краткое описание"),
                ("url", "#"),
            ],
            &[
                ("image", "https://placehold.co/180x120"),
                ("title", "Товар 3"),
                ("text", "Краткое описание"),
                ("url", "#"),
            ],
        ],
    );

    let cells = items.iter().map(|item| {
        format!(
            r#"<td valign="top" width="33%" style="padding:6px;"><a href="{}" style="text-decoration:none;"><img src="{}" alt="" width="172" style="display:block; width:100%; border:0; border-radius:4px 4px 0 0;"><div style="background:#f7f8fc; padding:10px; border-radius:0 0 4px 4px;"><div style="font-weight:bold; color:{};">{}</div><div style="font-size:13px; color:#777; margin-top:4px;">{}</div></div></a></td>"#,
            cx.esc(&fields::text(item, "url", "#")),
            cx.esc(&fields::text(item, "image", "https://placehold.co/180x120")),
            cx.palette.primary,
            cx.esc(&fields::text(item, "title", "Карточка")),
            cx.esc(&fields::text(item, "text", ""))
        )
    });

    row("20px 26px", "center", &grid_table(grid_cells(cells)))
}

const DEFAULT_TIERS: &[(&str, &str, &[&str])] = &[
    ("Базовый", "0 ₽", &["1 проект", "Email-поддержка"]),
    ("Pro", "990 ₽", &["10 проектов", "Приоритетная поддержка", "Аналитика"]),
    ("Бизнес", "2990 ₽", &["Без ограничений", "Персональный менеджер", "API-доступ"]),
];

fn default_tiers() -> Vec<FieldBag> {
    DEFAULT_TIERS
        .iter()
        .map(|(name, price, features)| {
            FieldBag::from([
                ("name".to_string(), Value::from(*name)),
                ("price".to_string(), Value::from(*price)),
                ("period".to_string(), Value::from("в месяц")),
                ("button".to_string(), Value::from("Выбрать")),
                (
                    "features".to_string(),
                    Value::List(features.iter().map(|f| Value::from(*f)).collect()),
                ),
            ])
        })
        .collect()
}

pub fn pricing(data: &FieldBag, cx: &RenderContext<'_>) -> String {
    let mut tiers = fields::records_or(data, "items", "name", &[]);
    if tiers.is_empty() {
        tiers = default_tiers();
    }
    let width = 100 / tiers.len().max(1);

    let columns: String = tiers
        .iter()
        .map(|tier| {
            let features: String = fields::strings_or(tier, "features", &[])
                .iter()
                .map(|feature| {
                    format!(
                        r#"<div style="font-size:13px; color:#666; padding:3px 0;">✓ {}</div>"#,
                        cx.esc(feature)
                    )
                })
                .collect();

            format!(
                r#"<td valign="top" width="{}%" style="padding:6px;"><div style="border:1px solid #e3e6ee; border-radius:6px; padding:18px 10px; text-align:center;"><div style="font-weight:bold; color:{};">{}</div><div style="font-size:24px; font-weight:bold; color:{}; margin:10px 0 2px;">{}</div><div style="font-size:12px; color:#999; margin-bottom:12px;">{}</div>{}<div style="margin-top:14px;">{}</div></div></td>"#,
                width,
                cx.palette.primary,
                cx.esc(&fields::text(tier, "name", "Тариф")),
                cx.palette.accent,
                cx.esc(&fields::scalar(tier, "price", "")),
                cx.esc(&fields::text(tier, "period", "")),
                features,
                action_button(
                    cx,
                    &fields::text(tier, "button", "Выбрать"),
                    &fields::text(tier, "url", "#")
                )
            )
        })
        .collect();

    row("24px 20px", "center", &grid_table(columns))
}

#[cfg(test)]
mod tests {
    use super::{ROW_BREAK, grid_cells};
    use crate::blocks::testing::render;
    use crate::value::{FieldBag, Value, bag};

    fn items(n: usize) -> Value {
        Value::List(
            (0..n)
                .map(|i| Value::Map(bag([("title", format!("item {i}"))])))
                .collect(),
        )
    }

    #[test]
    fn row_breaks_every_three_cells() {
        let cells = |n: usize| grid_cells((0..n).map(|i| format!("<td>{i}</td>")));

        assert_eq!(cells(0), "");
        assert_eq!(cells(3).matches(ROW_BREAK).count(), 0);
        assert_eq!(cells(4).matches(ROW_BREAK).count(), 1);
        assert_eq!(cells(7).matches(ROW_BREAK).count(), 2);
        assert!(cells(4).starts_with("<td>0</td>"));
        assert!(cells(4).ends_with("</tr><tr><td>3</td>"));
    }

    #[test]
    fn features_and_cards_break_rows() {
        for tag in ["features", "cards"] {
            let out = render(tag, bag([("items", items(5))]));
            assert_eq!(out.matches(ROW_BREAK).count(), 1, "{tag}");
            assert!(out.contains("item 4"));
        }
    }

    #[test]
    fn gallery_accepts_plain_urls() {
        let images = Value::List((0..4).map(|i| format!("https://img/{i}.png").into()).collect());
        let out = render("gallery", bag([("images", images)]));
        assert_eq!(out.matches("<img ").count(), 4);
        assert_eq!(out.matches(ROW_BREAK).count(), 1);
        assert!(out.contains(r#"src="https://img/3.png""#));
    }

    #[test]
    fn pricing_defaults_to_three_tiers_in_order() {
        let out = render("pricing", FieldBag::new());
        assert_eq!(out.matches(r#"<td valign="top" width="33%""#).count(), 3);

        let basic = out.find(">Базовый<").expect("basic tier");
        let pro = out.find(">Pro<").expect("pro tier");
        let business = out.find(">Бизнес<").expect("business tier");
        assert!(basic < pro && pro < business);
        assert_eq!(out.matches(ROW_BREAK).count(), 0);
        assert_eq!(out.matches("✓ ").count(), 8);
        assert!(out.contains(">990 ₽<"));
        assert!(out.contains("✓ Аналитика<"));
    }

    #[test]
    fn pricing_lists_tier_features() {
        let tier = Value::Map(bag([
            ("name", Value::from("Solo")),
            ("features", Value::List(vec!["A".into(), "B".into()])),
        ]));
        let out = render("pricing", bag([("items", Value::List(vec![tier]))]));
        assert!(out.contains(r#"width="100%" style="padding:6px;""#));
        assert_eq!(out.matches("✓ ").count(), 2);
    }
}
