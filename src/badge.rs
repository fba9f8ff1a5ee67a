use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Warning,
    Destructive,
    Secondary,
    Info,
    Default,
}

impl Variant {
    pub fn color(self) -> Color {
        match self {
            Variant::Success => Color::Green,
            Variant::Warning => Color::Yellow,
            Variant::Destructive => Color::Red,
            Variant::Secondary => Color::DarkGray,
            Variant::Info => Color::Cyan,
            Variant::Default => Color::Gray,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub variant: Variant,
    pub label: String,
}

const STATUS_CONFIG: &[(&str, Variant, Option<&str>)] = &[
    ("active", Variant::Success, None),
    ("inactive", Variant::Secondary, None),
    ("on-leave", Variant::Warning, Some("On Leave")),
    ("pending", Variant::Warning, None),
    ("processing", Variant::Info, None),
    ("shipped", Variant::Info, None),
    ("delivered", Variant::Success, None),
    ("cancelled", Variant::Destructive, None),
    ("paid", Variant::Success, None),
    ("failed", Variant::Destructive, None),
    ("in-stock", Variant::Success, Some("In Stock")),
    ("low-stock", Variant::Warning, Some("Low Stock")),
    ("out-of-stock", Variant::Destructive, Some("Out of Stock")),
    ("available", Variant::Success, None),
    ("rented", Variant::Info, None),
    ("sold", Variant::Secondary, None),
    ("completed", Variant::Success, None),
    // task priorities
    ("high", Variant::Destructive, None),
    ("medium", Variant::Warning, None),
    ("low", Variant::Success, None),
];

pub fn badge(status: &str) -> Badge {
    let (variant, label) = STATUS_CONFIG
        .iter()
        .find(|(s, _, _)| *s == status)
        .map(|(_, v, l)| (*v, *l))
        .unwrap_or((Variant::Default, None));

    Badge {
        variant,
        label: label.map(str::to_string).unwrap_or_else(|| capitalize(status)),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
