/*!
format.rs

Human-readable output helpers (banner + aligned table) for `fs-recon`.

Style is decided once per invocation:
  - stdout not a tty -> plain
  - NO_COLOR set -> no ANSI escapes
  - NO_EMOJI set -> no emoji glyphs
  - COLUMNS      -> terminal width (clamped 40..=220, default 100)

Machine output (`--json`, plain command lines) never goes through here.
*/

use std::borrow::Cow;
use std::io::IsTerminal;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let term_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        if !std::io::stdout().is_terminal() {
            return Self::plain(term_width);
        }

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width,
        }
    }

    /// No color, no emoji; used by tests and when piping.
    pub fn plain(term_width: usize) -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Heading,
    Flag,
    Value,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Heading => "1;38;5;45",
        Role::Flag => "38;5;214",
        Role::Value => "38;5;250",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "brain" => "🧠",
        "list" => "📜",
        _ => "",
    }
}

/// One-line boxed title with an optional dimmed subtitle.
pub fn banner(title: impl AsRef<str>, subtitle: Option<&str>, style: &StyleOptions) -> String {
    let mut inner = color(Role::Heading, title.as_ref(), style);
    if let Some(sub) = subtitle {
        inner.push_str("  ");
        inner.push_str(&color(Role::Dim, sub, style));
    }

    let max_inner = style.term_width.saturating_sub(4).max(10);
    let width = visible_width(&inner).min(max_inner);
    let rule = "─".repeat(width + 2);
    let pad = " ".repeat(width.saturating_sub(visible_width(&inner)));

    format!("┌{rule}┐\n│ {inner}{pad} │\n└{rule}┘")
}

/// Left-aligned columns separated by two spaces; the last column is not padded.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| visible_width(h)).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(visible_width(cell));
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == last {
                    c.clone()
                } else {
                    let fill = widths[i].saturating_sub(visible_width(c));
                    format!("{c}{}", " ".repeat(fill))
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(
        headers
            .iter()
            .map(|h| color(Role::Heading, h, style))
            .collect(),
    ));
    lines.push(color(
        Role::Dim,
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
        style,
    ));
    for row in rows {
        let mut cells: Vec<String> = row.iter().take(headers.len()).cloned().collect();
        cells.resize(headers.len(), String::new());
        lines.push(render_row(cells));
    }
    lines.join("\n")
}

/// Drop `ESC [ ... <letter>` sequences.
fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for t in chars.by_ref() {
                if t.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}
