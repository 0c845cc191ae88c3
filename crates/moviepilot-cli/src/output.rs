use clap::ValueEnum;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    /// `--quiet` silences everything written to stdout.
    fn should_print(&self) -> bool {
        !self.quiet
    }

    fn message(&self, kind: &str, msg: &str, human: impl Fn(&str)) {
        if !self.should_print() {
            return;
        }

        match self.format {
            OutputFormat::Human => human(msg),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": kind,
                    "message": msg
                }));
            }
        }
    }

    /// Print a result document. In human mode the caller renders tables instead.
    pub fn json(&self, data: &serde_json::Value) {
        if !self.should_print() {
            return;
        }

        self.print_json(data);
    }

    pub fn table(&self, table: &Table) {
        if !self.should_print() || !self.is_human() {
            return;
        }
        println!("{}", table);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty | OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }
}

/// Rounded UTF-8 table with a bold cyan header row.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

/// Render a scalar JSON field for a table cell.
pub fn display_field(item: &serde_json::Value, key: &str) -> String {
    match item.get(key) {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => "-".to_string(),
    }
}

/// Show the first and last two characters of a secret.
pub fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("hunter22"), "hu***22");
        assert_eq!(mask_string("密码很长的口令"), "密码***口令");
    }

    #[test]
    fn test_display_field() {
        let item = json!({"title": "Inception", "year": 2010, "overview": "", "tags": []});
        assert_eq!(display_field(&item, "title"), "Inception");
        assert_eq!(display_field(&item, "year"), "2010");
        assert_eq!(display_field(&item, "overview"), "-");
        assert_eq!(display_field(&item, "tags"), "-");
        assert_eq!(display_field(&item, "missing"), "-");
    }

    #[test]
    fn test_quiet_silences_every_format() {
        for format in [OutputFormat::Human, OutputFormat::Json, OutputFormat::JsonPretty] {
            assert!(!Output::new(format, true).should_print());
            assert!(Output::new(format, false).should_print());
        }
    }

    #[test]
    fn test_new_table_has_header() {
        let table = new_table(&["Title", "TMDB ID"]);
        let rendered = table.to_string();
        assert!(rendered.contains("Title"));
        assert!(rendered.contains("TMDB ID"));
    }
}
