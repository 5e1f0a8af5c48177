use crate::{config::ReportConfig, prepare::ReportData};
use densite_domain::Locality;
use std::{borrow::Cow, fmt::Write};

/// UTF-8 byte order mark so spreadsheet tools pick the right encoding.
const BOM: char = '\u{feff}';
/// Field separator; French locale spreadsheets reserve `,` for decimals.
const SEP: char = ';';

pub(crate) fn render(data: &ReportData, config: &ReportConfig) -> String {
    let mut out = String::new();
    out.push(BOM);

    if let Some(stats) = &data.stats {
        let _ = writeln!(out, "Localities{SEP}Average density{SEP}Minimum density{SEP}Maximum density");
        let _ = writeln!(
            out,
            "{}{SEP}{}{SEP}{}{SEP}{}",
            stats.count,
            format_fr(stats.average),
            format_fr(stats.min),
            format_fr(stats.max)
        );
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Kind{SEP}Name{SEP}Population{SEP}Area (km²){SEP}Density (per km²){SEP}Registered at"
    );

    if config.group_by_kind() {
        for (_, members) in &data.groups {
            for locality in members {
                row(&mut out, locality);
            }
        }
    } else {
        for locality in &data.ordered {
            row(&mut out, locality);
        }
    }

    out
}

fn row(out: &mut String, locality: &Locality) {
    let kind = locality.kind().to_string();
    let _ = writeln!(
        out,
        "{}{SEP}{}{SEP}{}{SEP}{}{SEP}{}{SEP}{}",
        escape(&kind),
        escape(locality.name()),
        locality.population(),
        format_fr(locality.area()),
        format_fr(locality.density()),
        locality.registered_at().format("%d/%m/%Y %H:%M")
    );
}

/// Quotes a field when it carries a separator, quote, or line break,
/// doubling embedded quotes per RFC 4180.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', ';', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Renders a number with two decimals in French notation: comma as the
/// decimal mark and narrow no-break spaces grouping thousands.
fn format_fr(value: f64) -> String {
    let raw = format!("{value:.2}");
    let (int, frac) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let (sign, digits) = int.strip_prefix('-').map_or(("", int), |rest| ("-", rest));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped},{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_stay_unquoted() {
        assert_eq!(escape("Petit Bourg"), "Petit Bourg");
    }

    #[test]
    fn separators_and_quotes_trigger_quoting() {
        assert_eq!(escape("Foo, Bar"), "\"Foo, Bar\"");
        assert_eq!(escape("a;b"), "\"a;b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn french_number_formatting() {
        assert_eq!(format_fr(0.5), "0,50");
        assert_eq!(format_fr(1234.0), "1\u{202f}234,00");
        assert_eq!(format_fr(1_234_567.891), "1\u{202f}234\u{202f}567,89");
        assert_eq!(format_fr(-1234.5), "-1\u{202f}234,50");
    }
}
