use crate::{config::ReportConfig, prepare::ReportData};
use chrono::{DateTime, Local};
use densite_domain::Locality;
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: 'Segoe UI', Arial, sans-serif; margin: 2rem; color: #1c2733; }\n\
h1 { border-bottom: 2px solid #2c6e91; padding-bottom: .3rem; }\n\
h2.type-header { color: #2c6e91; margin-top: 2rem; }\n\
.report-date { color: #6b7a88; }\n\
.stats { display: flex; gap: 1rem; margin: 1.5rem 0; }\n\
.stat-card { background: #eef4f8; border-radius: 8px; padding: 1rem 1.5rem; text-align: center; }\n\
.stat-number { font-size: 1.6rem; font-weight: 600; color: #2c6e91; }\n\
table { border-collapse: collapse; width: 100%; margin-top: .5rem; }\n\
th, td { border: 1px solid #c9d4dc; padding: .45rem .7rem; text-align: left; }\n\
th { background: #2c6e91; color: #fff; }\n\
tr:nth-child(even) { background: #f4f8fb; }\n\
td.num { text-align: right; }\n";

pub(crate) fn render(
    data: &ReportData,
    config: &ReportConfig,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Population density report</title>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");

    out.push_str("<h1>Population density report</h1>\n");
    let _ = writeln!(
        out,
        "<p class=\"report-date\">Report date: {}</p>",
        generated_at.format("%d/%m/%Y %H:%M")
    );

    if let Some(stats) = &data.stats {
        out.push_str("<div class=\"stats\">\n");
        card(&mut out, &stats.count.to_string(), "Localities");
        card(&mut out, &format!("{:.2}", stats.average), "Average density");
        card(&mut out, &format!("{:.2}", stats.min), "Minimum density");
        card(&mut out, &format!("{:.2}", stats.max), "Maximum density");
        out.push_str("</div>\n");
    }

    if config.group_by_kind() {
        for (kind, members) in &data.groups {
            let _ = writeln!(out, "<h2 class=\"type-header\">{}</h2>", escape(&kind.to_string()));
            table(&mut out, members);
        }
    } else {
        table(&mut out, &data.ordered);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn card(out: &mut String, number: &str, label: &str) {
    let _ = writeln!(
        out,
        "<div class=\"stat-card\"><div class=\"stat-number\">{number}</div><div>{label}</div></div>"
    );
}

fn table(out: &mut String, localities: &[Locality]) {
    out.push_str("<table>\n<tr><th>Name</th><th>Population</th><th>Area (km²)</th>");
    out.push_str("<th>Density (per km²)</th><th>Kind</th><th>Registered at</th></tr>\n");
    for locality in localities {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{:.2}</td>\
             <td class=\"num\">{:.2}</td><td>{}</td><td>{}</td></tr>",
            escape(locality.name()),
            locality.population(),
            locality.area(),
            locality.density(),
            escape(&locality.kind().to_string()),
            locality.registered_at().format("%d/%m/%Y %H:%M")
        );
    }
    out.push_str("</table>\n");
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape("<b>\"Beau & Fort\"</b>"), "&lt;b&gt;&quot;Beau &amp; Fort&quot;&lt;/b&gt;");
    }
}
