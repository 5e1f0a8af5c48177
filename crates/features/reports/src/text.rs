use crate::{config::ReportConfig, prepare::ReportData};
use chrono::{DateTime, Local};
use densite_domain::Locality;
use std::fmt::Write;

pub(crate) fn render(
    data: &ReportData,
    config: &ReportConfig,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();

    out.push_str("POPULATION DENSITY REPORT\n");
    out.push_str("=========================\n");
    let _ = writeln!(out, "Report date: {}", generated_at.format("%d/%m/%Y %H:%M"));
    out.push('\n');

    if let Some(stats) = &data.stats {
        out.push_str("GENERAL STATISTICS\n");
        out.push_str("------------------\n");
        let _ = writeln!(out, "Total localities: {}", stats.count);
        let _ = writeln!(out, "Average density: {:.2} inh/km²", stats.average);
        let _ = writeln!(out, "Maximum density: {:.2} inh/km²", stats.max);
        let _ = writeln!(out, "Minimum density: {:.2} inh/km²", stats.min);
        out.push('\n');
    }

    if config.group_by_kind() {
        for (kind, members) in &data.groups {
            let title = kind.to_string();
            let _ = writeln!(out, "{title}");
            let _ = writeln!(out, "{}", "-".repeat(title.len()));
            listing(&mut out, members);
            out.push('\n');
        }
    } else {
        listing(&mut out, &data.ordered);
    }

    out
}

fn listing(out: &mut String, localities: &[Locality]) {
    let _ = writeln!(
        out,
        "{:<30} {:>12} {:>14} {:>18} {:<8}",
        "Name", "Population", "Area (km²)", "Density (/km²)", "Kind"
    );
    let _ = writeln!(out, "{}", "-".repeat(86));
    for locality in localities {
        let _ = writeln!(
            out,
            "{:<30} {:>12} {:>14.2} {:>18.2} {:<8}",
            locality.name(),
            locality.population(),
            locality.area(),
            locality.density(),
            locality.kind().to_string()
        );
    }
}
