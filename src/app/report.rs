use crate::domain::model::{RunReport, SourceResultSet};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

const HEADERS: [&str; 4] = [
    "Язык программирования",
    "Вакансий найдено",
    "Вакансий обработано",
    "Средняя зарплата",
];

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_report(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// All result sets as ASCII tables separated by a blank line.
pub fn render_report(report: &RunReport) -> String {
    report
        .result_sets
        .iter()
        .map(render_table)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Draws one source's statistics with the title set into the top border.
pub fn render_table(result_set: &SourceResultSet) -> String {
    let title = format!("{} (area id: {})", result_set.source, result_set.region_id);

    let mut rows: Vec<[String; 4]> = vec![HEADERS.map(str::to_string)];
    rows.extend(result_set.iter().map(|(language, stats)| {
        [
            language.to_string(),
            stats.vacancies_found.to_string(),
            stats.vacancies_processed.to_string(),
            stats
                .average_salary
                .map(|avg| avg.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }));

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+", border);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(titled_border(&border, &title));
    for (index, row) in rows.iter().enumerate() {
        let cells = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                let padding = width - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(padding))
            })
            .collect::<Vec<_>>()
            .join("|");
        lines.push(format!("|{}|", cells));
        if index == 0 {
            lines.push(border.clone());
        }
    }
    lines.push(border);

    lines.join("\n")
}

fn titled_border(border: &str, title: &str) -> String {
    let border_len = border.chars().count();
    let title_len = title.chars().count();
    if title_len + 2 > border_len {
        return format!("{}\n{}", title, border);
    }
    let rest: String = border.chars().skip(title_len + 1).collect();
    format!("+{}{}", title, rest)
}

#[derive(Serialize)]
struct JsonSource<'a> {
    source: String,
    region_id: u32,
    languages: Vec<JsonLanguage<'a>>,
}

#[derive(Serialize)]
struct JsonLanguage<'a> {
    language: &'a str,
    vacancies_found: u64,
    vacancies_processed: u64,
    average_salary: Option<u64>,
}

pub fn render_json(report: &RunReport) -> Result<String> {
    let sources: Vec<JsonSource> = report
        .result_sets
        .iter()
        .map(|set| JsonSource {
            source: set.source.to_string(),
            region_id: set.region_id,
            languages: set
                .iter()
                .map(|(language, stats)| JsonLanguage {
                    language,
                    vacancies_found: stats.vacancies_found,
                    vacancies_processed: stats.vacancies_processed,
                    average_salary: stats.average_salary,
                })
                .collect(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&sources)?)
}
