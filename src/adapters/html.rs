//! HTML page parsers for the two schedule layouts.

use crate::domain::model::SourceRow;
use crate::domain::ports::RowParser;
use crate::leagues::SourceShape;
use crate::utils::error::{EtlError, Result};
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::ParseError {
        message: format!("invalid selector '{}': {}", css, e),
    })
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn select_text(parent: &ElementRef, selector: &Selector) -> Option<String> {
    parent
        .select(selector)
        .next()
        .map(|e| text_of(&e))
        .filter(|t| !t.is_empty())
}

/// Team full-season list pages: one `div.list-mode-table-wrapper` block per
/// game, with the matchup and promotion carried in data attributes.
#[derive(Debug)]
pub struct ListModeParser {
    container: Selector,
    block: Selector,
    date: Selector,
    time: Selector,
}

impl ListModeParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container: selector("div.list-mode")?,
            block: selector("div.list-mode-table-wrapper")?,
            date: selector("div.month-date")?,
            time: selector("div.primary-time")?,
        })
    }
}

impl RowParser for ListModeParser {
    fn parse(&self, page: &str) -> Result<Vec<SourceRow>> {
        let document = Html::parse_document(page);
        if document.select(&self.container).next().is_none() {
            return Err(EtlError::ParseError {
                message: "no 'list-mode' container on page".to_string(),
            });
        }

        let rows = document
            .select(&self.block)
            .map(|block| {
                let attrs = block.value();
                SourceRow {
                    matchup: attrs.attr("data-tracking-matchup-with-date").map(str::to_string),
                    promo: attrs
                        .attr("data-tracking-featured-promotion")
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(str::to_string),
                    date: select_text(&block, &self.date),
                    time: select_text(&block, &self.time),
                    ..SourceRow::default()
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!("Parsed {} game blocks", rows.len());
        Ok(rows)
    }
}

/// Weekly pages of dated tables: each `.Table__Title` heads the
/// `.Table__TBODY` at the same position. Rows are `away | @ home | time`.
#[derive(Debug)]
pub struct DatedTableParser {
    title: Selector,
    body: Selector,
    row: Selector,
    cell: Selector,
}

impl DatedTableParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: selector(".Table__Title")?,
            body: selector(".Table__TBODY")?,
            row: selector("tr")?,
            cell: selector("td")?,
        })
    }
}

impl RowParser for DatedTableParser {
    fn parse(&self, page: &str) -> Result<Vec<SourceRow>> {
        let document = Html::parse_document(page);
        let mut rows = Vec::new();

        for (title, body) in document.select(&self.title).zip(document.select(&self.body)) {
            let date = text_of(&title);
            for tr in body.select(&self.row) {
                let cells: Vec<String> = tr.select(&self.cell).map(|td| text_of(&td)).collect();
                if cells.len() < 3 {
                    continue;
                }
                rows.push(
                    SourceRow::from_columns(cells[1].clone(), cells[0].clone())
                        .with_date(date.clone())
                        .with_time(cells[2].clone()),
                );
            }
        }

        tracing::debug!("Parsed {} table rows", rows.len());
        Ok(rows)
    }
}

pub fn parser_for(shape: SourceShape) -> Result<Box<dyn RowParser>> {
    Ok(match shape {
        SourceShape::TeamSeason => Box::new(ListModeParser::new()?),
        SourceShape::DatedTables => Box::new(DatedTableParser::new()?),
    })
}
