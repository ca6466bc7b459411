use crate::config::{compile_selector, DigestConfig};
use crate::core::html_text::inline_text;
use crate::core::url_resolver::DetailUrlResolver;
use crate::domain::model::{ListingScan, NoticeRecord};
use crate::utils::error::Result;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;

/// Parses a board listing page into notice records.
///
/// Rows come from the first configured row selector that matches anything.
/// Each row goes through: header check, link check, data-cell check,
/// category resolution, prefix filter. Rows failing a step are counted in
/// [`ListingScan::skipped`] and otherwise ignored.
pub struct ListingParser {
    config: Arc<DigestConfig>,
    resolver: DetailUrlResolver,
    row_selectors: Vec<(String, Selector)>,
    category_selectors: Vec<Selector>,
    header_cell: Selector,
    link: Selector,
    data_cell: Selector,
}

impl ListingParser {
    pub fn new(config: Arc<DigestConfig>) -> Result<Self> {
        let resolver = DetailUrlResolver::new(&config.listing_url, &config.default_menu_no)?;
        let row_selectors = config
            .selectors
            .rows
            .iter()
            .map(|s| Ok((s.clone(), compile_selector(s)?)))
            .collect::<Result<Vec<_>>>()?;
        let category_selectors = crate::config::compile_selectors(&config.selectors.category)?;

        Ok(Self {
            resolver,
            row_selectors,
            category_selectors,
            header_cell: compile_selector("th")?,
            link: compile_selector("a[href]")?,
            data_cell: compile_selector("td")?,
            config,
        })
    }

    pub fn scan(&self, html: &str) -> ListingScan {
        let document = Html::parse_document(html);
        let mut scan = ListingScan::default();

        let Some((selector, rows)) = self.find_rows(&document) else {
            tracing::debug!("No row selector matched the listing page");
            return scan;
        };
        tracing::debug!("Row selector '{}' matched {} rows", selector, rows.len());
        scan.matched_selector = Some(selector.to_string());

        for row in rows {
            if row.select(&self.header_cell).next().is_some() {
                scan.skipped.header += 1;
                continue;
            }

            let Some(link) = row.select(&self.link).next() else {
                scan.skipped.no_link += 1;
                continue;
            };

            let cells: Vec<ElementRef<'_>> = row.select(&self.data_cell).collect();
            if cells.is_empty() {
                scan.skipped.no_cells += 1;
                continue;
            }

            let Some(category) = self.resolve_category(row, &cells) else {
                scan.skipped.no_category += 1;
                continue;
            };

            if !self.config.matches_prefix(&category) {
                scan.skipped.rejected_category += 1;
                scan.rejected_categories.insert(category);
                continue;
            }

            let href = link.value().attr("href").unwrap_or_default();
            let url = match self.resolver.resolve(href) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping row with unresolvable link '{}': {}", href, e);
                    scan.skipped.unresolved_link += 1;
                    continue;
                }
            };

            scan.records.push(NoticeRecord::new(
                inline_text(link),
                category,
                url,
                cells.last().map(|cell| inline_text(*cell)).unwrap_or_default(),
            ));
        }

        scan
    }

    /// First selector, in priority order, with at least one match.
    fn find_rows<'a>(&'a self, document: &'a Html) -> Option<(&'a str, Vec<ElementRef<'a>>)> {
        self.row_selectors
            .iter()
            .map(|(name, selector)| (name.as_str(), document.select(selector).collect::<Vec<_>>()))
            .find(|(_, rows)| !rows.is_empty())
    }

    /// Second cell, then class selectors, then first cell. Blank values and
    /// the placeholder category never count as a candidate.
    fn resolve_category(&self, row: ElementRef<'_>, cells: &[ElementRef<'_>]) -> Option<String> {
        let second_cell = std::iter::once_with(|| cells.get(1).map(|cell| inline_text(*cell))).flatten();
        let by_class = self
            .category_selectors
            .iter()
            .filter_map(move |selector| row.select(selector).next().map(inline_text));
        let first_cell = std::iter::once_with(|| cells.first().map(|cell| inline_text(*cell))).flatten();

        second_cell
            .chain(by_class)
            .chain(first_cell)
            .find(|candidate| !candidate.is_empty() && !self.config.is_placeholder(candidate))
    }
}
