//! HTML extraction.
//!
//! We only ever need the tables of a page so the document is parsed once with `scraper` and
//! everything is copied out into owned `Table`/`Row`/`Cell` values.  The resulting `Page` can be
//! moved across `.await` points, unlike the `scraper` DOM.
//!

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::{parse_string, SourceError};

/// Kind of cell, `<td>` or `<th>`.
///
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CellKind {
    Data,
    Header,
    /// Anything else found directly inside a `<tr>`
    Other,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    /// Whitespace-collapsed text content
    pub text: String,
}

/// One `<tr>` with all its child elements in document order.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Text of the `n`-th child element (0-based) if it is a `<td>`.
    ///
    /// Header rows made of `<th>` therefore yield nothing.
    ///
    pub fn cell(&self, n: usize) -> Option<&str> {
        match self.cells.get(n) {
            Some(Cell {
                kind: CellKind::Data,
                text,
            }) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Same as `cell()` but an absent cell is the empty string.
    ///
    #[inline]
    pub fn text(&self, n: usize) -> &str {
        self.cell(n).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All the tables of an HTML document, in document order.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Page {
    tables: Vec<Table>,
}

fn selector(s: &str) -> Result<Selector, SourceError> {
    Selector::parse(s).map_err(|e| SourceError::BadParam(format!("selector {s}: {e}")))
}

impl Page {
    /// Parse a full HTML document.
    ///
    #[tracing::instrument(skip(html))]
    pub fn parse(html: &str) -> Result<Self, SourceError> {
        let doc = Html::parse_document(html);

        let sel_table = selector("table")?;
        let sel_tr = selector("tr")?;

        let tables: Vec<Table> = doc
            .select(&sel_table)
            .map(|t| Table {
                rows: t.select(&sel_tr).map(read_row).collect(),
            })
            .collect();

        trace!("found {} tables", tables.len());
        Ok(Page { tables })
    }

    /// The `n`-th table (0-based).
    ///
    #[inline]
    pub fn table(&self, n: usize) -> Option<&Table> {
        self.tables.get(n)
    }

    #[inline]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}

fn read_row(tr: ElementRef<'_>) -> Row {
    let cells = tr
        .children()
        .filter_map(ElementRef::wrap)
        .map(|e| {
            let kind = match e.value().name() {
                "td" => CellKind::Data,
                "th" => CellKind::Header,
                _ => CellKind::Other,
            };
            let text = parse_string(&e.text().collect::<String>());
            Cell { kind, text }
        })
        .collect();
    Row { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r##"
<html><body>
<h1>Results</h1>
<table>
  <thead><tr><th>County</th><th>Cases</th><th>Other</th></tr></thead>
  <tbody>
    <tr><td>Boone</td><td>5</td><td>1</td></tr>
    <tr><td> Kansas
        City </td><td>1,204</td><td></td></tr>
  </tbody>
</table>
<table>
  <tr><th>County</th><th>Deaths</th></tr>
  <tr><td>Greene</td><td>2</td></tr>
</table>
</body></html>
"##;

    #[test]
    fn test_page_tables() -> Result<(), SourceError> {
        let page = Page::parse(HTML)?;
        assert_eq!(2, page.tables().len());
        assert_eq!(3, page.table(0).unwrap().len());
        assert_eq!(2, page.table(1).unwrap().len());
        assert!(page.table(2).is_none());
        Ok(())
    }

    #[test]
    fn test_page_cells() -> Result<(), SourceError> {
        let page = Page::parse(HTML)?;
        let rows = page.table(0).unwrap().rows();

        // header row has no <td>
        assert_eq!(None, rows[0].cell(0));
        assert_eq!("", rows[0].text(0));

        assert_eq!(Some("Boone"), rows[1].cell(0));
        assert_eq!(Some("5"), rows[1].cell(1));
        assert_eq!(Some("Kansas City"), rows[2].cell(0));
        assert_eq!(Some("1,204"), rows[2].cell(1));
        assert_eq!(Some(""), rows[2].cell(2));
        assert_eq!(None, rows[2].cell(3));
        Ok(())
    }

    #[test]
    fn test_page_inline_markup() -> Result<(), SourceError> {
        let page = Page::parse(
            "<table><tr><td><b>Boo</b>ne</td><td>1<span>2</span></td><td><a>St.</a> Louis <i>City</i></td></tr></table>",
        )?;
        let row = &page.table(0).unwrap().rows()[0];
        assert_eq!("Boone", row.text(0));
        assert_eq!("12", row.text(1));
        assert_eq!("St. Louis City", row.text(2));
        Ok(())
    }

    #[test]
    fn test_page_no_table() -> Result<(), SourceError> {
        let page = Page::parse("<p>nothing here</p>")?;
        assert!(page.tables().is_empty());
        Ok(())
    }
}
