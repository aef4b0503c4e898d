use std::iter::FusedIterator;

use crate::domain::{Filing, FilingTable};

/// Expand a column-major [`FilingTable`] into row-major [`Filing`]s.
///
/// The row count is the length of `accession_number`; an absent accession sequence
/// yields no rows. Row `i` takes element `i` of every present sequence, and a sequence
/// that is absent or shorter than the accession list leaves that field `None`.
/// Rows come out in index order and are built on demand.
pub fn transpose<'a>(cik: &'a str, table: &'a FilingTable) -> FilingRows<'a> {
    FilingRows {
        cik,
        table,
        index: 0,
        len: table.accession_number.as_ref().map_or(0, Vec::len),
    }
}

/// Lazy iterator returned by [`transpose`].
#[derive(Debug, Clone)]
pub struct FilingRows<'a> {
    cik: &'a str,
    table: &'a FilingTable,
    index: usize,
    len: usize,
}

fn cell<T: Clone>(column: &Option<Vec<T>>, index: usize) -> Option<T> {
    column.as_ref().and_then(|values| values.get(index)).cloned()
}

impl FilingRows<'_> {
    fn row(&self, i: usize) -> Filing {
        let table = self.table;
        Filing {
            cik: self.cik.to_owned(),
            accession_number: cell(&table.accession_number, i),
            filing_date: cell(&table.filing_date, i),
            report_date: cell(&table.report_date, i),
            acceptance_date_time: cell(&table.acceptance_date_time, i),
            act: cell(&table.act, i),
            form: cell(&table.form, i),
            file_number: cell(&table.file_number, i),
            film_number: cell(&table.film_number, i),
            items: cell(&table.items, i),
            size: cell(&table.size, i),
            is_xbrl: cell(&table.is_xbrl, i),
            is_inline_xbrl: cell(&table.is_inline_xbrl, i),
            primary_document: cell(&table.primary_document, i),
            primary_doc_description: cell(&table.primary_doc_description, i),
            index_url: None,
            primary_document_url: None,
        }
    }
}

impl Iterator for FilingRows<'_> {
    type Item = Filing;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let filing = self.row(self.index);
        self.index += 1;
        Some(filing)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FilingRows<'_> {}

impl FusedIterator for FilingRows<'_> {}
