//! Splits a raw export that holds several concatenated CSV documents back into
//! independent documents.
//!
//! Some exports repeat the header line mid-file with no separator, e.g.
//!
//! ```text
//! product,price,quantity,date,region
//! Pink Morsel,$3.00,10,2021-01-10,north
//! product,price,quantity,date,region
//! pink morsel,$3.50,5,2021-01-20,east
//! ```
//!
//! Every occurrence of the header starts a new document. Assumes the header text
//! never appears inside a data field.

const BOM: char = '\u{FEFF}';

/// One reconstituted document and where its rows start in the physical file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairedDocument {
    /// Header line, newline, then the segment body.
    pub text: String,
    /// 1-based line of the file holding the first body row.
    pub first_body_line: u64,
}

impl RepairedDocument {
    /// Maps a line number inside `text` (header = line 1) to the line in the file.
    pub fn file_line(&self, document_line: u64) -> u64 {
        self.first_body_line + document_line.saturating_sub(2)
    }
}

/// Returns one well-formed document (header line + body) per non-blank segment,
/// in file order. Segments that are empty or whitespace-only are dropped, so a
/// file starting with the header, a header-only block, or an empty file never
/// yields a document without rows. A leading byte order mark is ignored.
pub fn split_concatenated_documents(raw: &str, header: &str) -> Vec<RepairedDocument> {
    let raw = raw.strip_prefix(BOM).unwrap_or(raw);

    let mut bounds = Vec::new();
    let mut start = 0;
    if !header.is_empty() {
        for (idx, _) in raw.match_indices(header) {
            bounds.push((start, idx));
            start = idx + header.len();
        }
    }
    bounds.push((start, raw.len()));

    bounds
        .into_iter()
        .filter_map(|(from, to)| {
            let segment = &raw[from..to];
            let body = segment.trim();
            if body.is_empty() {
                return None;
            }
            let body_start = from + (segment.len() - segment.trim_start().len());
            let first_body_line = raw[..body_start].bytes().filter(|b| *b == b'\n').count() as u64 + 1;
            let text = if header.is_empty() {
                body.to_string()
            } else {
                format!("{}\n{}", header, body)
            };
            Some(RepairedDocument { text, first_body_line })
        })
        .collect()
}
