//! Output formatting for the command line adapter

use crate::api::QueryOutcome;
use crate::index::DocId;
use crate::search::{DocumentSink, Snippet};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// JSON body of a count request
#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    pub occurrences: u64,
    pub first: i64,
    pub last: i64,
    pub query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
}

impl CountReport {
    pub fn new(outcome: &QueryOutcome, query: &[u8], snippets: &[Snippet]) -> Self {
        Self {
            occurrences: outcome.count,
            first: outcome.first_index(),
            last: outcome.last_index(),
            query: String::from_utf8_lossy(query).into_owned(),
            before: snippets.iter().map(|s| lossy(&s.before)).collect(),
            after: snippets.iter().map(|s| lossy(&s.after)).collect(),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Single-line rendering of raw text
fn flatten(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace(['\n', '\r', '\t'], " ")
}

/// Print one line per snippet with the match highlighted
pub fn print_snippets(snippets: &[Snippet], query: &[u8], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    for snippet in snippets {
        // Print offset
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", snippet.offset)?;
        stdout.reset()?;
        write!(stdout, ":")?;

        write!(stdout, "{}", flatten(&snippet.before))?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "{}", flatten(query))?;
        stdout.reset()?;
        writeln!(stdout, "{}", flatten(&snippet.after))?;
    }

    Ok(())
}

/// Write documents as `docID,document` CSV rows
///
/// A batch sink adds leading `queryID,query` columns filled from the query
/// set by [`CsvSink::set_query`].
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    leading: &'static [&'static str],
    prefix: Vec<Vec<u8>>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            leading: &[],
            prefix: Vec::new(),
        }
    }

    pub fn batch(inner: W) -> Self {
        Self {
            leading: &["queryID", "query"],
            ..Self::new(inner)
        }
    }

    /// Tag the following rows with a query
    pub fn set_query(&mut self, query_id: usize, query: &[u8]) {
        if !self.leading.is_empty() {
            self.prefix = vec![query_id.to_string().into_bytes(), query.to_vec()];
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        let header = self.leading.iter().copied().chain(["docID", "document"]);
        self.writer.write_record(header)?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> DocumentSink for CsvSink<W> {
    fn accept(&mut self, doc_id: DocId, text: &[u8]) -> io::Result<()> {
        let id = doc_id.to_string();
        let fields = self
            .prefix
            .iter()
            .map(Vec::as_slice)
            .chain([id.as_bytes(), text]);
        self.writer.write_record(fields)?;
        Ok(())
    }
}
