//! CSV order journal: an order sink that appends each submitted order to a
//! file.
//!
//! The header is written when the file is new or empty. Order ids are
//! `journal-<n>`, where `n` is one past the highest id already in the file,
//! so ids never repeat even when existing rows are short or hand-edited.

use crate::domain::error::CrossbotError;
use crate::domain::order::OrderIntent;
use crate::ports::order_sink_port::{OrderAck, OrderSinkPort};
use chrono::Utc;
use std::cell::Cell;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const ID_PREFIX: &str = "journal-";

const HEADER: [&str; 9] = [
    "order_id",
    "submitted_at",
    "symbol",
    "side",
    "type",
    "size",
    "price",
    "stop_loss",
    "take_profit",
];

pub struct JournalAdapter {
    path: PathBuf,
    last_sequence: Cell<Option<u64>>,
}

impl JournalAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_sequence: Cell::new(None),
        }
    }

    fn sink_error(&self, e: impl std::fmt::Display) -> CrossbotError {
        CrossbotError::OrderSink {
            reason: format!("journal {}: {}", self.path.display(), e),
        }
    }

    /// Highest `journal-<n>` sequence in the file, 0 when there is none.
    ///
    /// Rows may have any number of fields; a row that is not valid CSV is
    /// an error rather than being skipped.
    pub fn scan_last_sequence(&self) -> Result<u64, CrossbotError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.sink_error(e))?;
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut last = 0;
        for result in rdr.records() {
            let record = result.map_err(|e| self.sink_error(e))?;
            let sequence = record
                .get(0)
                .and_then(|id| id.trim().strip_prefix(ID_PREFIX))
                .and_then(|n| n.parse::<u64>().ok());
            if let Some(n) = sequence {
                last = last.max(n);
            }
        }
        Ok(last)
    }

    fn next_sequence(&self) -> Result<u64, CrossbotError> {
        let last = match self.last_sequence.get() {
            Some(n) => n,
            None => self.scan_last_sequence()?,
        };
        Ok(last + 1)
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OrderSinkPort for JournalAdapter {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn submit(&self, symbol: &str, order: &OrderIntent) -> Result<OrderAck, CrossbotError> {
        let sequence = self.next_sequence()?;
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.sink_error(e))?;
        let mut writer = csv::Writer::from_writer(file);

        if needs_header {
            writer.write_record(HEADER).map_err(|e| self.sink_error(e))?;
        }

        let order_id = format!("{}{}", ID_PREFIX, sequence);
        writer
            .write_record([
                order_id.clone(),
                Utc::now().to_rfc3339(),
                symbol.to_string(),
                order.side.to_string(),
                order.order_type.to_string(),
                order.size.to_string(),
                order.price.to_string(),
                optional(order.stop_loss),
                optional(order.take_profit),
            ])
            .map_err(|e| self.sink_error(e))?;
        writer.flush().map_err(|e| self.sink_error(e))?;
        self.last_sequence.set(Some(sequence));

        Ok(OrderAck { order_id })
    }
}
