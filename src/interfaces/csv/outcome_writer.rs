use crate::domain::transaction::PaymentResponse;
use crate::error::{Result, ShwaryError};
use serde::Serialize;
use std::io::Write;

/// Result of one batch row, written as `row,id,status,error`.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PaymentOutcome {
    pub row: usize,
    pub id: Option<String>,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl PaymentOutcome {
    pub fn from_result(row: usize, result: &Result<PaymentResponse>) -> Self {
        match result {
            Ok(response) => Self {
                row,
                id: Some(response.id.clone()),
                status: Some(response.status.clone()),
                error: None,
            },
            Err(err) => Self::failed(row, err),
        }
    }

    pub fn failed(row: usize, err: &ShwaryError) -> Self {
        Self {
            row,
            id: None,
            status: None,
            error: Some(err.to_string()),
        }
    }
}

pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes outcomes sorted by row number.
    pub fn write_outcomes(&mut self, mut outcomes: Vec<PaymentOutcome>) -> Result<()> {
        outcomes.sort_by_key(|outcome| outcome.row);
        for outcome in outcomes {
            self.writer.serialize(outcome)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
