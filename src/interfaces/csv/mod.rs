//! CSV batch files: payment instructions in, per-row outcomes out.

pub mod outcome_writer;
pub mod payment_reader;
