//! Evaluation report port trait.

use crate::domain::error::CrossbotError;
use crate::domain::record::EvaluationRecord;

/// Port for writing evaluation records.
pub trait ReportPort {
    fn write(&self, record: &EvaluationRecord, output_path: &str) -> Result<(), CrossbotError>;
}
