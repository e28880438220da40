use chrono::NaiveDate;
use thiserror::Error;

use casecount_common::ErrRunDate;
use casecount_sources::SourceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Bad variant key {0}")]
    BadVariantKey(String),
    #[error("No variant active on {0}")]
    NoVariant(NaiveDate),
    #[error("Bad feature in statistics: {0}")]
    BadFeature(String),
    #[error("Unknown jurisdiction {0}")]
    UnknownJurisdiction(String),
    #[error(transparent)]
    RunDate(#[from] ErrRunDate),
    #[error(transparent)]
    Source(#[from] SourceError),
}
