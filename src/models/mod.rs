//! Data models for coacquire.

mod record;
mod report;

pub use record::InputRecord;
pub use report::{
    LabReport, PassFail, LAB_ERROR, LAB_INVALID_URL, LAB_UNKNOWN, LAB_UNSUPPORTED, REPORT_COLUMNS,
};
