pub mod ad;
pub mod error;
pub mod report;
