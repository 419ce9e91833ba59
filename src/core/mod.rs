pub mod aggregate;
pub mod collector;
pub mod engine;
pub mod salary;

pub use crate::domain::model::{LanguageStats, Listing, RunReport, SalaryFields, SourceResultSet};
pub use crate::domain::ports::{ConfigProvider, SourceAdapter};
pub use crate::utils::error::Result;
