//! Request, condition and result types shared by the engine and the HTTP layer.

pub mod condition;
pub mod enums;
pub mod request;
pub mod result;

pub use condition::{Condition, Medicine};
pub use request::{AnalysisRequest, NumericInput, StringOrList, Temperature};
pub use result::{AlternativeDisease, AnalysisResult, MedicineScheduleEntry, PrimaryDisease};
