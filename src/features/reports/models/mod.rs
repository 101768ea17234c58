pub mod report_model;

pub use report_model::*;
