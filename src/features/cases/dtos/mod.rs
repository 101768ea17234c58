pub mod case_dto;

pub use case_dto::*;
