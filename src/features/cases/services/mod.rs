pub mod case_service;

pub use case_service::CaseService;
