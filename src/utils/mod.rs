pub mod data;
pub mod grading;
pub mod lock;
pub mod odds;
pub mod scoring;
pub mod standings;
pub mod validation;
