pub mod config;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod judge;
pub mod metrics_api;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod report;
pub mod similarity;
pub mod storage;
