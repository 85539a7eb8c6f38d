pub mod features;
pub mod model;
pub mod service;
pub mod team_codes;

pub use model::{GaussianNb, OutcomeClassifier};
pub use service::Predictor;
