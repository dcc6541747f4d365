pub mod catalog;
pub mod cli;
pub mod client;
pub mod error;
pub mod form;
pub mod models;
pub mod state;
pub mod view;

pub use crate::error::AppError;
