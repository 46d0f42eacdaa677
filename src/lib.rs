pub mod backend;
pub mod cascade;
pub mod cli;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod expand;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod page;
pub mod platform;
pub mod price;
pub mod report;
pub mod result;
pub mod session;
pub mod strategy;

pub use error::{ConsiaError, Result};
