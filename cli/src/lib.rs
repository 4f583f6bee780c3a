pub mod handlers;
pub mod output;
pub mod types;
