mod client;
mod graph_error;
pub mod models;

pub use client::{phone_numbers_url, owned_accounts_url, GraphClient, GraphFetch};
pub use graph_error::GraphError;
