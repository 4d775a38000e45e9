pub mod client;
pub mod issues;
pub mod search;
