pub mod docs;
pub mod dto;
pub mod error;
pub mod routes;
