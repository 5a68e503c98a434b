pub mod companies;
pub mod licenses;
