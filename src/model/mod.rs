pub mod repo;
pub mod session;
