// Library for tests to access modules

pub mod config;
pub mod delta;
pub mod flatten;
pub mod models;
pub mod mongo_repo;
pub mod presenter;
pub mod routes;
pub mod version;
pub mod worker;
