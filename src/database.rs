pub mod device;
pub mod postgres_repository;
