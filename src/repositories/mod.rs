pub mod memory_repository;
pub mod message_repository;
