// Adapters layer: concrete implementations for external systems (chat transport, storage, health endpoint).

pub mod health;
pub mod storage;
pub mod telegram;
