//! Driven adapters that keep client state on the local disk

pub mod file_credential_store;
