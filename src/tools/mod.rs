mod error;
mod register_transaction;

pub use register_transaction::RegisterTransaction;
