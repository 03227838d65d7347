pub mod bank_merger;
pub mod bank_store;

pub use bank_merger::{merge_questions, unique_id, MergeStats};
pub use bank_store::BankStore;
