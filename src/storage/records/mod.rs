pub mod message;
pub mod user;

pub(crate) use message::{CounterpartMessageRecord, MessageDetailRecord, MessageRecord, ReadReceiptRecord};
pub(crate) use user::{UserRecord, UserSummaryRecord};
