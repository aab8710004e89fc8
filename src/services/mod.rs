pub mod dispatcher;
pub mod submission;
pub mod telegram;

pub use dispatcher::{DeliveryFailure, DispatchError, Dispatcher};
