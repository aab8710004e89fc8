pub mod bot_client;
pub mod config;
pub mod transport;

pub use bot_client::TelegramBotClient;
pub use config::TelegramConfig;
pub use transport::{DeliveryReceipt, MessageTransport};
