//! Homework engine: IO collaborators and the poll loop driver.
mod messenger;
mod notifier;
mod pacer;
mod poll_loop;
mod settings;
mod source;

pub use messenger::{Messenger, MessengerError, TelegramMessenger, TELEGRAM_MESSAGE_LIMIT};
pub use notifier::Notifier;
pub use pacer::{Pacer, TokioPacer};
pub use poll_loop::{Control, PollLoop, RETRY_INTERVAL};
pub use settings::ClientSettings;
pub use source::{ReqwestStatusSource, StatusSource};
