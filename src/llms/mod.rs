pub mod chat;
pub mod mock;

pub use chat::ChatGroq;
pub use mock::MockChatModel;
