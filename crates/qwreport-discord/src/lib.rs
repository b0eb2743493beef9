pub mod adapter;
pub mod error;
pub mod handler;
pub mod react;

pub use adapter::DiscordAdapter;
pub use error::DiscordError;
pub use react::DiscordReactor;
