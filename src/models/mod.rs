pub mod developer;
pub mod game;
pub mod genre;
pub mod platform;
pub mod publisher;
pub mod user;

pub use developer::Developer;
pub use game::Game;
pub use genre::Genre;
pub use platform::Platform;
pub use publisher::Publisher;
pub use user::User;
