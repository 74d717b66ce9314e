pub mod assets;
pub mod stories;

pub use assets::AssetStore;
pub use stories::StoryStore;
