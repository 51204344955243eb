// Services module - provider access and tag rendering

pub mod poster;
pub mod provider;
pub mod record;
pub mod render;
pub mod tags;

// Metadata providers
pub mod imdb;
