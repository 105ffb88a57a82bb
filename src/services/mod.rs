pub mod assistant;
pub mod generation;
pub mod geocoding;
pub mod map_session;
pub mod places;
pub mod planner;
pub mod prompt_builder;
pub mod resolver;
pub mod routing;
pub mod store;
pub mod voice_guide;
