pub mod assistant;
pub mod itinerary;
pub mod place;
pub mod route;
