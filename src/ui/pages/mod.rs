pub mod beers;

pub use beers::BeersPage;
