// Service exports
pub mod cache;
pub mod catalog;
pub mod weather;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use catalog::{CatalogError, TrekCatalog};
pub use weather::{candidate_locations, WeatherClient, WeatherError, WeatherReport, WeatherSource};
