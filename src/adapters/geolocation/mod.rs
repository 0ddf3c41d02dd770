//! Geolocation adapters.

mod cached_geolocator;
mod fixed_geolocator;
mod mock_geolocator;

pub use cached_geolocator::CachedGeolocator;
pub use fixed_geolocator::FixedGeolocator;
pub use mock_geolocator::MockGeolocator;
