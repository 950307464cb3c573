pub mod nominatim;

pub use nominatim::{GeocodeError, Geocoder, ResolvedAddress};
