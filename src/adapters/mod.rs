// Adapters layer: concrete implementations of the domain ports (http geocoder, storage, session).

pub mod geocoder;
pub mod identity;
pub mod storage;
