mod location_source;

pub use location_source::LocationSource;
