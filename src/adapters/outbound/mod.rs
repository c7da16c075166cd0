mod http_location_source;

pub use http_location_source::HttpLocationSource;
