mod ipstack_client;

pub use ipstack_client::IpStackClient;
