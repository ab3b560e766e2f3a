mod registry_transport;

pub use registry_transport::HttpRegistryTransport;
