mod local_key;

pub use local_key::{to_checksum_address, LocalKeyError, LocalKeyWallet};
