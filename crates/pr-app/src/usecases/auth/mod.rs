mod siwe_login;

pub use siwe_login::{SiweLogin, SiweSettings};
