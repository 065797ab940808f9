//! Key material: validated RSA components, the native key handle, and
//! the JWK bridge

mod bridge;
mod components;
mod native;

pub use bridge::{export_rsa, import_rsa};
pub use components::{PrimeInfo, RsaKeyComponents, RsaKeyKind};
pub use native::NativeRsaKey;
