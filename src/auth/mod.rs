pub mod claims;

pub use claims::{BusinessClaim, IdentityClaim};
