pub mod claims;
pub mod errors;
pub mod issuer;
pub mod options;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use options::ClaimsOption;
