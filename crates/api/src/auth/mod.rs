//! Token validation for the API surface.
//!
//! Token *issuance* belongs to the external identity system; this service
//! only validates bearer tokens it is handed.

pub mod jwt;
