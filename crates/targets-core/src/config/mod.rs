//! The active configuration as cf-targets sees it.
//!
//! cf-targets does not manage configuration *content*.  It only needs to:
//!
//! 1. Parse the file into a structure exposing the volatile `AccessToken`.
//! 2. Re-serialize that structure into a canonical byte form so two
//!    configurations can be compared byte-for-byte.
//!
//! All other fields are carried opaquely.

pub mod data;
