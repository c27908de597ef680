//! Core math shared by every globe: geographic projection and orientation helpers.

pub mod coordinates;
