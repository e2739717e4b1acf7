//! Field extractors: each module pulls one semantic field out of a raw
//! text blob. All of them are pure, never fail on malformed input, and
//! fall back to documented defaults when nothing matches.

pub mod amenities;
pub mod capacity;
pub mod contact;
pub mod coords;
pub mod pricing;
pub mod trail;
