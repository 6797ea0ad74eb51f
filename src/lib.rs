//! Metaclock - a 12-hour dial that spans the current solar day or night

pub mod core;
pub mod metatime;
