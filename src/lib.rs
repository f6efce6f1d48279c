pub mod bank;
pub mod banks;
pub mod bitfield;
pub mod chunk;
pub mod context;
pub mod convert;
pub mod deserialize_with;
pub mod dtype;
pub mod gm;
pub mod params;
pub mod patch;
pub mod tables;
