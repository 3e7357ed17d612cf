//! Entities of the three stores: sensor data (`sensor`, `unit`, `valname`,
//! `valreal`, `valsensor`), `log` and `script`.

pub mod log;
pub mod script;
pub mod sensor;
pub mod unit;
pub mod valname;
pub mod valreal;
pub mod valsensor;
