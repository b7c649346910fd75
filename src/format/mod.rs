// PostgreSQL text-format grammar shared by the encoder and the decoder.
//
// - array: array literal quoting and splitting
// - bytea: hex and escape formats
// - datetime: dates, times, timestamps and UTC offsets
// - interval: interval output styles

pub(crate) mod array;
pub(crate) mod bytea;
pub(crate) mod datetime;
pub mod interval;

pub use interval::IntervalStyle;
