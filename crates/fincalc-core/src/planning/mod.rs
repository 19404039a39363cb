pub mod lumpsum;
pub mod sip;

pub use lumpsum::lumpsum_calculator;
pub use sip::sip_calculator;
