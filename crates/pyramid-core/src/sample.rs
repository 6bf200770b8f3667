// File: crates/pyramid-core/src/sample.rs
// Summary: Built-in Europe/Africa population-by-age dataset (5-year bands, 0..=100).

use crate::series::Dataset;
use crate::types::{AgeDomain, DEFAULT_BAND_COUNT};

pub const EUROPE_AFRICA_TITLE: &str = "Europe and Africa Population Distribution by Age Range";

pub const AFRICA_MALE: [u64; DEFAULT_BAND_COUNT] = [
    35754890, 31813896, 28672207, 24967595, 20935790, 17178324, 14422055, 12271907, 10608417,
    8608183, 6579937, 5035598, 3832420, 2738448, 1769284, 1013988, 470834, 144795, 26494, 2652,
    140,
];

pub const AFRICA_FEMALE: [u64; DEFAULT_BAND_COUNT] = [
    34834623, 31000760, 27861135, 24206021, 20338468, 16815440, 14207659, 12167437, 10585531,
    8658614, 6721555, 5291815, 4176910, 3076943, 2039952, 1199203, 591092, 203922, 45501, 5961,
    425,
];

pub const EUROPE_MALE: [u64; DEFAULT_BAND_COUNT] = [
    4869936, 5186991, 5275063, 5286053, 5449038, 5752398, 6168124, 6375035, 6265554, 5900833,
    6465830, 7108184, 6769524, 5676968, 4828153, 3734266, 2732054, 1633630, 587324, 128003, 12023,
];

pub const EUROPE_FEMALE: [u64; DEFAULT_BAND_COUNT] = [
    4641147, 4940521, 5010242, 5010526, 5160160, 5501673, 6022599, 6329356, 6299693, 5930345,
    6509757, 7178487, 7011569, 6157651, 5547296, 4519433, 3704145, 2671974, 1276597, 399148,
    60035,
];

/// The four regional series over bands 0, 5, ..., 100.
pub fn europe_africa() -> Dataset {
    Dataset::new(AgeDomain::default())
        .with_title(EUROPE_AFRICA_TITLE)
        .with_series("africa_male", AFRICA_MALE.to_vec())
        .with_series("africa_female", AFRICA_FEMALE.to_vec())
        .with_series("europe_male", EUROPE_MALE.to_vec())
        .with_series("europe_female", EUROPE_FEMALE.to_vec())
}
