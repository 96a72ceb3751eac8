pub mod etuovi;
pub mod extract;
pub mod payload;
pub mod templates;
