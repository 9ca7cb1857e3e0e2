#![doc = include_str!("RUSTDOC.md")]

pub mod appconfig;
pub mod blocking;

#[cfg(test)]
pub mod test_support;
