//! Feature modules: state + reducer + view per feature.

pub mod account;
