pub mod fragment;
pub mod sink;
