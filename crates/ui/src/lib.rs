#![forbid(unsafe_code)]
#![allow(non_snake_case)]

pub mod views;
pub mod vm;

pub use views::{render_error, render_index};
pub use vm::ProgressionVm;
