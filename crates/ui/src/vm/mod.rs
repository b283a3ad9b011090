mod number_fmt;
mod progression_vm;

pub use number_fmt::display_number;
pub use progression_vm::ProgressionVm;
