mod error;
mod home;
mod layout;

#[cfg(test)]
mod view_smoke;

pub use error::{ErrorPage, render_error};
pub use home::{IndexPage, PRESET_AMOUNTS, render_index};
pub use layout::Page;
