// Render module split into focused submodules to reduce file size and compiler warnings.

pub mod dialog;
pub mod full;
pub mod list;
pub mod modeline;
pub mod profile;
pub mod styles;
pub mod util;

pub use full::render_full;
pub use list::{render_list_content, render_main_content};
pub use modeline::{render_modeline, render_modeline_padded};
pub use profile::render_profile_block;
