pub mod assets;
pub mod output;

pub use crate::utils::{
  assets::{copy_content_assets, copy_global_assets},
  output::{write_redirect, write_stylesheet},
};
