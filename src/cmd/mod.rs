/*!
Subcommand dispatch for `fs-recon`.

One file per subcommand, each exposing an `*Args` struct (clap) and one
`execute_*` function returning `anyhow::Result<()>`:

  path.rs      resolve a subject volume path
  recon.rs     recon-all
  convert.rs   mri_convert
  binarize.rs  mri_binarize
  batch.rs     job files (YAML / JSON)
  list.rs      registry listing

shared.rs holds output/error helpers; format.rs the human-readable styling.
*/

pub mod batch;
pub mod binarize;
pub mod convert;
pub mod format;
pub mod list;
pub mod path;
pub mod recon;
pub mod shared;

pub use batch::{BatchArgs, execute_batch};
pub use binarize::{BinarizeArgs, execute_binarize};
pub use convert::{ConvertArgs, execute_convert};
pub use list::{ListArgs, execute_list};
pub use path::{PathArgs, execute_path};
pub use recon::{ReconArgs, execute_recon};
