//! Request parameter management
//!
//! The distribution signs access through query parameters handed out with
//! dataset approval. This module loads those parameters from a local
//! dotenv-format file and reports their status for the `auth` command.

pub mod params;

pub use params::{get_params_status, load_params, params_file_path, ParamsStatus};
