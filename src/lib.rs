//! Metadata library for a seismic equipment inventory.
//!
//! Records describe themselves through explicit field tables ([`Record`],
//! [`Tabular`]) and are written either as commented structured text
//! ([`encoder`]) or as CSV tables ([`table`]). The [`store`] module moves both
//! forms to and from disk.

pub mod data;
pub mod diff;
pub mod encoder;
pub mod error;
pub mod inventory;
pub mod io_utils;
pub mod keys;
pub mod record;
pub mod store;
pub mod table;
pub mod validate;

use std::{env, sync::OnceLock};

use log::LevelFilter;

pub use crate::{
    diff::diff,
    encoder::{encode, encode_string},
    error::{DecodeError, EncodeError, Error, Result, ShapeError, ValidationErrors},
    record::{Field, Record},
    table::{Cell, CellKind, Column, Tabular},
    validate::Validate,
};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Installs the `env_logger` backend once. Without `RUST_LOG` the crate's own
/// messages are shown at `info`.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("inventory_meta", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}
