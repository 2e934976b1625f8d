//! Curated re-exports of the types most callers need.
//!
//! ```rust,no_run
//! use xnbscope::prelude::*;
//!
//! let registry = TypeReaderRegistry::with_standard_types();
//! let file = XnbFile::from_mem(std::fs::read("content/player.xnb")?);
//! let mut out = std::io::stdout().lock();
//! file.dump(&registry, &mut out)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use crate::{
    content::ContentReader, file::XnbFile, reader::registry::TypeReaderRegistry,
    reader::TypeReader, Error, Result,
};
