// Copyright 2025-2026 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # xnbscope
//!
//! A parser and structured-dump library for the XNB binary asset container format used by the
//! XNA Game Studio 4.0 content pipeline. Built in pure Rust, `xnbscope` reads any conforming
//! frame and emits a hierarchical, human-readable listing of every parsed value, without
//! requiring Windows or the source runtime.
//!
//! # Architecture
//!
//! The library is organized into layers that mirror the structure of the format itself:
//!
//! - **File layer**: Memory-mapped or in-memory frame access and the primitive byte stream
//! - **Name layer**: Qualified-name normalization and generic name dissection
//! - **Reader layer**: One [`TypeReader`] per serialized type, plus factories that specialize
//!   open generics on demand, all owned by a [`TypeReaderRegistry`]
//! - **Engine**: The [`ContentReader`], which parses the header, resolves the embedded type
//!   manifest, and dispatches every polymorphic value through the per-file reader table
//!
//! An XNB frame is self-describing: its manifest carries fully qualified CLR reader names,
//! including nested generic specializations such as
//! `` ListReader`1[[System.Int32, mscorlib]] ``. Resolution normalizes each name, interns any
//! specialization it has to build, and then runs a second initialize pass so readers can
//! resolve element types that only became known later in the same manifest.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use xnbscope::prelude::*;
//! use std::path::Path;
//!
//! let file = XnbFile::from_path(Path::new("content/player.xnb"))?;
//! let registry = TypeReaderRegistry::with_standard_types();
//!
//! let mut out = std::io::stdout().lock();
//! file.dump(&registry, &mut out)?;
//! # Ok::<(), xnbscope::Error>(())
//! ```
//!
//! A registry can be reused across any number of files; generic specializations created for one
//! frame are interned and served to the next. Parsing is single-threaded by design — to parse
//! in parallel, give each worker its own registry.
//!
//! # Scope
//!
//! Reading only. Compressed frames are detected and rejected, reflective readers (which would
//! need runtime type metadata from the source ecosystem) are rejected at read time, and opaque
//! payloads — texture surfaces, shader bytecode — are dumped as raw byte ranges.
//!
//! # Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Every error is fatal to the current
//! parse; warnings (an unknown target platform, an unexpected format version) go through the
//! [`log`] facade and do not abort.

#[macro_use]
pub(crate) mod error;

pub(crate) mod file;
pub(crate) mod logger;
pub(crate) mod typename;

pub mod content;
pub mod reader;

/// Convenient re-exports of the most commonly used types.
pub mod prelude;

/// `Result<T, Error>` alias used by every fallible operation in this crate
pub type Result<T> = std::result::Result<T, Error>;

pub use content::{ContentReader, XnbFlags};
pub use error::Error;
pub use file::{stream::BinaryStream, XnbFile};
pub use logger::Logger;
pub use reader::{registry::TypeReaderRegistry, GenericReaderFactory, TypeReader};
pub use typename::{split_generic_name, strip_assembly_version};
