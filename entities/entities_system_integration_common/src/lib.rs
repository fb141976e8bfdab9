//! Entities Layer: Common System Integration
//!
//! Provides the value types shared by every layer that talks to the operating
//! system's file APIs. Nothing in this crate performs I/O.
//!
//! ## Overview
//!
//! The `entities_system_integration_common` crate is part of the entities layer in
//! the CLEAN architecture layout of this workspace. It holds the platform error
//! carrier, the single failure type raised by file operations, and the open
//! modes accepted when opening a path.
//!
//! ## Modules
//!
//! - **[`error_code`](error_code/index.html)**: `ErrorCode`, an opaque carrier
//!   for a platform error number.
//! - **[`system_error`](system_error/index.html)**: `SystemError`, the failure
//!   signalled whenever an OS call fails with anything other than `EINTR`.
//! - **[`open_mode`](open_mode/index.html)**: `OpenMode`, the read-only,
//!   write-only and read-write flags passed to `open`.
//!
//! ## Usage
//!
//! ```rust
//! use entities_system_integration_common::{ErrorCode, SystemError};
//!
//! let err = SystemError::new(ErrorCode::new(libc::ENOENT), "cannot open file /nope");
//! assert_eq!(err.code().get(), libc::ENOENT);
//! assert!(err.to_string().starts_with("cannot open file /nope: "));
//! ```
//!
//! ## See Also
//!
//! - [`adapters_system_integration_unix`](../adapters_system_integration_unix/index.html): OS call layer
//! - [`frameworks_system_integration_unix`](../frameworks_system_integration_unix/index.html): `File` and `BufferedFile`

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * This file is derived from work copyrighted by Victor Zverovich 2014.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

pub mod error_code;
pub mod open_mode;
pub mod system_error;

pub use error_code::ErrorCode;
pub use open_mode::OpenMode;
pub use system_error::{format_system_error, SystemError};
