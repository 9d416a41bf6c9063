// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side persistence functions.
//!
//! All queries are generated in backend-specific monomorphic versions
//! (`_sqlite` and `_mysql` suffixes) by the `backend_fn!` macro.

pub mod sailings;
pub mod supplements;

/// Stored status value for active sailings.
pub const STATUS_ACTIVE: i32 = 1;
