/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

use crate::formats::{FourCC, PixelFormat};
use thiserror::Error;

/// Errors surfaced by the registry and dispatcher lookups.
///
/// Everything else (undersized buffers, dimensions off the chroma lattice)
/// is a caller contract violation; kernels debug-assert those and otherwise
/// trust their inputs, as sized by [`calculate_buffer_size`].
///
/// [`calculate_buffer_size`]: crate::calculate_buffer_size
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelFmtError {
    /// The fourcc tag or name is not in the format registry.
    #[error("unknown pixel format tag '{0}'")]
    UnknownFormat(FourCC),
    /// No conversion kernel exists for this source/target pair.
    #[error("no transform from {0} to {1}")]
    UnsupportedPair(PixelFormat, PixelFormat),
}
