// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
use crate::ArithmeticPath;
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvolveError {
    /// Bulk weight assignment did not supply exactly `side_length * side_length` entries.
    KernelSizeMismatch(MismatchedSize),
    /// Single cell assignment outside of the kernel grid.
    CellOutOfKernel {
        x: usize,
        y: usize,
        side_length: usize,
    },
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ExceedingPointerSize,
    ArithmeticUnavailable(ArithmeticPath),
    ThreadPool(String),
}

impl Error for ConvolveError {}

impl std::fmt::Display for ConvolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConvolveError::KernelSizeMismatch(size) => f.write_fmt(format_args!(
                "Kernel requires exactly {} weights but {} provided",
                size.expected, size.received
            )),
            ConvolveError::CellOutOfKernel { x, y, side_length } => f.write_fmt(format_args!(
                "Kernel cell ({x}, {y}) is outside of {side_length}x{side_length} kernel"
            )),
            ConvolveError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            ConvolveError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            ConvolveError::ExceedingPointerSize => {
                f.write_str("Image bounds exceeds pointer capacity")
            }
            ConvolveError::ArithmeticUnavailable(path) => f.write_fmt(format_args!(
                "Arithmetic path {path:?} is not available on this target"
            )),
            ConvolveError::ThreadPool(reason) => {
                f.write_fmt(format_args!("Unable to build worker pool: {reason}"))
            }
        }
    }
}

pub(crate) fn check_weights_count(expected: usize, received: usize) -> Result<(), ConvolveError> {
    if expected != received {
        return Err(ConvolveError::KernelSizeMismatch(MismatchedSize {
            expected,
            received,
        }));
    }
    Ok(())
}
