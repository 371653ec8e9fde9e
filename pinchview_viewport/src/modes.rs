// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Axis policy applied by [`crate::Viewport::pan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AxisLock {
    /// Apply the full pan delta on both axes.
    #[default]
    Free,
    /// Apply only the axis with the larger absolute delta; the other axis
    /// is left unchanged.
    ///
    /// Ties go to the vertical axis, matching a strict "horizontal wins
    /// only when strictly larger" comparison.
    Dominant,
}

impl AxisLock {
    /// Returns `true` if this lock restricts panning to one axis.
    #[must_use]
    pub fn is_locked(self) -> bool {
        self == Self::Dominant
    }
}
