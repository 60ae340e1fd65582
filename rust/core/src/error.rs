// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assist failure.

use crate::part::AssistKind;

/// Why an assist produced no processed part.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssistError {
    /// The part has nothing the assist can be applied to. This is the
    /// expected outcome for most parts, not a fault.
    #[error("{reason}")]
    Inapplicable {
        assist: AssistKind,
        reason: &'static str,
    },

    /// The transformed contour is no longer a valid closed loop.
    #[error("assist produced an invalid contour: {0}")]
    Topology(#[from] bend_assist_topology::Error),
}

impl AssistError {
    pub(crate) fn inapplicable(assist: AssistKind) -> Self {
        Self::Inapplicable {
            assist,
            reason: assist.failure_reason(),
        }
    }

    /// Returns true for the expected "nothing to do" outcome.
    pub fn is_inapplicable(&self) -> bool {
        matches!(self, Self::Inapplicable { .. })
    }
}

/// Result type alias for assist execution.
pub type Result<T> = std::result::Result<T, AssistError>;
