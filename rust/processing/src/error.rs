// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bend_assist_core::AssistError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read part: {0}")]
    Geo(#[from] bend_assist_geo::Error),

    #[error(transparent)]
    Assist(#[from] AssistError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// True if the assist simply had nothing to work on.
    pub fn is_inapplicable(&self) -> bool {
        matches!(self, Error::Assist(e) if e.is_inapplicable())
    }
}
