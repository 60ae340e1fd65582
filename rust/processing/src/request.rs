// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable assist requests.

use bend_assist_core::{
    BendAssist, BendDeduction, BendRelief, CornerClose, CornerRelief, DeductionAlgorithm, MakeFlange,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// One assist to run, as received from the command line or a job file.
///
/// Parameters left out are taken from [`Config`].
///
/// ```json
/// { "assist": "make-flange", "edge": 3, "height": 20.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "assist", rename_all = "kebab-case")]
pub enum AssistRequest {
    BendDeduction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        algorithm: Option<DeductionAlgorithm>,
    },
    BendRelief,
    CornerClose,
    CornerRelief,
    MakeFlange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        edge: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
    },
}

impl AssistRequest {
    /// Request with every parameter left to the configuration.
    ///
    /// Accepts the kebab-case assist names; `add-flange` is an alias of
    /// `make-flange`.
    pub fn from_name(name: &str) -> Option<Self> {
        let request = match name.trim() {
            "bend-deduction" => Self::BendDeduction { algorithm: None },
            "bend-relief" => Self::BendRelief,
            "corner-close" => Self::CornerClose,
            "corner-relief" => Self::CornerRelief,
            "make-flange" | "add-flange" => Self::MakeFlange {
                edge: None,
                angle: None,
                height: None,
                radius: None,
            },
            _ => return None,
        };
        Some(request)
    }

    /// The assist this request describes, with defaults from `config`.
    pub fn build(&self, config: &Config) -> Box<dyn BendAssist + Send + Sync> {
        match *self {
            Self::BendDeduction { algorithm } => Box::new(BendDeduction::new(
                algorithm.unwrap_or(config.deduction_algorithm),
            )),
            Self::BendRelief => Box::new(BendRelief),
            Self::CornerClose => Box::new(CornerClose),
            Self::CornerRelief => Box::new(CornerRelief),
            Self::MakeFlange {
                edge,
                angle,
                height,
                radius,
            } => Box::new(MakeFlange {
                edge,
                angle: angle.unwrap_or(config.flange_angle),
                height: height.unwrap_or(config.flange_height),
                radius: radius.unwrap_or(config.flange_radius),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bend_assist_core::AssistKind;

    #[test]
    fn parses_tagged_json() {
        let request: AssistRequest =
            serde_json::from_str(r#"{ "assist": "make-flange", "edge": 3, "height": 20.0 }"#).unwrap();
        assert_eq!(
            request,
            AssistRequest::MakeFlange {
                edge: Some(3),
                angle: None,
                height: Some(20.0),
                radius: None,
            }
        );

        let request: AssistRequest = serde_json::from_str(r#"{ "assist": "corner-relief" }"#).unwrap();
        assert_eq!(request, AssistRequest::CornerRelief);
        assert!(serde_json::from_str::<AssistRequest>(r#"{ "assist": "fold" }"#).is_err());
    }

    #[test]
    fn names_match_the_serialized_tags() {
        for name in ["bend-deduction", "bend-relief", "corner-close", "corner-relief", "make-flange"] {
            let request = AssistRequest::from_name(name).unwrap();
            let json = serde_json::to_value(&request).unwrap();
            assert_eq!(json["assist"], name);
        }
        assert!(AssistRequest::from_name("unfold").is_none());
    }

    #[test]
    fn builds_the_named_assist() {
        let config = Config::default();
        let kinds = [
            ("bend-deduction", AssistKind::BendDeduction),
            ("bend-relief", AssistKind::BendRelief),
            ("corner-close", AssistKind::CornerClose),
            ("corner-relief", AssistKind::CornerRelief),
            ("add-flange", AssistKind::AddFlange),
        ];
        for (name, kind) in kinds {
            let assist = AssistRequest::from_name(name).unwrap().build(&config);
            assert_eq!(assist.kind(), kind);
        }
    }
}
