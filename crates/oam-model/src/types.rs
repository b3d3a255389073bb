// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Airspace classification
//!
//! AIXM airspace type codes and the translucent colours the viewer draws
//! each class with.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// AIXM airspace type
///
/// Unknown codes are captured with their original string representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AirspaceType {
    /// Prohibited area
    P,
    /// Restricted area
    R,
    /// Danger area
    D,
    /// Temporary reserved area
    Tra,
    /// Special activity area
    Sa,
    /// Special glider area
    Sg,
    /// Class B airspace
    B,
    /// Traffic information zone
    Tiz,
    /// Terminal control area
    Tma,
    /// Military terminal control area
    Mtma,
    /// Control area
    Cta,
    /// Control zone
    Ctr,
    /// Military control zone
    Mctr,
    /// Flight information region
    Fir,
    /// Any other AIXM code
    Other(String),
}

impl AirspaceType {
    /// The AIXM code for this type
    pub fn code(&self) -> &str {
        match self {
            AirspaceType::P => "P",
            AirspaceType::R => "R",
            AirspaceType::D => "D",
            AirspaceType::Tra => "TRA",
            AirspaceType::Sa => "SA",
            AirspaceType::Sg => "SG",
            AirspaceType::B => "B",
            AirspaceType::Tiz => "TIZ",
            AirspaceType::Tma => "TMA",
            AirspaceType::Mtma => "MTMA",
            AirspaceType::Cta => "CTA",
            AirspaceType::Ctr => "CTR",
            AirspaceType::Mctr => "MCTR",
            AirspaceType::Fir => "FIR",
            AirspaceType::Other(code) => code,
        }
    }

    /// Display colour for this airspace type
    pub fn color(&self) -> [f32; 4] {
        get_default_color(Some(self))
    }
}

impl FromStr for AirspaceType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Ok(match code.as_str() {
            "P" => AirspaceType::P,
            "R" => AirspaceType::R,
            "D" => AirspaceType::D,
            "TRA" => AirspaceType::Tra,
            "SA" => AirspaceType::Sa,
            "SG" => AirspaceType::Sg,
            "B" => AirspaceType::B,
            "TIZ" => AirspaceType::Tiz,
            "TMA" => AirspaceType::Tma,
            "MTMA" => AirspaceType::Mtma,
            "CTA" => AirspaceType::Cta,
            "CTR" => AirspaceType::Ctr,
            "MCTR" => AirspaceType::Mctr,
            "FIR" => AirspaceType::Fir,
            _ => AirspaceType::Other(code),
        })
    }
}

impl From<String> for AirspaceType {
    fn from(code: String) -> Self {
        match code.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl From<AirspaceType> for String {
    fn from(ty: AirspaceType) -> Self {
        ty.code().to_string()
    }
}

impl fmt::Display for AirspaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Get default colour for an airspace type
///
/// All airspace colours are translucent so overlapping volumes stay readable.
/// Untyped airspaces get a neutral gray.
pub fn get_default_color(ty: Option<&AirspaceType>) -> [f32; 4] {
    match ty {
        // Prohibited, restricted and danger areas - red
        Some(AirspaceType::P | AirspaceType::R | AirspaceType::D) => [1.0, 0.0, 0.0, 0.3],

        // Temporary reserved areas - purple
        Some(AirspaceType::Tra) => [0.5, 0.0, 1.0, 0.3],

        // Class B - green
        Some(AirspaceType::B) => [0.0, 1.0, 0.0, 0.3],

        // Control areas and zones - salmon
        Some(AirspaceType::Cta | AirspaceType::Ctr | AirspaceType::Mctr) => {
            [1.0, 0.68, 0.5, 0.3]
        }

        // Terminal areas, special areas and FIRs - blue
        Some(
            AirspaceType::Sa
            | AirspaceType::Sg
            | AirspaceType::Tiz
            | AirspaceType::Tma
            | AirspaceType::Mtma
            | AirspaceType::Fir,
        ) => [0.0, 0.0, 1.0, 0.3],

        // Default - translucent gray
        Some(AirspaceType::Other(_)) | None => [0.7, 0.7, 0.7, 0.3],
    }
}
