use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chemistry::{DEFAULT_EQUIVALENTS, DEFAULT_KW};
use crate::error::UnknownToken;

/// Implements the token plumbing shared by the closed calculation enums:
/// `as_str`, `label`, `ALL`, `Display` and exact-match `FromStr`.
///
/// `aka` lists extra spellings `FromStr` accepts; output always uses the
/// primary token.
macro_rules! token_enum {
    ($name:ident, $kind:literal, {
        $($variant:ident => ($token:literal, $label:literal) $(aka $($alias:literal)|+)?),+ $(,)?
    }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire-level token used in forms and JSON.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }

            /// Human-readable name for menus.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token $($(| $alias)+)? => Ok($name::$variant),)+
                    _ => Err(UnknownToken {
                        kind: $kind,
                        token: s.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    Molarity,
    Molality,
    Dilution,
    MassVolume,
    Ppm,
    Percentage,
}

token_enum!(CalculationType, "calculation type", {
    Molarity => ("molarity", "Molarity (M)") aka "molaridad",
    Molality => ("molality", "Molality (m)") aka "molalidad",
    Dilution => ("dilution", "Dilution (C1V1 = C2V2)") aka "dilucion",
    MassVolume => ("mass_volume", "Mass/Volume (mg/mL, g/L)") aka "masa_volumen",
    Ppm => ("ppm", "Parts per million (ppm)"),
    Percentage => ("percentage", "Percentage (% w/v)") aka "porcentaje",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Mass,
    Temperature,
    Volume,
}

token_enum!(UnitType, "unit type", {
    Mass => ("mass", "Mass") aka "masa",
    Temperature => ("temperature", "Temperature") aka "temperatura",
    Volume => ("volume", "Volume") aka "volumen",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhCalculationType {
    StrongAcid,
    StrongBase,
}

token_enum!(PhCalculationType, "pH calculation type", {
    StrongAcid => ("strong_acid", "Strong acid") aka "acido_fuerte",
    StrongBase => ("strong_base", "Strong base") aka "base_fuerte",
});

/// A `(token, label)` pair for front-end menus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub unit_type: UnitType,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConversionResult {
    pub original_value: f64,
    pub converted_value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub unit_type: UnitType,
}

/// Everything a concentration form may carry; which fields matter depends on
/// `calculation_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationRequest {
    pub calculation_type: CalculationType,
    pub moles: Option<f64>,
    pub volume_l: Option<f64>,
    pub molarity: Option<f64>,
    pub kg_solvent: Option<f64>,
    pub molality: Option<f64>,
    pub c1: Option<f64>,
    pub v1: Option<f64>,
    pub c2: Option<f64>,
    pub v2: Option<f64>,
    pub mass_g: Option<f64>,
    pub molecular_weight: Option<f64>,
    pub volume_ml: Option<f64>,
    pub concentration_mg_ml: Option<f64>,
    pub ppm: Option<f64>,
    pub percentage: Option<f64>,
}

impl ConcentrationRequest {
    pub fn new(calculation_type: CalculationType) -> Self {
        Self {
            calculation_type,
            moles: None,
            volume_l: None,
            molarity: None,
            kg_solvent: None,
            molality: None,
            c1: None,
            v1: None,
            c2: None,
            v2: None,
            mass_g: None,
            molecular_weight: None,
            volume_ml: None,
            concentration_mg_ml: None,
            ppm: None,
            percentage: None,
        }
    }
}

/// Outcome of a concentration calculation.
///
/// Only the quantities involved in the selected mode are populated; the rest
/// stay `None` and are omitted from JSON output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConcentrationResult {
    pub calculation_type: CalculationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kg_solvent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration_mg_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration_g_l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    pub formula_used: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

impl ConcentrationResult {
    pub(crate) fn empty(calculation_type: CalculationType, formula_used: &'static str) -> Self {
        Self {
            calculation_type,
            molarity: None,
            molality: None,
            moles: None,
            volume_l: None,
            volume_ml: None,
            kg_solvent: None,
            mass_g: None,
            c1: None,
            v1: None,
            c2: None,
            v2: None,
            concentration_mg_ml: None,
            concentration_g_l: None,
            ppm: None,
            percentage: None,
            formula_used,
            notes: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeubauerRequest {
    pub num_quadrants: i64,
    /// Volume of one counted quadrant, mm³.
    pub quadrant_volume: f64,
    pub dilution_factor: f64,
    pub cell_counts: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NeubauerResult {
    /// Cells per mL in the original (undiluted) sample.
    pub concentration: f64,
    pub total_cells: i64,
    pub average_cells: f64,
    pub num_quadrants: i64,
    pub volume_per_quadrant: f64,
    pub dilution_factor: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhRequest {
    pub calculation_type: PhCalculationType,
    pub concentration_m: Option<f64>,
    pub equivalents: Option<f64>,
    pub kw: Option<f64>,
}

impl PhRequest {
    /// A request with one equivalent and the default Kw.
    pub fn new(calculation_type: PhCalculationType, concentration_m: f64) -> Self {
        Self {
            calculation_type,
            concentration_m: Some(concentration_m),
            equivalents: Some(DEFAULT_EQUIVALENTS),
            kw: Some(DEFAULT_KW),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhResult {
    pub calculation_type: PhCalculationType,
    pub ph: f64,
    pub poh: f64,
    /// [H3O+] in mol/L, before the pH clamp.
    pub hydronium: f64,
    /// [OH-] in mol/L, before the pH clamp.
    pub hydroxide: f64,
    pub formula_used: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

/// Defaults the shell falls back on when optional pH fields are left empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_kw: f64,
    pub default_equivalents: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_kw: DEFAULT_KW,
            default_equivalents: DEFAULT_EQUIVALENTS,
        }
    }
}

impl Settings {
    pub fn normalized(mut self) -> Self {
        if !(self.default_kw.is_finite() && self.default_kw > 0.0) {
            self.default_kw = DEFAULT_KW;
        }
        if !(self.default_equivalents.is_finite() && self.default_equivalents > 0.0) {
            self.default_equivalents = DEFAULT_EQUIVALENTS;
        }
        self
    }
}
