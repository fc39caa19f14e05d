//! # Classificador Verbal
//!
//! Traduz a aceleração recomendada numa das cinco faixas fixas, sem
//! sobreposição:
//!
//! | Faixa (m/s²) | Manobra |
//! |--------------|---------|
//! | `a < -3` | strong braking |
//! | `-3 ≤ a < -1` | mild braking |
//! | `-1 ≤ a < 1` | keep current speed |
//! | `1 ≤ a < 3` | mild acceleration |
//! | `a ≥ 3` | strong acceleration |
//!
//! Não faz parte do motor: é só a camada de apresentação usada pela CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Manobra sugerida para uma aceleração.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maneuver {
    StrongBraking,
    MildBraking,
    KeepSpeed,
    MildAcceleration,
    StrongAcceleration,
}

impl Maneuver {
    /// Faixa correspondente a `accel`.
    pub fn classify(accel: f64) -> Self {
        if accel < -3.0 {
            Maneuver::StrongBraking
        } else if accel < -1.0 {
            Maneuver::MildBraking
        } else if accel < 1.0 {
            Maneuver::KeepSpeed
        } else if accel < 3.0 {
            Maneuver::MildAcceleration
        } else {
            Maneuver::StrongAcceleration
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Maneuver::StrongBraking => "strong braking",
            Maneuver::MildBraking => "mild braking",
            Maneuver::KeepSpeed => "keep current speed",
            Maneuver::MildAcceleration => "mild acceleration",
            Maneuver::StrongAcceleration => "strong acceleration",
        }
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
