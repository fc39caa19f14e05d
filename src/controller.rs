//! # AccelerationAdvisor — Fachada de Avaliação
//!
//! Ponto de entrada para quem só quer "três números entram, um sai".
//! O [`AccelerationAdvisor`] segura um `Arc<FuzzySystem>` imutável e, a cada
//! chamada, liga fuzzificação → inferência → defuzzificação sem guardar
//! nada entre chamadas.
//!
//! ## Concorrência
//!
//! Clonar o advisor só clona o `Arc`. Qualquer número de threads pode chamar
//! [`evaluate`](AccelerationAdvisor::evaluate) ao mesmo tempo, sem lock.
//! [`evaluate_batch`](AccelerationAdvisor::evaluate_batch) usa `rayon` para
//! distribuir um lote de leituras entre os núcleos.
//!
//! ## Exemplo
//!
//! ```rust
//! use fuzzy_cruise::controller::AccelerationAdvisor;
//! use fuzzy_cruise::verbal::Maneuver;
//!
//! let advisor = AccelerationAdvisor::reference().unwrap();
//! let rec = advisor.evaluate(10.0, -50.0, 8.0).unwrap();
//! assert_eq!(Maneuver::classify(rec.acceleration), Maneuver::StrongBraking);
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{self, DISTANCE, REL_SPEED, TRAFFIC};
use crate::error::{ConfigError, FuzzyError};
use crate::inference::{CrispInputs, FuzzySystem};

/// Uma leitura dos sensores.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sensors {
    /// Distância ao veículo da frente, em metros.
    pub distance: f64,
    /// Velocidade relativa em km/h (negativa = fechando).
    pub rel_speed: f64,
    /// Densidade de trânsito, índice 0–10.
    pub traffic: f64,
}

impl Sensors {
    pub fn new(distance: f64, rel_speed: f64, traffic: f64) -> Self {
        Self {
            distance,
            rel_speed,
            traffic,
        }
    }

    fn to_inputs(self) -> CrispInputs {
        CrispInputs::new()
            .with(DISTANCE, self.distance)
            .with(REL_SPEED, self.rel_speed)
            .with(TRAFFIC, self.traffic)
    }
}

/// Aceleração recomendada.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// m/s², dentro do universo de saída.
    pub acceleration: f64,
    /// `true` quando nenhuma regra disparou e `acceleration` é o ponto médio.
    pub no_rule_fired: bool,
}

/// Regra que contribuiu para uma recomendação.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    pub rule: String,
    pub strength: f64,
}

/// Recomendação acompanhada das regras que a produziram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub sensors: Sensors,
    pub recommendation: Recommendation,
    pub fired: Vec<FiredRule>,
}

/// Fachada sem estado sobre um [`FuzzySystem`] compartilhado.
#[derive(Clone, Debug)]
pub struct AccelerationAdvisor {
    system: Arc<FuzzySystem>,
}

impl AccelerationAdvisor {
    /// Usa um sistema já montado. O sistema deve ter as entradas
    /// `distance`, `rel_speed` e `traffic`.
    pub fn new(system: Arc<FuzzySystem>) -> Self {
        Self { system }
    }

    /// Advisor sobre a configuração de referência.
    pub fn reference() -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(config::reference_system()?)))
    }

    pub fn system(&self) -> &Arc<FuzzySystem> {
        &self.system
    }

    /// Avalia uma leitura.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::Runtime`] com `MissingInput` se o sistema usar uma
    /// variável de entrada que não é uma das três leituras.
    pub fn evaluate(&self, distance: f64, rel_speed: f64, traffic: f64) -> Result<Recommendation, FuzzyError> {
        self.evaluate_sensors(Sensors::new(distance, rel_speed, traffic))
    }

    pub fn evaluate_sensors(&self, sensors: Sensors) -> Result<Recommendation, FuzzyError> {
        let result = self.system.evaluate(&sensors.to_inputs())?;
        if result.no_rule_fired {
            tracing::debug!(?sensors, "Leitura sem regra ativa");
        }
        Ok(Recommendation {
            acceleration: result.value,
            no_rule_fired: result.no_rule_fired,
        })
    }

    /// Avalia um lote em paralelo; a saída segue a ordem da entrada.
    pub fn evaluate_batch(&self, batch: &[Sensors]) -> Vec<Result<Recommendation, FuzzyError>> {
        batch
            .par_iter()
            .map(|s| self.evaluate_sensors(*s))
            .collect()
    }

    /// Avalia e lista as regras disparadas, com seus graus.
    pub fn explain(&self, sensors: Sensors) -> Result<Explanation, FuzzyError> {
        let (result, inference) = self.system.evaluate_detailed(&sensors.to_inputs())?;
        let rules = self.system.rule_base().rules();
        let fired = inference
            .activations
            .iter()
            .map(|a| FiredRule {
                rule: rules[a.rule].to_string(),
                strength: a.strength,
            })
            .collect();
        Ok(Explanation {
            sensors,
            recommendation: Recommendation {
                acceleration: result.value,
                no_rule_fired: result.no_rule_fired,
            },
            fired,
        })
    }
}
