//! # Defuzzificação — Da Distribuição ao Número
//!
//! Reduz o array agregado de saída a um único valor crisp.
//!
//! | Método | Resultado |
//! |--------|-----------|
//! | `Centroid` (padrão) | `Σ uᵢ·μᵢ / Σ μᵢ`: centro de gravidade |
//! | `Bisector` | Primeiro ponto onde a área acumulada atinge metade do total |
//! | `MeanOfMaximum` | Média dos pontos de pertinência máxima |
//! | `SmallestOfMaximum` | Menor ponto de pertinência máxima |
//! | `LargestOfMaximum` | Maior ponto de pertinência máxima |
//!
//! ## Nenhuma Regra Disparou
//!
//! Se a área total é zero não existe centróide. Em vez de NaN ou erro, o
//! resultado é o **ponto médio do universo** com `no_rule_fired = true`.

use serde::{Deserialize, Serialize};

use super::engine::OutputAggregate;
use crate::core::Universe;
use crate::error::ConfigError;

/// Método de defuzzificação.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefuzzMethod {
    #[default]
    Centroid,
    Bisector,
    MeanOfMaximum,
    SmallestOfMaximum,
    LargestOfMaximum,
}

/// Valor crisp + flag de degenerescência.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Defuzzified {
    pub value: f64,
    /// `true` quando a agregação era toda zero e `value` é o fallback.
    pub no_rule_fired: bool,
}

impl DefuzzMethod {
    /// Aplica o método à distribuição `aggregate`, amostrada em `universe`.
    ///
    /// # Erros
    ///
    /// [`ConfigError::AggregateSizeMismatch`] se a distribuição não tiver
    /// exatamente um grau por ponto do universo.
    pub fn apply(&self, aggregate: &OutputAggregate, universe: &Universe) -> Result<Defuzzified, ConfigError> {
        aggregate.check_size(universe)?;
        let mu = aggregate.degrees();
        let points = universe.points();
        let total: f64 = mu.iter().sum();

        if total <= 0.0 {
            tracing::debug!(fallback = universe.midpoint(), "Nenhuma regra disparou, usando ponto médio");
            return Ok(Defuzzified {
                value: universe.midpoint(),
                no_rule_fired: true,
            });
        }

        let value = match self {
            DefuzzMethod::Centroid => {
                let weighted: f64 = points.iter().zip(mu).map(|(u, m)| u * m).sum();
                weighted / total
            }
            DefuzzMethod::Bisector => {
                let half = total / 2.0;
                let mut acc = 0.0;
                let mut at = universe.max();
                for (u, m) in points.iter().zip(mu) {
                    acc += m;
                    if acc >= half {
                        at = *u;
                        break;
                    }
                }
                at
            }
            DefuzzMethod::MeanOfMaximum => {
                let peak = mu.iter().copied().fold(0.0, f64::max);
                let maxima: Vec<f64> = points
                    .iter()
                    .zip(mu)
                    .filter(|(_, m)| **m == peak)
                    .map(|(u, _)| *u)
                    .collect();
                maxima.iter().sum::<f64>() / maxima.len() as f64
            }
            DefuzzMethod::SmallestOfMaximum => {
                let peak = mu.iter().copied().fold(0.0, f64::max);
                points
                    .iter()
                    .zip(mu)
                    .find(|(_, m)| **m == peak)
                    .map(|(u, _)| *u)
                    .unwrap_or_else(|| universe.min())
            }
            DefuzzMethod::LargestOfMaximum => {
                let peak = mu.iter().copied().fold(0.0, f64::max);
                points
                    .iter()
                    .zip(mu)
                    .rev()
                    .find(|(_, m)| **m == peak)
                    .map(|(u, _)| *u)
                    .unwrap_or_else(|| universe.max())
            }
        };

        Ok(Defuzzified {
            value,
            no_rule_fired: false,
        })
    }
}

/// Centro de gravidade: atalho para [`DefuzzMethod::Centroid`].
pub fn centroid(aggregate: &OutputAggregate, universe: &Universe) -> Result<Defuzzified, ConfigError> {
    DefuzzMethod::Centroid.apply(aggregate, universe)
}
