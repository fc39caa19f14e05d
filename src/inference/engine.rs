//! # Motor de Inferência Mamdani
//!
//! O [`InferenceEngine`] é **sem estado**: recebe o [`FuzzySystem`] por
//! referência e as entradas crisp da chamada, e devolve a distribuição de
//! saída agregada. Nada sobrevive entre chamadas, o que permite usar o mesmo
//! sistema em quantas threads forem necessárias.
//!
//! ## Pipeline
//!
//! ```text
//! entradas crisp
//!   │
//!   ├── 1. FUZZIFICAÇÃO  : grau de cada termo das variáveis usadas pelas regras
//!   ├── 2. DISPARO       : grau de cada regra (E=min, OU=max, NÃO=1−x)
//!   ├── 3. IMPLICAÇÃO    : corte do termo consequente: min(s, μ_t(u))
//!   └── 4. AGREGAÇÃO     : máximo ponto a ponto sobre TODO o universo de saída
//! ```
//!
//! A agregação é feita sobre o universo inteiro da variável de saída, não por
//! termo: regras com consequentes diferentes contribuem para o mesmo array.
//! Regras com grau zero não contribuem e são puladas.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::rules::FuzzifiedInputs;
use super::system::FuzzySystem;
use crate::core::Universe;
use crate::error::{ConfigError, FuzzyError, RuntimeError};

/// Entradas crisp de uma chamada: `nome da variável → valor`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrispInputs(HashMap<String, f64>);

impl CrispInputs {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Versão encadeável de [`insert`](Self::insert).
    pub fn with(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.insert(variable, value);
        self
    }

    pub fn insert(&mut self, variable: impl Into<String>, value: f64) {
        self.0.insert(variable.into(), value);
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }
}

/// Distribuição de saída agregada: um grau por ponto do universo de saída.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputAggregate {
    degrees: Vec<f64>,
}

impl OutputAggregate {
    /// Distribuição toda zero com `len` pontos.
    pub fn zeros(len: usize) -> Self {
        Self {
            degrees: vec![0.0; len],
        }
    }

    /// Distribuição pronta, um grau por ponto de `universe`.
    ///
    /// # Erros
    ///
    /// [`ConfigError::AggregateSizeMismatch`] se `degrees` e `universe`
    /// tiverem tamanhos diferentes.
    pub fn from_degrees(degrees: Vec<f64>, universe: &Universe) -> Result<Self, ConfigError> {
        let aggregate = Self { degrees };
        aggregate.check_size(universe)?;
        Ok(aggregate)
    }

    pub(crate) fn check_size(&self, universe: &Universe) -> Result<(), ConfigError> {
        if self.degrees.len() != universe.len() {
            return Err(ConfigError::AggregateSizeMismatch {
                expected: universe.len(),
                found: self.degrees.len(),
            });
        }
        Ok(())
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// `true` se nenhum ponto tem grau positivo.
    pub fn is_empty_distribution(&self) -> bool {
        self.degrees.iter().all(|m| *m <= 0.0)
    }

    /// Agrega a contribuição cortada de um termo: `μ[i] = max(μ[i], min(s, term[i]))`.
    fn clip_and_merge(&mut self, strength: f64, term: &[f64]) {
        for (acc, t) in self.degrees.iter_mut().zip(term) {
            *acc = acc.max(strength.min(*t));
        }
    }
}

/// Uma regra que disparou nesta chamada.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleActivation {
    /// Posição da regra na base.
    pub rule: usize,
    /// Grau de disparo, em `(0, 1]`.
    pub strength: f64,
}

/// Resultado da inferência, antes da defuzzificação.
#[derive(Clone, Debug, PartialEq)]
pub struct Inference {
    pub aggregate: OutputAggregate,
    /// Regras com grau > 0, na ordem da base.
    pub activations: Vec<RuleActivation>,
}

/// Motor de inferência Mamdani: struct sem estado.
///
/// ## Uso
///
/// ```rust
/// use fuzzy_cruise::config;
/// use fuzzy_cruise::inference::{CrispInputs, InferenceEngine};
///
/// let system = config::reference_system().unwrap();
/// let inputs = CrispInputs::new()
///     .with("distance", 10.0)
///     .with("rel_speed", -50.0)
///     .with("traffic", 8.0);
/// let inference = InferenceEngine::infer(&system, &inputs).unwrap();
/// assert!(!inference.activations.is_empty());
/// ```
pub struct InferenceEngine;

impl InferenceEngine {
    /// Fuzzifica as entradas das variáveis que a base de regras usa.
    ///
    /// # Erros
    ///
    /// [`RuntimeError::MissingInput`] se alguma dessas variáveis não tiver valor.
    pub fn fuzzify(system: &FuzzySystem, inputs: &CrispInputs) -> Result<FuzzifiedInputs, RuntimeError> {
        let antecedents = system.antecedents();
        let mut degrees = vec![Vec::new(); antecedents.len()];
        for &idx in system.rule_base().referenced_variables() {
            let var = &antecedents[idx];
            let crisp = inputs.get(var.name()).ok_or_else(|| RuntimeError::MissingInput {
                variable: var.name().to_string(),
            })?;
            degrees[idx] = var.degrees(crisp);
        }
        Ok(FuzzifiedInputs::new(degrees))
    }

    /// Roda fuzzificação, disparo, implicação e agregação.
    ///
    /// # Erros
    ///
    /// - [`RuntimeError::MissingInput`] (via [`FuzzyError::Runtime`]) se faltar entrada
    /// - [`ConfigError::UnknownTermRef`](crate::error::ConfigError::UnknownTermRef)
    ///   apenas se a base de regras não tiver sido montada pelo builder
    pub fn infer(system: &FuzzySystem, inputs: &CrispInputs) -> Result<Inference, FuzzyError> {
        let ctx = Self::fuzzify(system, inputs)?;
        let mut aggregate = OutputAggregate::zeros(system.consequent().universe().len());
        let mut activations = Vec::new();

        for (i, rule) in system.rule_base().rules().iter().enumerate() {
            let strength = rule.firing_strength(&ctx)?;
            tracing::trace!(rule = i, strength, "Grau de disparo");
            if strength <= 0.0 {
                continue;
            }
            aggregate.clip_and_merge(strength, system.consequent_samples(rule.consequent()));
            activations.push(RuleActivation { rule: i, strength });
        }

        tracing::debug!(
            fired = activations.len(),
            total = system.rule_base().len(),
            "Inferência concluída"
        );

        Ok(Inference {
            aggregate,
            activations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LinguisticVariable, MembershipFunction, Universe};
    use crate::error::ConfigError;
    use crate::inference::{Condition, SystemBuilder};

    fn tiny_system() -> FuzzySystem {
        let temp = LinguisticVariable::antecedent("temp", Universe::linspace(0.0, 40.0, 41).unwrap())
            .with_term("cold", MembershipFunction::triangular(0.0, 0.0, 20.0).unwrap())
            .unwrap()
            .with_term("hot", MembershipFunction::triangular(20.0, 40.0, 40.0).unwrap())
            .unwrap();
        let unused = LinguisticVariable::antecedent("humidity", Universe::linspace(0.0, 1.0, 11).unwrap())
            .with_term("dry", MembershipFunction::triangular(0.0, 0.0, 1.0).unwrap())
            .unwrap();
        let fan = LinguisticVariable::consequent("fan", Universe::linspace(0.0, 10.0, 11).unwrap())
            .with_term("slow", MembershipFunction::triangular(0.0, 0.0, 5.0).unwrap())
            .unwrap()
            .with_term("fast", MembershipFunction::triangular(5.0, 10.0, 10.0).unwrap())
            .unwrap();
        SystemBuilder::new()
            .antecedent(temp)
            .antecedent(unused)
            .consequent(fan)
            .rule(Condition::is("temp", "cold"), "slow")
            .rule(Condition::is("temp", "hot"), "fast")
            .build()
            .unwrap()
    }

    #[test]
    fn clipping_and_max_aggregation() {
        let system = tiny_system();
        // temp=15 → cold=0.25, hot=0
        let inf = InferenceEngine::infer(&system, &CrispInputs::new().with("temp", 15.0)).unwrap();
        assert_eq!(inf.activations.len(), 1);
        assert_eq!(inf.activations[0].rule, 0);
        assert!((inf.activations[0].strength - 0.25).abs() < 1e-12);

        let mu = inf.aggregate.degrees();
        assert_eq!(mu.len(), 11);
        // slow(0)=1 cortado em 0.25; slow(4)=0.2 fica 0.2; fast não contribui
        assert!((mu[0] - 0.25).abs() < 1e-12);
        assert!((mu[4] - 0.2).abs() < 1e-12);
        assert_eq!(mu[10], 0.0);
        assert!(mu.iter().all(|m| (0.0..=0.25 + 1e-12).contains(m)));
    }

    #[test]
    fn different_consequents_share_one_aggregate() {
        let system = tiny_system();
        // exatamente no meio: nenhum termo de entrada ativo
        let none = InferenceEngine::infer(&system, &CrispInputs::new().with("temp", 20.0)).unwrap();
        assert!(none.aggregate.is_empty_distribution());
        assert!(none.activations.is_empty());

        let wide = SystemBuilder::from_system(&system)
            .rule(!Condition::is("temp", "hot"), "fast")
            .build()
            .unwrap();
        let inf = InferenceEngine::infer(&wide, &CrispInputs::new().with("temp", 10.0)).unwrap();
        let mu = inf.aggregate.degrees();
        assert!(mu[0] > 0.0, "termo slow presente");
        assert!(mu[10] > 0.0, "termo fast presente");
    }

    #[test]
    fn unreferenced_inputs_are_optional() {
        let system = tiny_system();
        // humidity não aparece em nenhuma regra
        assert!(InferenceEngine::infer(&system, &CrispInputs::new().with("temp", 5.0)).is_ok());
        let ctx = InferenceEngine::fuzzify(&system, &CrispInputs::new().with("temp", 5.0)).unwrap();
        assert!(ctx.variable(1).is_empty());
    }

    #[test]
    fn missing_input_is_reported() {
        let system = tiny_system();
        let err = InferenceEngine::infer(&system, &CrispInputs::new().with("humidity", 0.5)).unwrap_err();
        assert_eq!(
            err,
            FuzzyError::Runtime(RuntimeError::MissingInput {
                variable: "temp".into()
            })
        );
        assert!(!matches!(err, FuzzyError::Config(ConfigError::UnknownTermRef { .. })));
    }
}
