//! # FuzzySystem — Configuração Congelada
//!
//! O [`FuzzySystem`] reúne tudo o que a inferência precisa e que **não muda**
//! entre chamadas: variáveis de entrada, variável de saída, base de regras e
//! método de defuzzificação.
//!
//! ## Montar, Depois Congelar
//!
//! ```text
//! SystemBuilder ──antecedent/consequent/rule──▶ build() ──▶ FuzzySystem (imutável)
//!                                                 │
//!                                                 ├── nomes de variáveis únicos?
//!                                                 ├── consequente declarado?
//!                                                 └── toda regra resolve para índices?
//! ```
//!
//! Qualquer falha aborta a montagem inteira ([`ConfigError`]): não existe
//! sistema parcialmente válido. Depois de pronto, o sistema não tem nenhum
//! método `&mut self` e pode ser compartilhado via `Arc` entre threads.

use std::collections::HashMap;

use super::defuzz::{DefuzzMethod, Defuzzified};
use super::engine::{CrispInputs, Inference, InferenceEngine};
use super::rules::{Condition, Rule, RuleBase};
use crate::core::LinguisticVariable;
use crate::error::{ConfigError, FuzzyError};

/// Regra como foi escrita, antes da resolução.
#[derive(Clone, Debug)]
struct RuleSpec {
    label: Option<String>,
    condition: Condition,
    consequent: String,
}

/// Acumula a configuração; [`build`](SystemBuilder::build) valida e congela.
#[derive(Clone, Debug, Default)]
pub struct SystemBuilder {
    antecedents: Vec<LinguisticVariable>,
    consequent: Option<LinguisticVariable>,
    rules: Vec<RuleSpec>,
    defuzz: DefuzzMethod,
}

impl SystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parte da configuração de um sistema existente (variáveis, regras e método).
    pub fn from_system(system: &FuzzySystem) -> Self {
        Self {
            antecedents: system.antecedents.clone(),
            consequent: Some(system.consequent.clone()),
            rules: system.specs.clone(),
            defuzz: system.defuzz,
        }
    }

    pub fn antecedent(mut self, variable: LinguisticVariable) -> Self {
        self.antecedents.push(variable);
        self
    }

    pub fn consequent(mut self, variable: LinguisticVariable) -> Self {
        self.consequent = Some(variable);
        self
    }

    /// `SE condition ENTÃO <consequente> é term`.
    pub fn rule(mut self, condition: Condition, term: impl Into<String>) -> Self {
        self.rules.push(RuleSpec {
            label: None,
            condition,
            consequent: term.into(),
        });
        self
    }

    /// Como [`rule`](Self::rule), com um rótulo para logs e explicações.
    pub fn labeled_rule(
        mut self,
        label: impl Into<String>,
        condition: Condition,
        term: impl Into<String>,
    ) -> Self {
        self.rules.push(RuleSpec {
            label: Some(label.into()),
            condition,
            consequent: term.into(),
        });
        self
    }

    pub fn defuzzification(mut self, method: DefuzzMethod) -> Self {
        self.defuzz = method;
        self
    }

    /// Reordena as regras: a posição `k` passa a ter a regra `order[k]` da
    /// ordem atual.
    ///
    /// # Erros
    ///
    /// [`ConfigError::InvalidRuleOrder`] se `order` não usar cada índice
    /// `0..n` exatamente uma vez.
    pub fn reorder_rules(mut self, order: &[usize]) -> Result<Self, ConfigError> {
        let n = self.rules.len();
        let mut seen = vec![false; n];
        let is_permutation = order.len() == n
            && order
                .iter()
                .all(|&i| i < n && !std::mem::replace(&mut seen[i], true));
        if !is_permutation {
            return Err(ConfigError::InvalidRuleOrder {
                rules: n,
                order: order.to_vec(),
            });
        }
        self.rules = order.iter().map(|&i| self.rules[i].clone()).collect();
        Ok(self)
    }

    /// Descarta todas as regras acumuladas até aqui.
    pub fn clear_rules(mut self) -> Self {
        self.rules.clear();
        self
    }

    /// Valida tudo e produz o sistema imutável.
    ///
    /// # Erros
    ///
    /// - [`ConfigError::DuplicateVariableName`]: nome repetido entre as variáveis
    /// - [`ConfigError::MissingConsequent`]: nenhuma variável de saída
    /// - [`ConfigError::UnknownTermRef`]: regra com variável/termo inexistente,
    ///   inclusive o termo consequente
    pub fn build(self) -> Result<FuzzySystem, ConfigError> {
        let consequent = self.consequent.ok_or(ConfigError::MissingConsequent)?;

        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(self.antecedents.len());
        for (i, var) in self.antecedents.iter().enumerate() {
            if by_name.insert(var.name(), i).is_some() {
                return Err(ConfigError::DuplicateVariableName(var.name().to_string()));
            }
        }
        if by_name.contains_key(consequent.name()) {
            return Err(ConfigError::DuplicateVariableName(consequent.name().to_string()));
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for spec in &self.rules {
            let antecedent = spec.condition.resolve(&self.antecedents, &by_name)?;
            let term = consequent
                .term_index(&spec.consequent)
                .ok_or_else(|| ConfigError::UnknownTermRef {
                    variable: consequent.name().to_string(),
                    term: spec.consequent.clone(),
                })?;
            let description = format!(
                "SE {} ENTÃO {} é {}",
                spec.condition,
                consequent.name(),
                spec.consequent
            );
            rules.push(Rule::new(antecedent, term, spec.label.clone(), description));
        }

        // Cada termo de saída amostrado uma vez sobre o universo de saída.
        let consequent_samples: Vec<Vec<f64>> = consequent
            .terms()
            .iter()
            .map(|t| {
                consequent
                    .universe()
                    .points()
                    .iter()
                    .map(|u| t.membership.sample(*u))
                    .collect::<Vec<f64>>()
            })
            .collect();

        let rule_base = RuleBase::new(rules);
        tracing::debug!(
            inputs = self.antecedents.len(),
            output = %consequent.name(),
            rules = rule_base.len(),
            "Sistema fuzzy montado"
        );

        Ok(FuzzySystem {
            antecedents: self.antecedents,
            consequent,
            consequent_samples,
            rule_base,
            specs: self.rules,
            defuzz: self.defuzz,
        })
    }
}

/// Configuração imutável de um sistema Mamdani de saída única.
#[derive(Clone, Debug)]
pub struct FuzzySystem {
    antecedents: Vec<LinguisticVariable>,
    consequent: LinguisticVariable,
    /// `[termo][ponto do universo]`
    consequent_samples: Vec<Vec<f64>>,
    rule_base: RuleBase,
    specs: Vec<RuleSpec>,
    defuzz: DefuzzMethod,
}

impl FuzzySystem {
    pub fn antecedents(&self) -> &[LinguisticVariable] {
        &self.antecedents
    }

    /// Variável de entrada pelo nome.
    pub fn antecedent(&self, name: &str) -> Option<&LinguisticVariable> {
        self.antecedents.iter().find(|v| v.name() == name)
    }

    pub fn consequent(&self) -> &LinguisticVariable {
        &self.consequent
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }

    pub fn defuzz_method(&self) -> DefuzzMethod {
        self.defuzz
    }

    /// Termo de saída `term` amostrado sobre o universo de saída.
    pub(crate) fn consequent_samples(&self, term: usize) -> &[f64] {
        &self.consequent_samples[term]
    }

    /// Inferência seguida de defuzzificação.
    pub fn evaluate(&self, inputs: &CrispInputs) -> Result<Defuzzified, FuzzyError> {
        self.evaluate_detailed(inputs).map(|(d, _)| d)
    }

    /// Como [`evaluate`](Self::evaluate), devolvendo também a inferência intermediária.
    pub fn evaluate_detailed(&self, inputs: &CrispInputs) -> Result<(Defuzzified, Inference), FuzzyError> {
        let inference = InferenceEngine::infer(self, inputs)?;
        let result = self.defuzz.apply(&inference.aggregate, self.consequent.universe())?;
        Ok((result, inference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MembershipFunction, Universe};

    fn var(name: &str, terms: &[&str]) -> LinguisticVariable {
        let mut v = LinguisticVariable::antecedent(name, Universe::linspace(0.0, 1.0, 11).unwrap());
        for t in terms {
            v.add_term(*t, MembershipFunction::triangular(0.0, 0.5, 1.0).unwrap())
                .unwrap();
        }
        v
    }

    fn out() -> LinguisticVariable {
        LinguisticVariable::consequent("out", Universe::linspace(0.0, 1.0, 11).unwrap())
            .with_term("some", MembershipFunction::triangular(0.0, 0.5, 1.0).unwrap())
            .unwrap()
    }

    #[test]
    fn missing_consequent_is_rejected() {
        let err = SystemBuilder::new().antecedent(var("x", &["a"])).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingConsequent);
    }

    #[test]
    fn duplicate_variable_names_are_rejected() {
        let err = SystemBuilder::new()
            .antecedent(var("x", &["a"]))
            .antecedent(var("x", &["b"]))
            .consequent(out())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVariableName("x".into()));

        let err = SystemBuilder::new()
            .antecedent(var("out", &["a"]))
            .consequent(out())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVariableName("out".into()));
    }

    #[test]
    fn unknown_consequent_term_is_rejected() {
        let err = SystemBuilder::new()
            .antecedent(var("x", &["a"]))
            .consequent(out())
            .rule(Condition::is("x", "a"), "lots")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTermRef {
                variable: "out".into(),
                term: "lots".into()
            }
        );
    }

    #[test]
    fn antecedent_cannot_reference_the_output() {
        let err = SystemBuilder::new()
            .antecedent(var("x", &["a"]))
            .consequent(out())
            .rule(Condition::is("out", "some"), "some")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTermRef { .. }));
    }

    #[test]
    fn descriptions_and_order_are_preserved() {
        let system = SystemBuilder::new()
            .antecedent(var("x", &["a", "b"]))
            .consequent(out())
            .labeled_rule("R1", Condition::is("x", "a"), "some")
            .rule(Condition::is("x", "a") & !Condition::is("x", "b"), "some")
            .build()
            .unwrap();
        let rules = system.rule_base().rules();
        assert_eq!(rules[0].to_string(), "[R1] SE x é a ENTÃO out é some");
        assert_eq!(rules[1].description(), "SE x é a E NÃO x é b ENTÃO out é some");

        let reversed = SystemBuilder::from_system(&system)
            .reorder_rules(&[1, 0])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(reversed.rule_base().rules()[1].label(), Some("R1"));
    }

    #[test]
    fn reorder_requires_a_permutation() {
        let builder = SystemBuilder::new()
            .antecedent(var("x", &["a", "b"]))
            .consequent(out())
            .rule(Condition::is("x", "a"), "some")
            .rule(Condition::is("x", "b"), "some");

        for order in [vec![], vec![0], vec![0, 0], vec![1, 2], vec![0, 1, 0]] {
            let err = builder.clone().reorder_rules(&order).unwrap_err();
            assert_eq!(err, ConfigError::InvalidRuleOrder { rules: 2, order });
        }
        assert!(builder.reorder_rules(&[1, 0]).is_ok());
    }

    #[test]
    fn clear_rules_empties_the_base() {
        let system = SystemBuilder::new()
            .antecedent(var("x", &["a"]))
            .consequent(out())
            .rule(Condition::is("x", "a"), "some")
            .clear_rules()
            .build()
            .unwrap();
        assert!(system.rule_base().is_empty());
    }

    #[test]
    fn empty_rule_base_always_falls_back() {
        let system = SystemBuilder::new()
            .antecedent(var("x", &["a"]))
            .consequent(out())
            .build()
            .unwrap();
        let d = system.evaluate(&CrispInputs::new()).unwrap();
        assert!(d.no_rule_fired);
        assert_eq!(d.value, 0.5);
    }

    #[test]
    fn system_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FuzzySystem>();
    }
}
