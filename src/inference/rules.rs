//! # Regras Fuzzy — Condições, Expressões e Base de Regras
//!
//! Uma regra Mamdani tem a forma:
//!
//! ```text
//! SE distance é close E rel_speed é closing E traffic é medium ENTÃO accel é brake
//! ```
//!
//! ## Duas Representações
//!
//! | Tipo | Referência | Uso |
//! |------|------------|-----|
//! | [`Condition`] | Por **nome** (`"distance"`, `"close"`) | Escrita das regras na configuração |
//! | [`AntecedentExpr`] | Por **índice** ([`TermRef`]) | Avaliação a cada chamada |
//!
//! A conversão acontece **uma vez**, quando o
//! [`SystemBuilder`](super::SystemBuilder) monta o sistema. Um nome que não
//! existe vira [`ConfigError::UnknownTermRef`] nesse momento: nunca durante
//! uma avaliação.
//!
//! ## Operadores
//!
//! | Operador | Rust | Semântica |
//! |----------|------|-----------|
//! | E | `a & b` | `min(a, b)` |
//! | OU | `a \| b` | `max(a, b)` |
//! | NÃO | `!a` | `1 − a` |
//!
//! ```rust
//! use fuzzy_cruise::inference::Condition;
//!
//! let cond = Condition::is("distance", "close")
//!     & Condition::is("rel_speed", "closing")
//!     & !Condition::is("traffic", "low");
//! assert_eq!(
//!     cond.to_string(),
//!     "distance é close E rel_speed é closing E NÃO traffic é low"
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::core::LinguisticVariable;
use crate::error::ConfigError;

/// Referência resolvida a um termo: `(índice da variável, índice do termo)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermRef {
    pub variable: usize,
    pub term: usize,
}

/// Condição escrita por nome: forma de autoria das regras.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// `variable é term`
    Is { variable: String, term: String },
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// Atômica: `variable é term`.
    pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Condition::Is {
            variable: variable.into(),
            term: term.into(),
        }
    }

    /// Converte para a forma indexada, usando a tabela de variáveis de entrada.
    pub(crate) fn resolve(
        &self,
        variables: &[LinguisticVariable],
        by_name: &HashMap<&str, usize>,
    ) -> Result<AntecedentExpr, ConfigError> {
        match self {
            Condition::Is { variable, term } => {
                let unknown = || ConfigError::UnknownTermRef {
                    variable: variable.clone(),
                    term: term.clone(),
                };
                let var_idx = *by_name.get(variable.as_str()).ok_or_else(unknown)?;
                let term_idx = variables[var_idx].term_index(term).ok_or_else(unknown)?;
                Ok(AntecedentExpr::Term(TermRef {
                    variable: var_idx,
                    term: term_idx,
                }))
            }
            Condition::And(l, r) => Ok(AntecedentExpr::And(
                Box::new(l.resolve(variables, by_name)?),
                Box::new(r.resolve(variables, by_name)?),
            )),
            Condition::Or(l, r) => Ok(AntecedentExpr::Or(
                Box::new(l.resolve(variables, by_name)?),
                Box::new(r.resolve(variables, by_name)?),
            )),
            Condition::Not(e) => Ok(AntecedentExpr::Not(Box::new(e.resolve(variables, by_name)?))),
        }
    }
}

impl BitAnd for Condition {
    type Output = Condition;

    fn bitand(self, rhs: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Condition {
    type Output = Condition;

    fn bitor(self, rhs: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

/// Formato legível: `distance é close E (traffic é low OU traffic é medium)`.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Is { variable, term } => write!(f, "{} é {}", variable, term),
            Condition::And(l, r) => {
                write_operand(f, l, Some("E"))?;
                write!(f, " E ")?;
                write_operand(f, r, Some("E"))
            }
            Condition::Or(l, r) => {
                write_operand(f, l, Some("OU"))?;
                write!(f, " OU ")?;
                write_operand(f, r, Some("OU"))
            }
            Condition::Not(e) => {
                write!(f, "NÃO ")?;
                write_operand(f, e, None)
            }
        }
    }
}

// Parênteses só quando o operador filho difere do pai.
fn write_operand(f: &mut fmt::Formatter<'_>, c: &Condition, parent: Option<&str>) -> fmt::Result {
    let needs_parens = match c {
        Condition::Is { .. } | Condition::Not(_) => false,
        Condition::And(..) => parent != Some("E"),
        Condition::Or(..) => parent != Some("OU"),
    };
    if needs_parens {
        write!(f, "({})", c)
    } else {
        write!(f, "{}", c)
    }
}

/// Graus de pertinência de uma chamada: `[variável][termo] → grau`.
///
/// Efêmero: criado a cada avaliação e descartado em seguida. Variáveis que
/// a base de regras não usa ficam com a linha vazia.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FuzzifiedInputs {
    degrees: Vec<Vec<f64>>,
}

impl FuzzifiedInputs {
    pub fn new(degrees: Vec<Vec<f64>>) -> Self {
        Self { degrees }
    }

    /// Grau do termo referenciado, se presente no contexto.
    pub fn degree(&self, r: TermRef) -> Option<f64> {
        self.degrees.get(r.variable)?.get(r.term).copied()
    }

    /// Graus de uma variável, na ordem dos termos.
    pub fn variable(&self, idx: usize) -> &[f64] {
        self.degrees.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Árvore do antecedente, já resolvida para índices.
#[derive(Clone, Debug, PartialEq)]
pub enum AntecedentExpr {
    Term(TermRef),
    And(Box<AntecedentExpr>, Box<AntecedentExpr>),
    Or(Box<AntecedentExpr>, Box<AntecedentExpr>),
    Not(Box<AntecedentExpr>),
}

impl AntecedentExpr {
    /// Avalia o grau da expressão: E = min, OU = max, NÃO = 1 − x.
    ///
    /// # Erros
    ///
    /// [`ConfigError::UnknownTermRef`] se a expressão apontar para um termo
    /// fora do contexto. Com regras montadas pelo builder isso não ocorre.
    pub fn evaluate(&self, ctx: &FuzzifiedInputs) -> Result<f64, ConfigError> {
        match self {
            AntecedentExpr::Term(r) => ctx.degree(*r).ok_or_else(|| ConfigError::UnknownTermRef {
                variable: format!("#{}", r.variable),
                term: format!("#{}", r.term),
            }),
            AntecedentExpr::And(l, r) => Ok(l.evaluate(ctx)?.min(r.evaluate(ctx)?)),
            AntecedentExpr::Or(l, r) => Ok(l.evaluate(ctx)?.max(r.evaluate(ctx)?)),
            AntecedentExpr::Not(e) => Ok(1.0 - e.evaluate(ctx)?),
        }
    }

    /// Acrescenta em `out` os índices das variáveis referenciadas.
    pub fn collect_variables(&self, out: &mut Vec<usize>) {
        match self {
            AntecedentExpr::Term(r) => {
                if !out.contains(&r.variable) {
                    out.push(r.variable);
                }
            }
            AntecedentExpr::And(l, r) | AntecedentExpr::Or(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
            AntecedentExpr::Not(e) => e.collect_variables(out),
        }
    }
}

/// Regra resolvida: antecedente indexado + termo consequente.
#[derive(Clone, Debug)]
pub struct Rule {
    antecedent: AntecedentExpr,
    consequent: usize,
    label: Option<String>,
    description: String,
}

impl Rule {
    pub(crate) fn new(
        antecedent: AntecedentExpr,
        consequent: usize,
        label: Option<String>,
        description: String,
    ) -> Self {
        Self {
            antecedent,
            consequent,
            label,
            description,
        }
    }

    pub fn antecedent(&self) -> &AntecedentExpr {
        &self.antecedent
    }

    /// Índice do termo na variável consequente.
    pub fn consequent(&self) -> usize {
        self.consequent
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Texto `SE … ENTÃO …` gerado na montagem.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Grau de disparo da regra no contexto dado.
    pub fn firing_strength(&self, ctx: &FuzzifiedInputs) -> Result<f64, ConfigError> {
        self.antecedent.evaluate(ctx)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "[{}] {}", label, self.description),
            None => write!(f, "{}", self.description),
        }
    }
}

/// Sequência ordenada de regras.
///
/// A ordem não altera o resultado (a agregação é comutativa), mas é
/// preservada para que logs e explicações sejam reproduzíveis.
#[derive(Clone, Debug, Default)]
pub struct RuleBase {
    rules: Vec<Rule>,
    referenced: Vec<usize>,
}

impl RuleBase {
    pub(crate) fn new(rules: Vec<Rule>) -> Self {
        let mut referenced = Vec::new();
        for rule in &rules {
            rule.antecedent.collect_variables(&mut referenced);
        }
        referenced.sort_unstable();
        Self { rules, referenced }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Índices (ordenados) das variáveis de entrada usadas por alguma regra.
    pub fn referenced_variables(&self) -> &[usize] {
        &self.referenced
    }
}
