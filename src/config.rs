//! # Configuração de Referência — Controle de Aceleração
//!
//! Sistema Mamdani do veículo seguidor, descrito como **dados** e montado
//! pela mesma API pública que qualquer outra base de regras usaria.
//!
//! ## Variáveis
//!
//! | Variável | Papel | Universo | Termos |
//! |----------|-------|----------|--------|
//! | `distance` | entrada | `[0, 120]` m, 121 pts | very_close, close, medium, far |
//! | `rel_speed` | entrada | `[-100, 100]` km/h, 201 pts | closing_fast, closing, stable, opening, opening_fast |
//! | `traffic` | entrada | `[0, 10]`, 101 pts | low, medium, high |
//! | `accel` | saída | `[-5, 5]` m/s², 201 pts | strong_brake, brake, zero, accelerate, strong_accelerate |
//!
//! `rel_speed = velocidade do veículo da frente − nossa velocidade`:
//! negativo significa que estamos **fechando** a distância.
//!
//! ## Regras
//!
//! 19 regras, agrupadas por faixa de distância. `traffic` atua como
//! amortecedor: mesmo longe e abrindo distância, trânsito intenso limita a
//! saída a `accelerate` em vez de `strong_accelerate`.

use crate::core::{LinguisticVariable, MembershipFunction, Universe};
use crate::error::ConfigError;
use crate::inference::{Condition, FuzzySystem, SystemBuilder};

pub const DISTANCE: &str = "distance";
pub const REL_SPEED: &str = "rel_speed";
pub const TRAFFIC: &str = "traffic";
pub const ACCEL: &str = "accel";

/// `(mín, máx, amostras)`
pub const DISTANCE_RANGE: (f64, f64, usize) = (0.0, 120.0, 121);
pub const REL_SPEED_RANGE: (f64, f64, usize) = (-100.0, 100.0, 201);
pub const TRAFFIC_RANGE: (f64, f64, usize) = (0.0, 10.0, 101);
pub const ACCEL_RANGE: (f64, f64, usize) = (-5.0, 5.0, 201);

type TermTable = &'static [(&'static str, [f64; 3])];

const DISTANCE_TERMS: TermTable = &[
    ("very_close", [0.0, 0.0, 30.0]),
    ("close", [10.0, 30.0, 60.0]),
    ("medium", [40.0, 70.0, 100.0]),
    ("far", [80.0, 120.0, 120.0]),
];

const REL_SPEED_TERMS: TermTable = &[
    ("closing_fast", [-100.0, -100.0, -40.0]),
    ("closing", [-80.0, -40.0, 0.0]),
    ("stable", [-10.0, 0.0, 10.0]),
    ("opening", [0.0, 40.0, 80.0]),
    ("opening_fast", [40.0, 100.0, 100.0]),
];

const TRAFFIC_TERMS: TermTable = &[
    ("low", [0.0, 0.0, 3.0]),
    ("medium", [2.0, 5.0, 8.0]),
    ("high", [7.0, 10.0, 10.0]),
];

const ACCEL_TERMS: TermTable = &[
    ("strong_brake", [-5.0, -5.0, -2.5]),
    ("brake", [-4.0, -2.0, -0.5]),
    ("zero", [-1.0, 0.0, 1.0]),
    ("accelerate", [0.5, 2.0, 4.0]),
    ("strong_accelerate", [2.5, 5.0, 5.0]),
];

/// Cenários de demonstração: `(distance m, rel_speed km/h, traffic)`.
pub const EXAMPLE_SCENARIOS: [(f64, f64, f64); 5] = [
    (10.0, -50.0, 8.0),
    (25.0, -20.0, 5.0),
    (50.0, 0.0, 2.0),
    (90.0, 20.0, 1.0),
    (90.0, 20.0, 9.0),
];

fn d(term: &str) -> Condition {
    Condition::is(DISTANCE, term)
}

fn v(term: &str) -> Condition {
    Condition::is(REL_SPEED, term)
}

fn t(term: &str) -> Condition {
    Condition::is(TRAFFIC, term)
}

fn variable(
    make: fn(String, Universe) -> LinguisticVariable,
    name: &str,
    range: (f64, f64, usize),
    terms: TermTable,
) -> Result<LinguisticVariable, ConfigError> {
    let (min, max, samples) = range;
    let mut var = make(name.to_string(), Universe::linspace(min, max, samples)?);
    for (term, [a, b, c]) in terms {
        var.add_term(*term, MembershipFunction::triangular(*a, *b, *c)?)?;
    }
    Ok(var)
}

/// Base de regras de referência, na ordem em que foi escrita.
pub fn reference_rules() -> Vec<(Condition, &'static str)> {
    vec![
        // muito perto
        (d("very_close") & v("closing_fast"), "strong_brake"),
        (d("very_close") & v("closing"), "strong_brake"),
        (d("very_close"), "strong_brake"),
        // perto
        (d("close") & v("closing_fast"), "strong_brake"),
        (d("close") & v("closing") & t("high"), "strong_brake"),
        (d("close") & v("closing") & t("medium"), "brake"),
        (d("close") & v("stable") & t("high"), "brake"),
        (d("close") & v("stable") & t("low"), "zero"),
        // média distância
        (d("medium") & v("closing_fast"), "brake"),
        (d("medium") & v("closing"), "brake"),
        (d("medium") & v("stable") & t("low"), "accelerate"),
        (d("medium") & v("stable") & t("medium"), "zero"),
        (d("medium") & v("opening") & t("low"), "strong_accelerate"),
        (d("medium") & v("opening") & t("medium"), "accelerate"),
        (d("medium") & v("opening") & t("high"), "zero"),
        // longe
        (d("far") & v("opening") & t("low"), "strong_accelerate"),
        (d("far") & v("opening_fast") & t("low"), "strong_accelerate"),
        (d("far") & t("high"), "accelerate"),
        (d("far") & t("medium"), "accelerate"),
    ]
}

/// Builder com as variáveis e as 19 regras de referência, ainda não congelado.
pub fn reference_builder() -> Result<SystemBuilder, ConfigError> {
    let mut builder = SystemBuilder::new()
        .antecedent(variable(
            |n, u| LinguisticVariable::antecedent(n, u),
            DISTANCE,
            DISTANCE_RANGE,
            DISTANCE_TERMS,
        )?)
        .antecedent(variable(
            |n, u| LinguisticVariable::antecedent(n, u),
            REL_SPEED,
            REL_SPEED_RANGE,
            REL_SPEED_TERMS,
        )?)
        .antecedent(variable(
            |n, u| LinguisticVariable::antecedent(n, u),
            TRAFFIC,
            TRAFFIC_RANGE,
            TRAFFIC_TERMS,
        )?)
        .consequent(variable(
            |n, u| LinguisticVariable::consequent(n, u),
            ACCEL,
            ACCEL_RANGE,
            ACCEL_TERMS,
        )?);

    for (i, (condition, term)) in reference_rules().into_iter().enumerate() {
        builder = builder.labeled_rule(format!("R{}", i + 1), condition, term);
    }
    Ok(builder)
}

/// Sistema de referência pronto para uso.
pub fn reference_system() -> Result<FuzzySystem, ConfigError> {
    reference_builder()?.build()
}
