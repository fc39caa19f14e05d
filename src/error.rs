//! # Erros — Taxonomia de Falhas do Sistema Fuzzy
//!
//! Dois momentos distintos podem falhar, e cada um tem seu próprio tipo:
//!
//! | Tipo | Quando | Efeito |
//! |------|--------|--------|
//! | [`ConfigError`] | Montagem da configuração (variáveis, termos, regras) | Aborta a montagem inteira: não existe base de regras parcial |
//! | [`RuntimeError`] | Uma chamada de avaliação | Aborta só aquela chamada: nenhum estado é corrompido |
//!
//! O caso "nenhuma regra disparou" **não** é erro: é devolvido como flag
//! (`no_rule_fired`) junto de um valor de fallback. Veja
//! [`Defuzzified`](crate::inference::Defuzzified).
//!
//! Para quem monta e avalia na mesma função existe [`FuzzyError`], que
//! unifica os dois via `?`.

use thiserror::Error;

/// Falha de construção da configuração (fatal para a montagem).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Pontos de controle fora de ordem (exige `a ≤ b ≤ c [≤ d]`) ou NaN.
    #[error("pontos de controle inválidos {points:?}: esperado ordem não-decrescente")]
    InvalidControlPoints { points: Vec<f64> },

    /// Termo repetido na mesma variável linguística.
    #[error("termo '{term}' já existe na variável '{variable}'")]
    DuplicateTermName { variable: String, term: String },

    /// Regra referencia variável ou termo que não existe.
    #[error("referência desconhecida: {variable}[{term}]")]
    UnknownTermRef { variable: String, term: String },

    /// Universo vazio, com menos de dois pontos, ou não estritamente crescente.
    #[error("universo inválido: {reason}")]
    InvalidUniverse { reason: String },

    /// Duas variáveis com o mesmo nome no sistema.
    #[error("variável '{0}' declarada mais de uma vez")]
    DuplicateVariableName(String),

    /// O sistema foi montado sem variável de saída.
    #[error("nenhuma variável consequente foi declarada")]
    MissingConsequent,

    /// Distribuição agregada com tamanho diferente do universo de saída.
    #[error("distribuição com {found} graus para um universo de {expected} pontos")]
    AggregateSizeMismatch { expected: usize, found: usize },

    /// Nova ordem de regras que não é uma permutação das regras atuais.
    #[error("ordem {order:?} não é uma permutação de {rules} regras")]
    InvalidRuleOrder { rules: usize, order: Vec<usize> },
}

/// Falha de uma chamada de avaliação.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Variável usada pela base de regras sem valor crisp correspondente.
    #[error("entrada ausente para a variável '{variable}'")]
    MissingInput { variable: String },
}

/// União dos dois tipos de erro para uso com `?`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_item() {
        let err = ConfigError::DuplicateTermName {
            variable: "distance".into(),
            term: "close".into(),
        };
        assert!(err.to_string().contains("close"));
        assert!(err.to_string().contains("distance"));

        let err = RuntimeError::MissingInput { variable: "traffic".into() };
        assert!(err.to_string().contains("traffic"));
    }

    #[test]
    fn fuzzy_error_wraps_both_kinds() {
        let cfg: FuzzyError = ConfigError::MissingConsequent.into();
        assert!(matches!(cfg, FuzzyError::Config(ConfigError::MissingConsequent)));

        let rt: FuzzyError = RuntimeError::MissingInput { variable: "x".into() }.into();
        assert_eq!(rt.to_string(), "entrada ausente para a variável 'x'");
    }
}
