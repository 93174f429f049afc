use chumsky::{extra::Err, prelude::*};
use std::collections::HashMap;
use thiserror::Error;

type ParseExtra<'a> = Err<Simple<'a, char>>;

/// Error while parsing a `KEY=VALUE` definition.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VarDefParseError {
    #[error("variable definition {0:?} is not of the form KEY=VALUE")]
    ParseFailed(String),
}

/// A single `KEY=VALUE` definition, as passed on the command line with
/// `-D p_inf=101325`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDef<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> VarDef<'a> {
    pub fn parse(source: &'a str) -> Result<Self, VarDefParseError> {
        definition()
            .parse(source)
            .into_result()
            .map_err(|_| VarDefParseError::ParseFailed(source.to_string()))
    }
}

fn definition<'a>() -> impl Parser<'a, &'a str, VarDef<'a>, ParseExtra<'a>> {
    let word = none_of("$=").repeated().at_least(1).to_slice();

    word.then_ignore(just('='))
        .then(word)
        .map(|(key, value)| VarDef { key, value })
}

/// Values available to `${name}` references.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VarDefs(HashMap<String, String>);

impl VarDefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition. Later definitions of a key win.
    pub fn insert(&mut self, def: VarDef) {
        self.0.insert(def.key.to_string(), def.value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Error while substituting variables into a config value.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("variable {0} is not defined")]
    Undefined(String),
    #[error("malformed variable reference in {0:?}")]
    Malformed(String),
    #[error("{value:?} is not a number: {source}")]
    NotANumber {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Resolves the `${name}` references of a config value.
pub trait Transform {
    type Output;

    fn transform(&self, vars: &VarDefs) -> Result<Self::Output, TransformError>;
}

/// Piece of a config string: literal text or a reference to a variable.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'src> {
    Text(&'src str),
    Var(&'src str),
}

fn segments<'a>() -> impl Parser<'a, &'a str, Vec<Segment<'a>>, ParseExtra<'a>> {
    let var = none_of('}')
        .repeated()
        .to_slice()
        .delimited_by(just("${"), just('}'))
        .map(Segment::Var);
    let text = none_of('$').repeated().at_least(1).to_slice().map(Segment::Text);

    var.or(text).repeated().collect::<Vec<_>>()
}

impl Transform for str {
    type Output = String;

    fn transform(&self, vars: &VarDefs) -> Result<String, TransformError> {
        let segments = segments()
            .parse(self)
            .into_result()
            .map_err(|_| TransformError::Malformed(self.to_string()))?;

        let mut result = String::with_capacity(self.len());

        for segment in segments {
            match segment {
                Segment::Text(text) => result.push_str(text),
                Segment::Var(key) => {
                    let value = vars
                        .get(key)
                        .ok_or_else(|| TransformError::Undefined(key.to_string()))?;
                    result.push_str(value);
                }
            }
        }

        Ok(result)
    }
}

impl Transform for String {
    type Output = String;

    fn transform(&self, vars: &VarDefs) -> Result<String, TransformError> {
        self.as_str().transform(vars)
    }
}

impl<T: Transform> Transform for Vec<T> {
    type Output = Vec<T::Output>;

    fn transform(&self, vars: &VarDefs) -> Result<Self::Output, TransformError> {
        self.iter().map(|item| item.transform(vars)).collect()
    }
}

impl<T: Transform> Transform for Option<T> {
    type Output = Option<T::Output>;

    fn transform(&self, vars: &VarDefs) -> Result<Self::Output, TransformError> {
        self.as_ref().map(|item| item.transform(vars)).transpose()
    }
}

/// A number in a run file, written either as a literal or as a string such as
/// `"${p_inf}"` that is substituted and then parsed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FloatVar {
    Inline(f64),
    Script(String),
}

impl FloatVar {
    pub fn resolve(&self, vars: &VarDefs) -> Result<f64, TransformError> {
        let script = match self {
            FloatVar::Inline(value) => return Ok(*value),
            FloatVar::Script(script) => script.transform(vars)?,
        };

        script
            .trim()
            .parse()
            .map_err(|source| TransformError::NotANumber {
                value: script.clone(),
                source,
            })
    }
}

impl From<f64> for FloatVar {
    fn from(value: f64) -> Self {
        Self::Inline(value)
    }
}

impl Transform for FloatVar {
    type Output = f64;

    fn transform(&self, vars: &VarDefs) -> Result<f64, TransformError> {
        self.resolve(vars)
    }
}
