//! Synthesized sample values and the ordered parameter -> value mapping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A value that can be written into generated Python source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SampleValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<SampleValue>),
}

impl SampleValue {
    /// Python literal for this value, following `repr` conventions.
    #[must_use]
    pub fn to_python(&self) -> String {
        match self {
            Self::None => "None".to_string(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => python_float(*v),
            Self::Str(s) => python_str(s),
            Self::List(items) => {
                let inner: Vec<String> = items.iter().map(Self::to_python).collect();
                format!("[{}]", inner.join(", "))
            }
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl std::fmt::Display for SampleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_python())
    }
}

fn python_float(v: f64) -> String {
    if v.is_nan() {
        "float('nan')".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "float('inf')".to_string()
        } else {
            "float('-inf')".to_string()
        }
    } else if v.fract() == 0.0 {
        // Python always prints a fractional part for floats.
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn python_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// One parameter bound to a sample value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Binding {
    pub parameter: String,
    pub value: SampleValue,
}

/// Parameter -> value mapping that keeps parameter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TestData(Vec<Binding>);

impl TestData {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Bind `parameter`, replacing an earlier binding of the same name in place.
    pub fn insert(&mut self, parameter: impl Into<String>, value: SampleValue) {
        let parameter = parameter.into();
        if let Some(existing) = self.0.iter_mut().find(|b| b.parameter == parameter) {
            existing.value = value;
        } else {
            self.0.push(Binding { parameter, value });
        }
    }

    #[must_use]
    pub fn get(&self, parameter: &str) -> Option<&SampleValue> {
        self.0
            .iter()
            .find(|b| b.parameter == parameter)
            .map(|b| &b.value)
    }

    #[must_use]
    pub fn contains(&self, parameter: &str) -> bool {
        self.get(parameter).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.0.iter()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|b| b.parameter.as_str())
    }

    /// `a=1, b='x'` for use inside a call expression.
    #[must_use]
    pub fn keyword_arguments(&self) -> String {
        self.0
            .iter()
            .map(|b| format!("{}={}", b.parameter, b.value.to_python()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<(String, SampleValue)> for TestData {
    fn from_iter<T: IntoIterator<Item = (String, SampleValue)>>(iter: T) -> Self {
        let mut data = Self::new();
        for (parameter, value) in iter {
            data.insert(parameter, value);
        }
        data
    }
}
