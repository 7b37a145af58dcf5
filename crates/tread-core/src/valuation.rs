//! State valuations: the program-variable assignment of each state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::id::StateId;

/// A program variable declared by the model description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name as it appears in the model description.
    pub name: String,
}

impl Variable {
    /// Declare a variable called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The value of one variable at one state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ValuationValue {
    /// A boolean variable.
    Bool(bool),
    /// A bounded integer variable.
    Int(i64),
    /// A real-valued (rational) variable.
    Real(f64),
}

impl From<ValuationValue> for Value {
    fn from(v: ValuationValue) -> Self {
        match v {
            ValuationValue::Bool(b) => Value::Bool(b),
            ValuationValue::Int(i) => Value::from(i),
            ValuationValue::Real(r) => Value::from(r),
        }
    }
}

/// A state valuation had the wrong number of values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("valuation has {got} values but {expected} variables are declared")]
pub struct ArityMismatch {
    /// Number of declared variables.
    pub expected: usize,
    /// Number of values supplied.
    pub got: usize,
}

/// Variable valuations for every state of a model, row per state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateValuations {
    variables: Vec<Variable>,
    rows: Vec<Vec<ValuationValue>>,
}

impl StateValuations {
    /// Valuations over `variables`, with no states yet.
    pub fn new(variables: Vec<Variable>) -> Self {
        Self {
            variables,
            rows: Vec::new(),
        }
    }

    /// Append the valuation of the next state.
    ///
    /// States are numbered in the order they are added.
    pub fn add_state(&mut self, values: Vec<ValuationValue>) -> Result<StateId, ArityMismatch> {
        if values.len() != self.variables.len() {
            return Err(ArityMismatch {
                expected: self.variables.len(),
                got: values.len(),
            });
        }
        self.rows.push(values);
        Ok(StateId(self.rows.len() - 1))
    }

    /// The declared variables.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of states with a valuation.
    pub fn nr_states(&self) -> usize {
        self.rows.len()
    }

    /// Raw values of `state`, in variable declaration order.
    pub fn values(&self, state: StateId) -> Option<&[ValuationValue]> {
        self.rows.get(state.0).map(Vec::as_slice)
    }

    /// Value of the variable `name` at `state`.
    pub fn value(&self, state: StateId, name: &str) -> Option<ValuationValue> {
        let col = self.variables.iter().position(|v| v.name == name)?;
        self.rows.get(state.0).map(|row| row[col])
    }

    /// JSON record `{ variable: value, .. }` for `state`.
    pub fn json(&self, state: StateId) -> Option<Value> {
        let row = self.rows.get(state.0)?;
        let map: Map<String, Value> = self
            .variables
            .iter()
            .zip(row)
            .map(|(var, val)| (var.name.clone(), Value::from(*val)))
            .collect();
        Some(Value::Object(map))
    }
}
