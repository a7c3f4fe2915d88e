/// Ordered collection of effect parameters with by-name lookup
///
/// Used both for an effect's top-level parameters and for the member
/// list of a Struct-class parameter.

use rustc_hash::FxHashMap;

use crate::effect::parameter::EffectParameter;
use crate::error::Result;
use crate::nova_bail;

const SOURCE: &str = "nova::EffectParameterCollection";

/// Ordered, name-indexed parameter set
#[derive(Default)]
pub struct EffectParameterCollection {
    parameters: Vec<EffectParameter>,
    names: FxHashMap<String, usize>,
}

impl EffectParameterCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a parameter list
    ///
    /// Fails on duplicate parameter names.
    pub fn from_parameters(parameters: Vec<EffectParameter>) -> Result<Self> {
        let mut names = FxHashMap::default();
        for (index, parameter) in parameters.iter().enumerate() {
            if names.insert(parameter.name().to_string(), index).is_some() {
                nova_bail!(SOURCE, "Duplicate parameter name '{}'", parameter.name());
            }
        }
        Ok(Self { parameters, names })
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// True when the collection holds no parameters
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameter at `index`
    pub fn get(&self, index: usize) -> Option<&EffectParameter> {
        self.parameters.get(index)
    }

    /// Mutable parameter at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut EffectParameter> {
        self.parameters.get_mut(index)
    }

    /// Parameter by name
    pub fn by_name(&self, name: &str) -> Option<&EffectParameter> {
        self.names.get(name).and_then(|&i| self.parameters.get(i))
    }

    /// Mutable parameter by name
    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut EffectParameter> {
        match self.names.get(name) {
            Some(&i) => self.parameters.get_mut(i),
            None => None,
        }
    }

    /// Index of a named parameter
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Iterate parameters in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &EffectParameter> {
        self.parameters.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "parameter_collection_tests.rs"]
mod tests;
