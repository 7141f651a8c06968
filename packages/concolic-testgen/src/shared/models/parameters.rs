//! Call parameters: receiver, arguments and static state

use serde::{Deserialize, Serialize};

/// Values feeding one call: `instance.method(arguments)` plus the static
/// fields it depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters<T> {
    pub instance: Option<T>,
    pub arguments: Vec<T>,
    pub statics: Vec<T>,
}

impl<T> Default for Parameters<T> {
    fn default() -> Self {
        Self {
            instance: None,
            arguments: Vec::new(),
            statics: Vec::new(),
        }
    }
}

impl<T> Parameters<T> {
    pub fn new(instance: Option<T>, arguments: Vec<T>) -> Self {
        Self {
            instance,
            arguments,
            statics: Vec::new(),
        }
    }

    pub fn with_statics(mut self, statics: Vec<T>) -> Self {
        self.statics = statics;
        self
    }

    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<Parameters<U>, E> {
        let instance = self.instance.as_ref().map(&mut f).transpose()?;
        let arguments = self.arguments.iter().map(&mut f).collect::<Result<Vec<_>, E>>()?;
        let statics = self.statics.iter().map(&mut f).collect::<Result<Vec<_>, E>>()?;
        Ok(Parameters {
            instance,
            arguments,
            statics,
        })
    }

    /// Instance first, then arguments, then statics
    pub fn as_list(&self) -> Vec<&T> {
        self.instance
            .iter()
            .chain(self.arguments.iter())
            .chain(self.statics.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_list_order() {
        let params = Parameters::new(Some(0), vec![1, 2]).with_statics(vec![3]);
        assert_eq!(params.as_list(), vec![&0, &1, &2, &3]);
    }

    #[test]
    fn test_try_map_short_circuits() {
        let params = Parameters::new(None, vec![1, -1, 2]);
        let mapped: Result<Parameters<u32>, String> =
            params.try_map(|v| u32::try_from(*v).map_err(|_| format!("negative {}", v)));
        assert_eq!(mapped.unwrap_err(), "negative -1");
    }
}
