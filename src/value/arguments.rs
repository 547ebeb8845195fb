//! Call arguments assembled from a value's shape.

use indexmap::IndexMap;

use super::{Shape, Value};

/// Positional and keyword arguments handed to a `run_with` target.
///
/// Built from a [`Value`] by [`Arguments::spread`]:
///
/// | Shape of the input | Arguments |
/// |---|---|
/// | `Mapping` | one keyword argument per entry |
/// | `Sequence` | one positional argument per item |
/// | `Text`, `Scalar` | the value itself as the only positional argument |
///
/// # Examples
///
/// ```rust
/// use pipette::value;
/// use pipette::value::{Arguments, Value};
///
/// let arguments = Arguments::spread(value![1, 10, 2]);
/// assert_eq!(arguments.positional(), &[Value::Int(1), Value::Int(10), Value::Int(2)]);
/// assert!(arguments.keyword().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl Arguments {
    /// Spreads a value into call arguments according to its shape.
    pub fn spread(value: Value) -> Self {
        match value {
            Value::Mapping(keyword) => Self {
                positional: Vec::new(),
                keyword,
            },
            Value::Sequence(positional) => Self {
                positional,
                keyword: IndexMap::new(),
            },
            atom => {
                debug_assert!(matches!(atom.shape(), Shape::Text | Shape::Scalar));
                Self {
                    positional: vec![atom],
                    keyword: IndexMap::new(),
                }
            }
        }
    }

    /// The positional arguments in order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// The keyword arguments in insertion order.
    pub const fn keyword(&self) -> &IndexMap<String, Value> {
        &self.keyword
    }

    /// The positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// The keyword argument called `name`.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Number of positional plus keyword arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Returns `true` when there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
