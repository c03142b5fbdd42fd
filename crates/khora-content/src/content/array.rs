// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::Content;
use crate::descriptor::TypeDescriptor;
use crate::error::{ContentError, Result, WriterError};
use crate::registry::ContentRegistry;
use crate::value::{ArrayValue, Value};

/// A multi-dimensional array stored in row-major order.
///
/// # Example
///
/// ```rust
/// use khora_content::ContentArray;
///
/// let grid = ContentArray::new(vec![2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(grid.get(&[1, 0]), Some(&4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentArray<T> {
    dims: Vec<usize>,
    items: Vec<T>,
}

impl<T> ContentArray<T> {
    /// Creates an array of the given shape. `items` must fill it exactly.
    pub fn new(dims: Vec<usize>, items: Vec<T>) -> Result<Self> {
        let expected = dims
            .iter()
            .try_fold(1usize, |total, dim| total.checked_mul(*dim));
        if dims.is_empty() || expected != Some(items.len()) {
            return Err(WriterError::ShapeMismatch {
                dims,
                len: items.len(),
            }
            .into());
        }
        Ok(Self { dims, items })
    }

    /// Creates a two-dimensional array from equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let dims = vec![rows.len(), columns];
        let mut items = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            if row.len() != columns {
                return Err(WriterError::ShapeMismatch {
                    dims,
                    len: row.len(),
                }
                .into());
            }
            items.extend(row);
        }
        Self::new(dims, items)
    }

    /// The size of each dimension, outermost first.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// All items in row-major order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The item at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut offset = 0;
        for (position, dim) in index.iter().zip(&self.dims) {
            if position >= dim {
                return None;
            }
            offset = offset * dim + position;
        }
        self.items.get(offset)
    }

    /// Consumes the array, returning its items in row-major order.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Content> Content for ContentArray<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn to_value(&self, registry: &ContentRegistry) -> Result<Value> {
        let items = self
            .items
            .iter()
            .map(|item| item.to_value(registry))
            .collect::<Result<_>>()?;
        ArrayValue::new(self.dims.clone(), items).map(Value::Array)
    }

    fn from_value(value: Value, registry: &ContentRegistry) -> Result<Self> {
        match value {
            Value::Array(array) => {
                array.check_shape()?;
                let items = array
                    .items
                    .into_iter()
                    .map(|item| T::from_value(item, registry))
                    .collect::<Result<_>>()?;
                Ok(Self {
                    dims: array.dims,
                    items,
                })
            }
            other => Err(ContentError::mismatch("an array", other.kind_name())),
        }
    }
}

impl<T: Content, const N: usize> Content for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn to_value(&self, registry: &ContentRegistry) -> Result<Value> {
        let items = self
            .iter()
            .map(|item| item.to_value(registry))
            .collect::<Result<_>>()?;
        Ok(Value::Array(ArrayValue {
            dims: vec![N],
            items,
        }))
    }

    fn from_value(value: Value, registry: &ContentRegistry) -> Result<Self> {
        let array = match value {
            Value::Array(array) if array.dims == [N] => array,
            Value::Array(array) => {
                return Err(ContentError::mismatch(
                    format!("an array of shape [{N}]"),
                    format!("an array of shape {:?}", array.dims),
                ))
            }
            other => return Err(ContentError::mismatch("an array", other.kind_name())),
        };
        let items = array
            .items
            .into_iter()
            .map(|item| T::from_value(item, registry))
            .collect::<Result<Vec<T>>>()?;
        let len = items.len();
        items.try_into().map_err(|_| {
            ContentError::mismatch(format!("{N} items"), format!("{len} items"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_is_checked() {
        assert!(ContentArray::new(vec![2, 3], vec![0u8; 6]).is_ok());
        assert!(ContentArray::new(vec![2, 3], vec![0u8; 5]).is_err());
        assert!(ContentArray::<u8>::new(vec![], vec![]).is_err());
        assert!(ContentArray::from_rows(vec![vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn test_row_major_indexing() {
        let grid = ContentArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.dims(), [2, 3]);
        assert_eq!(grid.get(&[0, 2]), Some(&3));
        assert_eq!(grid.get(&[1, 1]), Some(&5));
        assert_eq!(grid.get(&[2, 0]), None);
        assert_eq!(grid.get(&[1]), None);
    }

    #[test]
    fn test_fixed_arrays_require_their_length() {
        let registry = ContentRegistry::empty();
        let value = [1.5f64, 2.5].to_value(&registry).unwrap();
        assert_eq!(<[f64; 2]>::from_value(value.clone(), &registry).unwrap(), [1.5, 2.5]);
        assert!(<[f64; 3]>::from_value(value, &registry).is_err());
    }
}
