use crate::modifiers::ModifierSet;
use crate::target::TargetType;
use cf_core::types::{Generic, TypeDescription};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A field of a type under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldToken {
    pub name: String,
    pub field_type: Generic,
    pub modifiers: ModifierSet,
}

impl FieldToken {
    pub fn new(name: impl Into<String>, field_type: Generic, modifiers: ModifierSet) -> Self {
        Self {
            name: name.into(),
            field_type,
            modifiers,
        }
    }

    pub fn resolve(&self, actual: &TypeDescription) -> FieldToken {
        FieldToken {
            name: self.name.clone(),
            field_type: TargetType::resolve(&self.field_type, actual),
            modifiers: self.modifiers,
        }
    }
}

/// A method of a type under construction. Bodies are supplied by the emission
/// stage, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodToken {
    pub name: String,
    pub return_type: Generic,
    pub parameter_types: Vec<Generic>,
    pub modifiers: ModifierSet,
}

impl MethodToken {
    pub fn new(
        name: impl Into<String>,
        return_type: Generic,
        parameter_types: Vec<Generic>,
        modifiers: ModifierSet,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameter_types,
            modifiers,
        }
    }

    /// Same name and parameter types. Return types do not distinguish methods.
    pub fn has_signature_of(&self, other: &MethodToken) -> bool {
        self.name == other.name && self.parameter_types == other.parameter_types
    }

    pub fn resolve(&self, actual: &TypeDescription) -> MethodToken {
        MethodToken {
            name: self.name.clone(),
            return_type: TargetType::resolve(&self.return_type, actual),
            parameter_types: self
                .parameter_types
                .iter()
                .map(|parameter| TargetType::resolve(parameter, actual))
                .collect(),
            modifiers: self.modifiers,
        }
    }
}

impl fmt::Display for MethodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({})",
            self.return_type,
            self.name,
            self.parameter_types.iter().join(", ")
        )
    }
}

struct Node<T> {
    value: T,
    previous: Option<Arc<Node<T>>>,
}

/// Append-only list sharing its prefix with every list it was derived from.
///
/// [`TokenList::push`] returns a new list in constant time; the receiver is
/// unchanged and both lists share all earlier nodes.
pub struct TokenList<T> {
    last: Option<Arc<Node<T>>>,
    len: usize,
}

impl<T> TokenList<T> {
    pub fn new() -> Self {
        Self { last: None, len: 0 }
    }

    pub fn push(&self, value: T) -> Self {
        Self {
            last: Some(Arc::new(Node {
                value,
                previous: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Newest first.
    fn newest(&self) -> impl Iterator<Item = &T> {
        std::iter::successors(self.last.as_deref(), |node| node.previous.as_deref())
            .map(|node| &node.value)
    }

    /// Insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut values = self.newest().collect::<Vec<_>>();
        values.reverse();
        values.into_iter()
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.newest().find(|value| predicate(value))
    }

    /// Whether both lists end in the same node.
    pub fn shares_tail_with(&self, other: &TokenList<T>) -> bool {
        match (&self.last, &other.last) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for TokenList<T> {
    fn clone(&self) -> Self {
        Self {
            last: self.last.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for TokenList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TokenList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for TokenList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TokenList::new(), |list, value| list.push(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pushes_do_not_touch_the_receiver() {
        let base = TokenList::new().push(1).push(2);
        let left = base.push(3);
        let right = base.push(4);
        assert_eq!(base.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(right.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert!(!left.shares_tail_with(&right));
        assert!(base.clone().shares_tail_with(&base));
    }

    #[test]
    fn find_prefers_the_newest_match() {
        let list: TokenList<(char, u8)> = [('a', 1), ('b', 2), ('a', 3)].into_iter().collect();
        assert_eq!(list.find(|(key, _)| *key == 'a'), Some(&('a', 3)));
        assert_eq!(list.find(|(key, _)| *key == 'z'), None);
        assert_eq!(list.len(), 3);
    }
}
