// ============================================================================
// Working Stack
// LIFO sequence owned by a single evaluation
// ============================================================================

use super::stack_item::StackItem;
use crate::numeric::Number;
use smallvec::SmallVec;

/// Operands popped in one go; most operations take four or fewer.
pub type Popped = SmallVec<[StackItem; 4]>;

/// Mutable LIFO of [`StackItem`]s. The last element of `items` is the top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    items: Vec<StackItem>,
}

impl Stack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, item: impl Into<StackItem>) {
        self.items.push(item.into());
    }

    #[inline]
    pub fn pop(&mut self) -> Option<StackItem> {
        self.items.pop()
    }

    /// Remove the top `count` items and return them in push order, so the
    /// first element is the deepest one removed.
    ///
    /// Returns `None` and leaves the stack untouched if it holds fewer than
    /// `count` items.
    pub fn pop_n(&mut self, count: usize) -> Option<Popped> {
        if self.items.len() < count {
            return None;
        }
        let start = self.items.len() - count;
        Some(self.items.drain(start..).collect())
    }

    #[inline]
    pub fn top(&self) -> Option<&StackItem> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StackItem> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_vec(self) -> Vec<StackItem> {
        self.items
    }

    /// The sole number of a one-item stack.
    pub fn single_number(&self) -> Option<Number> {
        match self.items.as_slice() {
            [StackItem::Number(n)] => Some(*n),
            _ => None,
        }
    }
}

impl From<Vec<StackItem>> for Stack {
    fn from(items: Vec<StackItem>) -> Self {
        Self { items }
    }
}

impl FromIterator<StackItem> for Stack {
    fn from_iter<I: IntoIterator<Item = StackItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Stack {
    type Item = StackItem;
    type IntoIter = std::vec::IntoIter<StackItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a StackItem;
    type IntoIter = std::slice::Iter<'a, StackItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalcError;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = Stack::new();
        stack.push(Number::from(1));
        stack.push(Number::from(2));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top(), Some(&StackItem::number(2)));
        assert_eq!(stack.pop(), Some(StackItem::number(2)));
        assert_eq!(stack.pop(), Some(StackItem::number(1)));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_n_returns_push_order() {
        let mut stack: Stack = (1..=4).map(StackItem::number).collect();

        let popped = stack.pop_n(3).unwrap();
        assert_eq!(
            popped.as_slice(),
            &[StackItem::number(2), StackItem::number(3), StackItem::number(4)]
        );
        assert_eq!(stack.items(), &[StackItem::number(1)]);
    }

    #[test]
    fn test_pop_n_insufficient_leaves_stack() {
        let mut stack: Stack = vec![StackItem::number(1)].into();
        assert!(stack.pop_n(2).is_none());
        assert_eq!(stack.len(), 1);

        assert_eq!(stack.pop_n(0).map(|p| p.len()), Some(0));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_single_number() {
        let single: Stack = vec![StackItem::number(7)].into();
        assert_eq!(single.single_number(), Some(Number::from(7)));

        let two: Stack = vec![StackItem::number(7), StackItem::number(8)].into();
        assert_eq!(two.single_number(), None);

        let err: Stack = vec![StackItem::error(CalcError::custom("x"))].into();
        assert_eq!(err.single_number(), None);
    }
}
