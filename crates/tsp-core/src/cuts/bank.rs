//! Reference-counted interning of cut components against one saved tour.

use std::{
    collections::HashMap,
    hash::Hash,
    rc::Rc,
};

use crate::instance::node::Node;

/// Interns values of type `T` (a [`crate::cuts::clique::Clique`] or
/// [`crate::cuts::tooth::Tooth`]) against a fixed saved tour. Two cuts that reference the
/// same clique share one allocation; the bank evicts an entry once its use-count returns
/// to zero.
#[derive(Debug)]
pub struct Bank<T> {
    tour: Vec<Node>,
    perm: Vec<usize>,
    entries: HashMap<T, (Rc<T>, usize)>,
}

impl<T: Eq + Hash + Clone> Bank<T> {
    pub fn new(tour: Vec<Node>) -> Self {
        let mut perm = vec![0usize; tour.len()];
        for (i, node) in tour.iter().enumerate() {
            perm[node.0] = i;
        }
        Self {
            tour,
            perm,
            entries: HashMap::new(),
        }
    }

    pub fn tour(&self) -> &[Node] {
        &self.tour
    }

    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Interns `value`, bumping its refcount, and returns a shared handle.
    pub fn intern(&mut self, value: T) -> Rc<T> {
        match self.entries.get_mut(&value) {
            Some((rc, count)) => {
                *count += 1;
                Rc::clone(rc)
            }
            None => {
                let rc = Rc::new(value.clone());
                self.entries.insert(value, (Rc::clone(&rc), 1));
                rc
            }
        }
    }

    /// Releases one use of `value`, evicting it once the use-count hits zero.
    pub fn release(&mut self, value: &T) {
        if let Some((_, count)) = self.entries.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.entries.remove(value);
            }
        }
    }

    pub fn use_count(&self, value: &T) -> usize {
        self.entries.get(value).map_or(0, |(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::clique::Clique;

    #[test]
    fn interning_shares_and_evicts() {
        let mut bank: Bank<Clique> = Bank::new(vec![Node(0), Node(1), Node(2)]);
        let a = Clique::from_positions(vec![0, 1]);
        let rc1 = bank.intern(a.clone());
        let rc2 = bank.intern(a.clone());
        assert!(Rc::ptr_eq(&rc1, &rc2));
        assert_eq!(bank.use_count(&a), 2);
        bank.release(&a);
        assert_eq!(bank.use_count(&a), 1);
        bank.release(&a);
        assert_eq!(bank.use_count(&a), 0);
        assert!(bank.is_empty());
    }
}
