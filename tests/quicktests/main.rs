use std::collections::BTreeMap;

use balanced_bst::ordered::{Balance, Tree};
use quickcheck::{Arbitrary, Gen};

mod avl;
mod ordered;
mod red_black;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the element into the tree
    Insert(T),
    /// Remove one copy of the element from the tree
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Applies a set of operations to a tree and a multiset of counts.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we hold the same elements as the multiset.
///
/// Returns `false` as soon as the tree stops being valid.
pub fn do_ops<T, B>(ops: &[Op<T>], tree: &mut Tree<T, B>, counts: &mut BTreeMap<T, usize>) -> bool
where
    T: Ord + Clone + std::fmt::Debug + std::fmt::Display,
    B: Balance,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                let removed = tree.delete(x);
                match counts.get_mut(x) {
                    Some(count) => {
                        if removed.as_ref() != Some(x) {
                            return false;
                        }
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(x);
                        }
                    }
                    None => {
                        if removed.is_some() {
                            return false;
                        }
                    }
                }
            }
        }
        if let Err(violation) = tree.validate() {
            eprintln!("{violation} after {op:?}\n{tree}");
            return false;
        }
    }

    true
}

/// Whether the tree's in-order elements are exactly the multiset's.
pub fn same_elements<T, B>(tree: &Tree<T, B>, counts: &BTreeMap<T, usize>) -> bool
where
    T: Ord + Clone,
    B: Balance,
{
    let expected = counts
        .iter()
        .flat_map(|(x, &count)| std::iter::repeat(x.clone()).take(count));
    tree.len() == counts.values().sum::<usize>() && tree.iter().cloned().eq(expected)
}
