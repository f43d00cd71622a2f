use balanced_bst::red_black::RedBlackTree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, HashSet};

use crate::{do_ops, same_elements, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = RedBlackTree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts) && same_elements(&tree, &counts)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: RedBlackTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|v| v.element()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: RedBlackTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: RedBlackTree<_> = xs.iter().copied().collect();
    let mut still_present = xs;
    for delete in &deletes {
        let removed = tree.delete(delete);
        // Each delete removes at most one copy.
        match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                if removed != Some(*delete) {
                    return false;
                }
            }
            None => {
                if removed.is_some() {
                    return false;
                }
            }
        }
    }

    tree.validate().is_ok()
        && tree.len() == still_present.len()
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn height_stays_logarithmic(xs: Vec<u16>) -> bool {
    let tree: RedBlackTree<_> = xs.into_iter().collect();
    let bound = 2.0 * ((tree.len() + 1) as f64).log2();

    (tree.height() as f64) <= bound
}
