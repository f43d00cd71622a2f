use balanced_bst::ordered::OrderedTree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, HashSet};

use crate::{do_ops, same_elements, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts) && same_elements(&tree, &counts)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|v| v.element()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn rotations_keep_elements(xs: Vec<i8>, picks: Vec<(u8, bool)>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let before: Vec<_> = tree.iter().copied().collect();

    for (pick, left) in picks {
        let Some(&element) = xs.get(pick as usize % xs.len().max(1)) else {
            break;
        };
        let id = tree.search(&element).unwrap().id();
        let rotated = if left {
            tree.rotate_left(id)
        } else {
            tree.rotate_right(id)
        };
        if rotated.is_err() || tree.validate().is_err() {
            return false;
        }
    }

    tree.iter().copied().collect::<Vec<_>>() == before
}
