//! Property-based invariants of the measure and arrange passes.
//!
//! 1. Containment: with every alignment stretched, each box lands inside the
//!    rectangle handed to the root.
//! 2. Idempotence: measuring twice without mutation gives the same size.
//! 3. Flow tiling: stretched siblings tile the destination without gaps.

use node_layout::{
    Constraint, ContainerId, LayoutTree, NodeId, NodeVariant, Rect, SharedBox, StaticBox,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Shape {
    Leaf(i32, i32),
    Flow(bool, Vec<Shape>),
    Fractions(Vec<((f64, f64, f64, f64), Shape)>),
    Cells(Vec<((i32, i32, i32, i32), Shape)>),
}

fn fraction_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (0.0f64..=0.9, 0.0f64..=0.9).prop_flat_map(|(x, y)| {
        (Just(x), Just(y), 0.0f64..=(1.0 - x), 0.0f64..=(1.0 - y))
    })
}

fn cell_strategy() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (0i32..4, 0i32..4, 1i32..3, 1i32..3)
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = (0i32..=200, 0i32..=120).prop_map(|(w, h)| Shape::Leaf(w, h));
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            (any::<bool>(), proptest::collection::vec(inner.clone(), 1..5))
                .prop_map(|(horizontal, children)| Shape::Flow(horizontal, children)),
            proptest::collection::vec((fraction_strategy(), inner.clone()), 1..4)
                .prop_map(Shape::Fractions),
            proptest::collection::vec((cell_strategy(), inner), 1..5).prop_map(Shape::Cells),
        ]
    })
}

fn area_strategy() -> impl Strategy<Value = Rect> {
    (-50i32..=50, -50i32..=50, 0i32..=800, 0i32..=600)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn build(tree: &mut LayoutTree, shape: &Shape, boxes: &mut Vec<SharedBox>) -> NodeId {
    let container = match shape {
        Shape::Leaf(..) => tree.create("wrap", NodeVariant::Horizontal),
        Shape::Flow(true, _) => tree.create("row", NodeVariant::Horizontal),
        Shape::Flow(false, _) => tree.create("column", NodeVariant::Vertical),
        Shape::Fractions(_) => tree.create("rect", NodeVariant::Rect),
        Shape::Cells(_) => tree.create("grid", NodeVariant::Grid),
    };
    let children: Vec<(Option<Constraint>, &Shape)> = match shape {
        Shape::Leaf(..) => vec![(None, shape)],
        Shape::Flow(_, children) => children.iter().map(|c| (None, c)).collect(),
        Shape::Fractions(children) => children
            .iter()
            .map(|((x, y, w, h), c)| (Some(Constraint::fraction(*x, *y, *w, *h)), c))
            .collect(),
        Shape::Cells(children) => children
            .iter()
            .map(|((x, y, w, h), c)| (Some(Constraint::cell(*x, *y, *w, *h)), c))
            .collect(),
    };
    for (constraint, child) in children {
        match child {
            Shape::Leaf(w, h) => {
                let handle: SharedBox = StaticBox::new(*w, *h)
                    .in_container(ContainerId(1))
                    .shared();
                tree.attach_box(container, handle.clone(), constraint)
                    .unwrap();
                boxes.push(handle);
            }
            nested => {
                let id = build(tree, nested, boxes);
                tree.add(container, id, constraint).unwrap();
            }
        }
    }
    container
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stretched_boxes_stay_inside_destination(
        shape in shape_strategy(),
        area in area_strategy(),
    ) {
        let mut tree = LayoutTree::new();
        let mut boxes = Vec::new();
        let root = build(&mut tree, &shape, &mut boxes);
        tree.layout(root, area);

        for handle in &boxes {
            let placed = handle.borrow().bounds();
            prop_assert!(
                area.contains_rect(&placed),
                "{:?} escapes {:?}",
                placed,
                area
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn measuring_is_idempotent(shape in shape_strategy()) {
        let mut tree = LayoutTree::new();
        let mut boxes = Vec::new();
        let root = build(&mut tree, &shape, &mut boxes);

        let first = tree.preferred_size(root);
        let second = tree.preferred_size(root);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arrange_does_not_change_measurement(
        shape in shape_strategy(),
        area in area_strategy(),
    ) {
        let mut tree = LayoutTree::new();
        let mut boxes = Vec::new();
        let root = build(&mut tree, &shape, &mut boxes);

        let before = tree.preferred_size(root);
        tree.layout(root, area);
        prop_assert_eq!(tree.preferred_size(root), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Flow tiling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stretched_row_tiles_exactly(
        widths in proptest::collection::vec(1i32..=300, 1..8),
        width in 0i32..=1000,
    ) {
        let mut tree = LayoutTree::new();
        let row = tree.create("row", NodeVariant::Horizontal);
        let mut boxes = Vec::new();
        for w in &widths {
            let handle: SharedBox = StaticBox::new(*w, 5)
                .in_container(ContainerId(1))
                .shared();
            tree.attach_box(row, handle.clone(), None).unwrap();
            boxes.push(handle);
        }
        tree.layout(row, Rect::new(0, 0, width, 5));

        let placed: Vec<Rect> = boxes.iter().map(|b| b.borrow().bounds()).collect();
        prop_assert_eq!(placed[0].x, 0);
        for pair in placed.windows(2) {
            prop_assert_eq!(pair[0].right(), pair[1].x);
        }
        prop_assert_eq!(placed[placed.len() - 1].right(), width);
    }
}
