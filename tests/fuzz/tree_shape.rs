use bolero::check;
use gpkernel::{Node, NodeKind, Tree};

/// Builds a random tree from a byte stream: each byte either pushes a
/// `Constant` leaf or folds the top few completed subtrees on a work stack
/// into a variadic `Add` node, mirroring how a reverse-postorder builder
/// assembles this crate's tree encoding one node at a time. Returns the node
/// array alongside each node's expected children in the exact order
/// `Tree::children_of` is expected to yield them (right to left).
fn build_random_tree(input: &[u8]) -> (Vec<Node>, Vec<Vec<usize>>) {
    let mut nodes: Vec<Node> = Vec::new();
    let mut expected_children: Vec<Vec<usize>> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    fn push_leaf(nodes: &mut Vec<Node>, expected: &mut Vec<Vec<usize>>) -> usize {
        nodes.push(Node::constant(1.0));
        expected.push(Vec::new());
        nodes.len() - 1
    }

    for &byte in input.iter().take(64) {
        let fold_width = usize::from(byte % 4) + 2;
        if stack.len() >= fold_width {
            let mut children = Vec::with_capacity(fold_width);
            for _ in 0..fold_width {
                children.push(stack.pop().unwrap());
            }
            let length: u16 = children.iter().map(|&c| nodes[c].length + 1).sum();
            let arity = u16::try_from(children.len()).unwrap();
            nodes.push(Node::operator(NodeKind::Add, arity, length));
            expected_children.push(children);
            stack.push(nodes.len() - 1);
        } else {
            let leaf = push_leaf(&mut nodes, &mut expected_children);
            stack.push(leaf);
        }
    }

    if stack.is_empty() {
        let leaf = push_leaf(&mut nodes, &mut expected_children);
        stack.push(leaf);
    }

    while stack.len() > 1 {
        let right = stack.pop().unwrap();
        let left = stack.pop().unwrap();
        let length = nodes[right].length + 1 + nodes[left].length + 1;
        nodes.push(Node::operator(NodeKind::Add, 2, length));
        expected_children.push(vec![right, left]);
        stack.push(nodes.len() - 1);
    }

    (nodes, expected_children)
}

#[test]
fn random_trees_validate_and_round_trip_children() {
    check!().with_type::<Vec<u8>>().for_each(|input| {
        let (nodes, expected_children) = build_random_tree(input);
        let tree = Tree::new(nodes).expect("builder must only emit structurally valid trees");

        for (index, expected) in expected_children.iter().enumerate() {
            let actual: Vec<usize> = tree.children_of(index).collect();
            assert_eq!(&actual, expected, "node {index} children mismatch");
        }

        assert_eq!(tree.root_index(), tree.len() - 1);
        assert_eq!(*tree.subtree_range(tree.root_index()).start(), 0);
    });
}
