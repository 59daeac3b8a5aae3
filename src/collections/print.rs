use std::fmt::Debug;

use super::node::{Link, Node};

type Frame<'a, K, V> = (Option<&'a Node<K, V>>, String, bool);

/// Draws the tree with box characters, left child first, `∅` standing in for an
/// absent sibling. Each node shows its key, value and cached height.
pub(crate) fn render<K: Debug, V: Debug>(root: &Link<K, V>) -> String {
    let Some(root) = root.as_deref() else {
        return "∅".to_string();
    };

    let mut out = label(root);
    let mut stack: Vec<Frame<'_, K, V>> = Vec::new();
    push_children(&mut stack, root, String::new());

    while let Some((node, tab, is_last)) = stack.pop() {
        out.push('\n');
        out.push_str(&tab);
        out.push_str(if is_last { "└─ " } else { "├─ " });

        match node {
            None => out.push('∅'),
            Some(node) => {
                out.push_str(&label(node));
                let child_tab = format!("{tab}{}", if is_last { "   " } else { "│  " });
                push_children(&mut stack, node, child_tab);
            }
        }
    }

    out
}

fn label<K: Debug, V: Debug>(node: &Node<K, V>) -> String {
    format!("{:?} = {:?} [h={}]", node.key, node.value, node.height)
}

fn push_children<'a, K, V>(stack: &mut Vec<Frame<'a, K, V>>, node: &'a Node<K, V>, tab: String) {
    if node.left.is_none() && node.right.is_none() {
        return;
    }

    // Popped in reverse, so the right child goes in first.
    stack.push((node.right.as_deref(), tab.clone(), true));
    stack.push((node.left.as_deref(), tab, false));
}
