//! Red-black repair after insertion.

use super::handle::Handle;
use super::node::Color;
use super::raw_rb_tree::RawRBTree;

impl<T> RawRBTree<T> {
    /// Restores the red-black invariants after `node` was linked as a red leaf.
    ///
    /// Walks upward from `node` while a red-uncle recoloring pushes the violation towards the
    /// root; a same-side or zig-zag configuration is settled with at most two rotations and ends
    /// the walk.
    pub(crate) fn repair_after_insert(&mut self, mut node: Handle) {
        loop {
            let Some(parent) = self.node(node).parent() else {
                tracing::trace!("rbtree repair: root fix");
                self.node_mut(node).set_color(Color::Black);
                break;
            };

            if self.node(parent).is_black() {
                break;
            }

            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.node(parent).parent() else {
                break;
            };

            let parent_side = self.side_of(grandparent, parent);
            let uncle = self.node(grandparent).child(parent_side.opposite());

            // Case 1: red uncle. Recolor and continue from the grandparent.
            if let Some(uncle) = uncle.filter(|&uncle| self.node(uncle).is_red()) {
                tracing::trace!("rbtree repair: red uncle");
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(uncle).set_color(Color::Black);
                self.node_mut(grandparent).set_color(Color::Red);
                node = grandparent;
                continue;
            }

            if self.side_of(parent, node) == parent_side {
                // Case 2: node and parent lean the same way.
                tracing::trace!("rbtree repair: same side rotation");
                self.rotate(parent, grandparent);
                self.swap_colors(parent, grandparent);
            } else {
                // Case 3: zig-zag. Align node with its parent, then settle as in case 2.
                tracing::trace!("rbtree repair: zig-zag rotation");
                self.rotate(node, parent);
                self.rotate(node, grandparent);
                self.swap_colors(node, grandparent);
            }
            break;
        }

        if let Some(root) = self.root() {
            self.node_mut(root).set_color(Color::Black);
        }
    }

    fn swap_colors(&mut self, a: Handle, b: Handle) {
        let color_a = self.node(a).color();
        let color_b = self.node(b).color();
        self.node_mut(a).set_color(color_b);
        self.node_mut(b).set_color(color_a);
    }
}
