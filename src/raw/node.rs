use super::handle::Handle;

/// The one-bit color tag maintained by the balance enforcer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A red-black tree node.
///
/// Children are owned through the arena; `parent` is a plain back-reference, so the graph has no
/// ownership cycle even though every edge can be walked in both directions.
pub(crate) struct Node<T> {
    value: T,
    color: Color,
    parent: Option<Handle>,
    // [left, right], indexed by `Side`.
    children: [Option<Handle>; 2],
}

impl<T> Node<T> {
    /// Creates a detached red node. Every insertion starts from red.
    pub(crate) const fn new_red(value: T, parent: Option<Handle>) -> Self {
        Self {
            value,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) const fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    #[inline]
    pub(crate) const fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        self.children[side as usize]
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side as usize] = child;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.child(Side::Left)
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.child(Side::Right)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_red_and_detached() {
        let node = Node::new_red(5, None);
        assert_eq!(*node.value(), 5);
        assert!(node.is_red());
        assert!(!node.is_black());
        assert_eq!(node.parent(), None);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
    }

    #[test]
    fn children_are_addressed_by_side() {
        let mut node = Node::new_red('x', Some(Handle::from_index(0)));
        node.set_child(Side::Left, Some(Handle::from_index(1)));
        node.set_child(Side::Right, Some(Handle::from_index(2)));
        assert_eq!(node.left(), Some(Handle::from_index(1)));
        assert_eq!(node.right(), Some(Handle::from_index(2)));
        assert_eq!(node.child(Side::Left.opposite()), node.right());

        node.set_color(Color::Black);
        assert_eq!(node.color(), Color::Black);
        assert_eq!(node.parent(), Some(Handle::from_index(0)));
    }
}
