//! The tree contract the parse driver builds against.

/// A tree node that exclusively owns an ordered list of children.
///
/// Consumers append the nodes they build to the node currently under
/// construction; the driver itself never inspects node payloads.
pub trait TreeNode: Sized {
    /// Append a child after any existing children.
    fn append(&mut self, child: Self);

    /// Children in order.
    fn children(&self) -> &[Self];

    /// Number of direct children.
    fn child_count(&self) -> usize {
        self.children().len()
    }
}
