//! Integration tests for focus behavior.

#[cfg(test)]
mod tests {
    use trellis::{prelude::*, testing::Recorder};

    /// A widget that accepts focus.
    struct Button;

    impl Widget for Button {
        fn accept_focus(&self) -> bool {
            true
        }
    }

    /// Attach a focusable button under `parent`.
    fn button(tree: &mut Tree, parent: NodeId) -> Result<NodeId> {
        let id = tree.create_detached(Button);
        tree.add_child(parent, id)?;
        Ok(id)
    }

    #[test]
    fn widget_decides_selectability() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let b = button(&mut tree, root)?;
        let plain = tree.create("plain");
        tree.add_child(root, plain)?;
        assert_eq!(tree.node(b).map(|n| n.name()), Some("Button"));
        assert!(tree.is_focusable(b));
        assert!(!tree.is_focusable(plain));
        assert!(!tree.set_focus(plain)?);
        Ok(())
    }

    #[test]
    fn disabled_nodes_are_skipped() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = button(&mut tree, root)?;
        let b = button(&mut tree, root)?;
        let c = button(&mut tree, root)?;
        tree.set_enabled(b, false)?;
        assert_eq!(tree.focusable_nodes(root, false), vec![a, c]);
        assert_eq!(tree.next_focusable(a, true, false), Some(c));
        assert_eq!(tree.next_focusable(c, true, false), Some(a));
        assert_eq!(tree.next_focusable(a, false, false), Some(c));
        Ok(())
    }

    #[test]
    fn tab_stop_and_detached_nodes_are_skipped() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = button(&mut tree, root)?;
        let b = button(&mut tree, root)?;
        let loose = tree.create_detached(Button);
        tree.set_tab_stop(b, false)?;
        assert_eq!(tree.focusable_nodes(root, true), vec![a]);
        // Not a tab stop, but still focusable directly.
        assert!(tree.set_focus(b)?);
        assert!(!tree.set_focus(loose)?);
        assert_eq!(tree.focused(), Some(b));
        Ok(())
    }

    #[test]
    fn nested_traversal_crosses_containers() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let panel = tree.create("panel");
        tree.add_child(root, panel)?;
        let p1 = button(&mut tree, panel)?;
        let p2 = button(&mut tree, panel)?;
        let x = button(&mut tree, root)?;

        assert_eq!(tree.focusable_nodes(root, true), vec![p1, p2, x]);
        assert_eq!(tree.focusable_nodes(root, false), vec![x]);

        assert_eq!(tree.next_focusable(p2, true, false), Some(p1));
        assert_eq!(tree.next_focusable(p2, true, true), Some(x));
        assert_eq!(tree.next_focusable(x, true, true), Some(p1));
        assert_eq!(tree.next_focusable(p1, false, true), Some(x));
        // A node outside the sequence starts at either end.
        assert_eq!(tree.next_focusable(panel, true, false), Some(x));
        assert_eq!(tree.next_focusable(panel, false, true), Some(x));
        Ok(())
    }

    #[test]
    fn tab_index_applies_per_container() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let panel = tree.create("panel");
        tree.add_child(root, panel)?;
        let p1 = button(&mut tree, panel)?;
        let p2 = button(&mut tree, panel)?;
        let x = button(&mut tree, root)?;
        tree.set_tab_index(panel, 1)?;
        tree.set_tab_index(p1, 5)?;
        assert_eq!(tree.focusable_nodes(root, true), vec![x, p2, p1]);
        Ok(())
    }

    #[test]
    fn focus_first_and_next() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = button(&mut tree, root)?;
        let b = button(&mut tree, root)?;
        let rec = Recorder::attach(&mut tree);
        assert_eq!(tree.focus_first(root)?, Some(a));
        assert_eq!(tree.focus_next(a, true, true)?, Some(b));
        assert!(tree.is_focused(b));
        assert_eq!(
            rec.changes()
                .into_iter()
                .filter(|c| matches!(c, Change::FocusChanged { .. }))
                .collect::<Vec<_>>(),
            vec![
                Change::FocusChanged {
                    old: None,
                    new: Some(a)
                },
                Change::FocusChanged {
                    old: Some(a),
                    new: Some(b)
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn focus_is_dropped_when_it_stops_qualifying() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let panel = tree.create("panel");
        tree.add_child(root, panel)?;
        let a = button(&mut tree, panel)?;

        tree.set_focus(a)?;
        tree.set_enabled(panel, false)?;
        assert_eq!(tree.focused(), None);

        tree.set_enabled(panel, true)?;
        tree.set_focus(a)?;
        tree.set_parent(panel, None)?;
        assert_eq!(tree.focused(), None);

        tree.add_child(root, panel)?;
        tree.set_focus(a)?;
        tree.set_can_select(a, false)?;
        // Selectability is read on demand; the next check drops focus.
        assert!(!tree.is_focusable(a));
        tree.ensure_focus_valid();
        assert_eq!(tree.focused(), None);

        tree.set_can_select(a, true)?;
        tree.set_focus(a)?;
        tree.remove_subtree(panel)?;
        assert_eq!(tree.focused(), None);
        Ok(())
    }
}
