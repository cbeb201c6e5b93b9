//! Integration tests for event routing.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use trellis::{EventContext, Phase, prelude::*};

    /// Shared log of (node, phase) visits.
    type Log = Rc<RefCell<Vec<(NodeId, Phase)>>>;

    /// Append a handler to `node` that logs its visit and returns `outcome`.
    fn logging(tree: &mut Tree, node: NodeId, log: &Log, outcome: EventOutcome) -> Result<()> {
        let log = log.clone();
        tree.add_handler(node, move |_, ctx| {
            log.borrow_mut().push((ctx.node(), ctx.phase()));
            outcome
        })?;
        Ok(())
    }

    /// root -> mid -> leaf
    fn chain(options: Options) -> Result<(Tree, NodeId, NodeId)> {
        let mut tree = Tree::with_options(options);
        let root = tree.root();
        let mid = tree.create("mid");
        let leaf = tree.create("leaf");
        tree.add_child(root, mid)?;
        tree.add_child(mid, leaf)?;
        Ok((tree, mid, leaf))
    }

    /// A plain key press.
    fn key() -> Event {
        Event::KeyDown('a'.into())
    }

    #[test]
    fn bubbling_stops_at_first_handler() -> Result<()> {
        let (mut tree, mid, leaf) = chain(Options::default())?;
        let root = tree.root();
        let log = Log::default();
        logging(&mut tree, leaf, &log, EventOutcome::Ignore)?;
        logging(&mut tree, mid, &log, EventOutcome::Handle)?;
        logging(&mut tree, root, &log, EventOutcome::Handle)?;
        assert_eq!(tree.bubble(leaf, &key())?, EventOutcome::Handle);
        assert_eq!(
            *log.borrow(),
            vec![(leaf, Phase::Bubble), (mid, Phase::Bubble)]
        );
        Ok(())
    }

    #[test]
    fn unhandled_events_reach_the_root() -> Result<()> {
        let (mut tree, mid, leaf) = chain(Options::default())?;
        let root = tree.root();
        let log = Log::default();
        for n in [leaf, mid, root] {
            logging(&mut tree, n, &log, EventOutcome::Ignore)?;
        }
        assert_eq!(tree.bubble(leaf, &key())?, EventOutcome::Ignore);
        let visited: Vec<NodeId> = log.borrow().iter().map(|(n, _)| *n).collect();
        assert_eq!(visited, vec![leaf, mid, root]);
        Ok(())
    }

    #[test]
    fn root_preview_sees_events_first() -> Result<()> {
        let (mut tree, _, leaf) = chain(Options {
            root_preview: true,
            ..Options::default()
        })?;
        let root = tree.root();
        let log = Log::default();
        logging(&mut tree, root, &log, EventOutcome::Consume)?;
        logging(&mut tree, leaf, &log, EventOutcome::Handle)?;
        assert_eq!(tree.bubble(leaf, &key())?, EventOutcome::Consume);
        assert_eq!(*log.borrow(), vec![(root, Phase::Preview)]);
        Ok(())
    }

    #[test]
    fn root_preview_skips_detached_subtrees() -> Result<()> {
        let mut tree = Tree::with_options(Options {
            root_preview: true,
            ..Options::default()
        });
        let top = tree.create("top");
        let mid = tree.create("mid");
        let leaf = tree.create("leaf");
        tree.add_child(top, mid)?;
        tree.add_child(mid, leaf)?;
        let log = Log::default();
        for n in [leaf, mid, top] {
            logging(&mut tree, n, &log, EventOutcome::Ignore)?;
        }
        tree.bubble(leaf, &key())?;
        assert_eq!(
            *log.borrow(),
            vec![
                (leaf, Phase::Bubble),
                (mid, Phase::Bubble),
                (top, Phase::Bubble)
            ]
        );

        log.borrow_mut().clear();
        tree.set_preview(mid, true)?;
        tree.bubble(leaf, &key())?;
        assert_eq!(
            *log.borrow(),
            vec![
                (mid, Phase::Preview),
                (leaf, Phase::Bubble),
                (top, Phase::Bubble)
            ]
        );
        Ok(())
    }

    #[test]
    fn previewer_is_not_visited_twice() -> Result<()> {
        let (mut tree, mid, leaf) = chain(Options::default())?;
        let root = tree.root();
        tree.set_preview(mid, true)?;
        let log = Log::default();
        for n in [leaf, mid, root] {
            logging(&mut tree, n, &log, EventOutcome::Ignore)?;
        }
        tree.bubble(leaf, &key())?;
        assert_eq!(
            *log.borrow(),
            vec![
                (mid, Phase::Preview),
                (leaf, Phase::Bubble),
                (root, Phase::Bubble)
            ]
        );
        Ok(())
    }

    #[test]
    fn local_chain_stops_at_first_handler() -> Result<()> {
        let (mut tree, _, leaf) = chain(Options::default())?;
        let log = Log::default();
        logging(&mut tree, leaf, &log, EventOutcome::Ignore)?;
        logging(&mut tree, leaf, &log, EventOutcome::Handle)?;
        logging(&mut tree, leaf, &log, EventOutcome::Handle)?;
        tree.bubble(leaf, &key())?;
        assert_eq!(log.borrow().len(), 2);
        Ok(())
    }

    /// Consumes character input, ignores everything else.
    struct TextBox {
        /// Characters typed so far.
        text: Rc<RefCell<String>>,
    }

    impl Widget for TextBox {
        fn on_event(&mut self, event: &Event, _ctx: &mut EventContext<'_>) -> EventOutcome {
            match event {
                Event::KeyPress(c) => {
                    self.text.borrow_mut().push(*c);
                    EventOutcome::Consume
                }
                _ => EventOutcome::Ignore,
            }
        }
    }

    #[test]
    fn widget_runs_before_local_handlers() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let text = Rc::new(RefCell::new(String::new()));
        let input = tree.create_detached(TextBox { text: text.clone() });
        tree.add_child(root, input)?;
        let log = Log::default();
        logging(&mut tree, input, &log, EventOutcome::Handle)?;

        assert_eq!(
            tree.bubble(input, &Event::KeyPress('z'))?,
            EventOutcome::Consume
        );
        assert_eq!(*text.borrow(), "z");
        assert!(log.borrow().is_empty());

        assert_eq!(tree.bubble(input, &key())?, EventOutcome::Handle);
        assert_eq!(log.borrow().len(), 1);
        Ok(())
    }

    #[test]
    fn routes_from_focus_or_root() -> Result<()> {
        let (mut tree, _, leaf) = chain(Options::default())?;
        let root = tree.root();
        let log = Log::default();
        logging(&mut tree, leaf, &log, EventOutcome::Ignore)?;
        logging(&mut tree, root, &log, EventOutcome::Ignore)?;
        tree.route_to_focused(&key())?;
        assert_eq!(*log.borrow(), vec![(root, Phase::Bubble)]);

        log.borrow_mut().clear();
        tree.set_can_select(leaf, true)?;
        tree.set_focus(leaf)?;
        tree.route_to_focused(&key())?;
        assert_eq!(
            *log.borrow(),
            vec![(leaf, Phase::Bubble), (root, Phase::Bubble)]
        );
        Ok(())
    }

    #[test]
    fn removed_handler_is_not_called() -> Result<()> {
        let (mut tree, mid, leaf) = chain(Options::default())?;
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        let id = tree.add_handler(leaf, move |_, _| {
            *h.borrow_mut() += 1;
            EventOutcome::Handle
        })?;
        tree.bubble(leaf, &key())?;
        assert!(!tree.remove_handler(mid, id)?);
        assert!(tree.remove_handler(leaf, id)?);
        assert_eq!(tree.bubble(leaf, &key())?, EventOutcome::Ignore);
        assert_eq!(*hits.borrow(), 1);
        Ok(())
    }

    #[test]
    fn handlers_can_remove_the_path() -> Result<()> {
        let (mut tree, mid, leaf) = chain(Options::default())?;
        let root = tree.root();
        tree.add_handler(leaf, move |_, ctx| {
            ctx.tree_mut().remove_subtree(mid).unwrap();
            EventOutcome::Ignore
        })?;
        let log = Log::default();
        logging(&mut tree, root, &log, EventOutcome::Handle)?;
        assert_eq!(tree.bubble(leaf, &key())?, EventOutcome::Handle);
        assert!(!tree.contains(leaf));
        assert_eq!(*log.borrow(), vec![(root, Phase::Bubble)]);
        Ok(())
    }

    #[test]
    fn bubbling_from_missing_node_fails() -> Result<()> {
        let (mut tree, mid, leaf) = chain(Options::default())?;
        tree.remove_subtree(mid)?;
        assert_eq!(tree.bubble(leaf, &key()), Err(Error::NodeNotFound(leaf)));
        Ok(())
    }
}
