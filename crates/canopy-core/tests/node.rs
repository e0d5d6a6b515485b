use canopy_core::{Behavior, Node, NodeId, NullStatusSink, Status, StatusSink, TickContext, TickStatusMap};

#[derive(Debug, Default)]
struct Journal {
    entries: Vec<String>,
}

impl Journal {
    fn count(&self, entry: &str) -> usize {
        self.entries.iter().filter(|e| *e == entry).count()
    }
}

/// Replays a fixed script of results, sticking on the last one.
#[derive(Debug, Clone)]
struct Scripted {
    name: &'static str,
    script: Vec<Status>,
    at: usize,
}

impl Scripted {
    fn new(name: &'static str, script: &[Status]) -> Self {
        Self {
            name,
            script: script.to_vec(),
            at: 0,
        }
    }
}

impl Behavior<Journal> for Scripted {
    fn tick(&mut self, _ctx: &TickContext, agent: &mut Journal, _sink: &mut dyn StatusSink) -> Status {
        agent.entries.push(format!("tick:{}", self.name));
        let status = self.script[self.at.min(self.script.len() - 1)];
        self.at += 1;
        status
    }

    fn reset(&mut self, _ctx: &TickContext, agent: &mut Journal) {
        agent.entries.push(format!("reset:{}", self.name));
    }

    fn on_success(&mut self, agent: &mut Journal) {
        agent.entries.push(format!("success:{}", self.name));
    }

    fn on_failure(&mut self, agent: &mut Journal) {
        agent.entries.push(format!("failure:{}", self.name));
    }

    fn cancel(&mut self, agent: &mut Journal) {
        agent.entries.push(format!("cancel:{}", self.name));
    }

    fn kind(&self) -> &'static str {
        "scripted"
    }
}

/// Single-child passthrough, enough to exercise tree traversal.
#[derive(Clone)]
struct Wrap {
    child: [Node<Journal>; 1],
}

impl Wrap {
    fn new(child: Node<Journal>) -> Self {
        Self { child: [child] }
    }
}

impl Behavior<Journal> for Wrap {
    fn tick(&mut self, ctx: &TickContext, agent: &mut Journal, sink: &mut dyn StatusSink) -> Status {
        self.child[0].tick(ctx, agent, sink)
    }

    fn cancel(&mut self, agent: &mut Journal) {
        agent.entries.push("cancel:wrap".to_string());
    }

    fn kind(&self) -> &'static str {
        "wrap"
    }

    fn children(&self) -> &[Node<Journal>] {
        &self.child
    }

    fn children_mut(&mut self) -> &mut [Node<Journal>] {
        &mut self.child
    }
}

fn ctx() -> TickContext {
    TickContext::first(canopy_core::DEFAULT_TICK_INTERVAL)
}

#[test]
fn reset_fires_once_per_activation() {
    use Status::*;
    let mut node = Node::new(Scripted::new("a", &[Running, Running, Success, Running, Failure]));
    let mut journal = Journal::default();

    let results: Vec<Status> = (0..5)
        .map(|_| node.tick(&ctx(), &mut journal, &mut NullStatusSink))
        .collect();

    assert_eq!(results, vec![Running, Running, Success, Running, Failure]);
    assert_eq!(journal.count("reset:a"), 2);
    assert_eq!(journal.count("success:a"), 1);
    assert_eq!(journal.count("failure:a"), 1);
    assert_eq!(
        journal.entries[..5],
        ["reset:a", "tick:a", "tick:a", "tick:a", "success:a"]
    );
}

#[test]
fn running_keeps_node_active() {
    let mut node = Node::new(Scripted::new("a", &[Status::Running, Status::Success]));
    let mut journal = Journal::default();

    assert!(!node.is_active());
    node.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert!(node.is_active());
    node.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert!(!node.is_active());
}

#[test]
fn cancel_reaches_active_descendants_before_the_parent() {
    let mut node = Node::new(Wrap::new(Node::new(Scripted::new("leaf", &[Status::Running]))));
    let mut journal = Journal::default();

    node.tick(&ctx(), &mut journal, &mut NullStatusSink);
    node.cancel(&mut journal);

    let tail: Vec<&str> = journal.entries.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(tail, vec!["cancel:wrap", "cancel:leaf"]);
    assert!(!node.is_active());
    assert!(!node.children()[0].is_active());

    // Inactive trees ignore cancellation.
    let before = journal.entries.len();
    node.cancel(&mut journal);
    assert_eq!(journal.entries.len(), before);
}

#[test]
fn ids_are_assigned_in_pre_order_and_recorded() {
    let mut node = Node::new(Wrap::new(Node::new(Wrap::new(Node::new(Scripted::new(
        "leaf",
        &[Status::Success],
    ))))));
    assert_eq!(node.assign_ids(), 3);
    assert_eq!(node.node_count(), 3);

    let mut ids = Vec::new();
    node.walk(&mut |n, depth| ids.push((n.id(), depth)));
    assert_eq!(ids, vec![(NodeId(0), 0), (NodeId(1), 1), (NodeId(2), 2)]);
    assert_eq!(node.find(NodeId(2)).map(|n| n.kind()), Some("scripted"));

    let mut statuses = TickStatusMap::new();
    node.tick(&ctx(), &mut Journal::default(), &mut statuses);
    assert_eq!(statuses.len(), 3);
    assert!(statuses.iter().all(|(_, s)| s == Status::Success));
}

#[test]
fn clone_is_deep() {
    let mut original = Node::new(Wrap::new(
        Node::new(Scripted::new("leaf", &[Status::Running, Status::Success])).with_label("leaf"),
    ));
    let mut copy = original.clone();
    let mut journal = Journal::default();

    assert_eq!(original.tick(&ctx(), &mut journal, &mut NullStatusSink), Status::Running);
    assert_eq!(original.tick(&ctx(), &mut journal, &mut NullStatusSink), Status::Success);

    // The copy's script cursor is untouched by the original's progress.
    assert_eq!(copy.tick(&ctx(), &mut journal, &mut NullStatusSink), Status::Running);
    assert_eq!(copy.children()[0].name(), "leaf");
}

#[test]
fn deactivate_clears_the_subtree_without_hooks() {
    let mut node = Node::new(Wrap::new(Node::new(Scripted::new("leaf", &[Status::Running]))));
    let mut journal = Journal::default();
    node.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert!(node.children()[0].is_active());

    node.deactivate();
    assert!(!node.is_active());
    assert!(!node.children()[0].is_active());
    assert_eq!(journal.count("cancel:leaf"), 0);
    assert_eq!(journal.count("cancel:wrap"), 0);

    node.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert_eq!(journal.count("reset:leaf"), 2);
}
