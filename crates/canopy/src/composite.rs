use canopy_core::{Behavior, Node, Status, StatusSink, TickContext};

/// Cancel the child that was running last tick if it is no longer the one running now.
fn halt_abandoned<A>(
    children: &mut [Node<A>],
    running: &mut Option<usize>,
    now: Option<usize>,
    agent: &mut A,
) where
    A: 'static,
{
    if let Some(prev) = *running {
        if Some(prev) != now {
            children[prev].cancel(agent);
        }
    }
    *running = now;
}

/// Ticks children left to right until one fails or all succeed.
///
/// The cursor survives `Running`, so the next tick resumes at the child that was running. With
/// `always_check_all_nodes` the cursor restarts at 0 every tick and earlier children are
/// re-evaluated before the running one is reached.
pub struct Sequence<A>
where
    A: 'static,
{
    children: Vec<Node<A>>,
    always_check_all_nodes: bool,
    cursor: usize,
    running: Option<usize>,
}

impl<A> Sequence<A>
where
    A: 'static,
{
    pub fn new(children: Vec<Node<A>>) -> Self {
        Self {
            children,
            always_check_all_nodes: false,
            cursor: 0,
            running: None,
        }
    }

    pub fn always_check_all_nodes(mut self, enabled: bool) -> Self {
        self.always_check_all_nodes = enabled;
        self
    }

    pub fn checks_all_nodes(&self) -> bool {
        self.always_check_all_nodes
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<A> Clone for Sequence<A>
where
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            always_check_all_nodes: self.always_check_all_nodes,
            cursor: self.cursor,
            running: self.running,
        }
    }
}

impl<A> Behavior<A> for Sequence<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, sink: &mut dyn StatusSink) -> Status {
        if self.always_check_all_nodes {
            self.cursor = 0;
        }

        while self.cursor < self.children.len() {
            let i = self.cursor;
            match self.children[i].tick(ctx, agent, sink) {
                Status::Success => self.cursor += 1,
                Status::Running => {
                    halt_abandoned(&mut self.children, &mut self.running, Some(i), agent);
                    return Status::Running;
                }
                Status::Failure => {
                    halt_abandoned(&mut self.children, &mut self.running, None, agent);
                    return Status::Failure;
                }
            }
        }

        halt_abandoned(&mut self.children, &mut self.running, None, agent);
        Status::Success
    }

    fn reset(&mut self, _ctx: &TickContext, _agent: &mut A) {
        self.cursor = 0;
        self.running = None;
    }

    fn cancel(&mut self, _agent: &mut A) {
        self.running = None;
    }

    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn children(&self) -> &[Node<A>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Node<A>] {
        &mut self.children
    }
}

/// Ticks children left to right until one succeeds.
///
/// Every tick scans from the first child; there is no cursor. A running child short-circuits the
/// scan, so an earlier child that becomes eligible takes over on the next tick and the previously
/// running child is cancelled.
pub struct Selector<A>
where
    A: 'static,
{
    children: Vec<Node<A>>,
    running: Option<usize>,
}

impl<A> Selector<A>
where
    A: 'static,
{
    pub fn new(children: Vec<Node<A>>) -> Self {
        Self {
            children,
            running: None,
        }
    }
}

impl<A> Clone for Selector<A>
where
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            running: self.running,
        }
    }
}

impl<A> Behavior<A> for Selector<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A, sink: &mut dyn StatusSink) -> Status {
        for i in 0..self.children.len() {
            match self.children[i].tick(ctx, agent, sink) {
                Status::Failure => continue,
                Status::Success => {
                    halt_abandoned(&mut self.children, &mut self.running, None, agent);
                    return Status::Success;
                }
                Status::Running => {
                    halt_abandoned(&mut self.children, &mut self.running, Some(i), agent);
                    return Status::Running;
                }
            }
        }

        halt_abandoned(&mut self.children, &mut self.running, None, agent);
        Status::Failure
    }

    fn reset(&mut self, _ctx: &TickContext, _agent: &mut A) {
        self.running = None;
    }

    fn cancel(&mut self, _agent: &mut A) {
        self.running = None;
    }

    fn kind(&self) -> &'static str {
        "selector"
    }

    fn children(&self) -> &[Node<A>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Node<A>] {
        &mut self.children
    }
}
