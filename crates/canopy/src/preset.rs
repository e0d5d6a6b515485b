use std::rc::Rc;

use canopy_core::Node;
use tracing::debug;

/// Shareable tree template.
///
/// A preset is never ticked. Each agent that runs it gets a deep clone from
/// [`Preset::instantiate`], so per-instance state (activation flags, cursors, timers) is never
/// shared between agents.
pub struct Preset<A>
where
    A: 'static,
{
    template: Node<A>,
    node_count: u32,
}

impl<A> Preset<A>
where
    A: 'static,
{
    /// A template that was already ticked is deactivated, so instances never inherit its
    /// in-flight progress.
    pub fn new(mut template: Node<A>) -> Self {
        template.deactivate();
        let node_count = template.assign_ids();
        Self {
            template,
            node_count,
        }
    }

    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn root(&self) -> &Node<A> {
        &self.template
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn instantiate(&self) -> Node<A> {
        debug!(
            root = self.template.name(),
            nodes = self.node_count,
            "instantiating preset"
        );
        self.template.clone()
    }
}

/// Where a controller gets its tree from.
pub enum TreeSource<A>
where
    A: 'static,
{
    Unbound,
    /// A tree owned by the controller directly.
    Root(Node<A>),
    /// A shared preset, instantiated lazily on the controller's first tick.
    Preset(Rc<Preset<A>>),
}

impl<A> From<Node<A>> for TreeSource<A>
where
    A: 'static,
{
    fn from(root: Node<A>) -> Self {
        TreeSource::Root(root)
    }
}

impl<A> From<Rc<Preset<A>>> for TreeSource<A>
where
    A: 'static,
{
    fn from(preset: Rc<Preset<A>>) -> Self {
        TreeSource::Preset(preset)
    }
}
