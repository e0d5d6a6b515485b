//! Serializable tree definitions.
//!
//! A [`TreeDef`] is plain data tagged by node `type`; [`TreeDef::build`] turns it into a live
//! [`Node`] tree. `call` nodes refer to methods by name and are resolved through [`Bindings`].
//!
//! ```yaml
//! type: sequence
//! children:
//!   - type: wait
//!     seconds: 1.0
//!   - type: fire_event
//!     event: done
//! ```

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use canopy_core::{Node, Status, TickContext};
use canopy_nav::{NavAgent, Vec2};

use crate::{
    BtError, Call, EventTarget, Fail, FireEvent, Inverter, MoveTo, Preset, Repeater, RetryPolicy,
    Selector, Sequence, Succeed, Wait, ARRIVAL_EPSILON,
};

/// One node of a definition: an optional `label` next to the node's own fields.
///
/// Unknown fields are rejected, so a misspelled option fails to parse instead of silently
/// falling back to its default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: NodeKindDef,
}

impl<'de> Deserialize<'de> for TreeDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `label` is split off here; everything else belongs to the node kind.
        let mut fields = serde_yaml::Mapping::deserialize(deserializer)?;
        let label = fields
            .remove("label")
            .map(String::deserialize)
            .transpose()
            .map_err(D::Error::custom)?;
        let kind = NodeKindDef::deserialize(serde_yaml::Value::Mapping(fields))
            .map_err(D::Error::custom)?;
        Ok(Self { label, kind })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum NodeKindDef {
    Sequence {
        children: Vec<TreeDef>,
        #[serde(default)]
        always_check_all_nodes: bool,
    },
    Selector {
        children: Vec<TreeDef>,
    },
    Inverter {
        child: Box<TreeDef>,
    },
    Repeater {
        child: Box<TreeDef>,
        #[serde(default)]
        retry: RetryPolicy,
    },
    Wait {
        seconds: f64,
    },
    FireEvent {
        event: String,
    },
    MoveTo {
        #[serde(default)]
        target: Option<[f32; 2]>,
        #[serde(default = "default_epsilon")]
        epsilon: f32,
    },
    Succeed {},
    Fail {},
    Call {
        method: String,
    },
}

fn default_epsilon() -> f32 {
    ARRIVAL_EPSILON
}

impl TreeDef {
    pub fn new(kind: NodeKindDef) -> Self {
        Self { label: None, kind }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn from_yaml(s: &str) -> Result<Self, BtError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json(s: &str) -> Result<Self, BtError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_yaml(&self) -> Result<String, BtError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, BtError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn children(&self) -> Vec<&TreeDef> {
        match &self.kind {
            NodeKindDef::Sequence { children, .. } | NodeKindDef::Selector { children } => {
                children.iter().collect()
            }
            NodeKindDef::Inverter { child } | NodeKindDef::Repeater { child, .. } => {
                vec![child.as_ref()]
            }
            _ => Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(TreeDef::node_count).sum::<usize>()
    }

    pub fn build<A>(&self, bindings: &Bindings<A>) -> Result<Node<A>, BtError>
    where
        A: NavAgent + EventTarget + 'static,
    {
        let node = match &self.kind {
            NodeKindDef::Sequence {
                children,
                always_check_all_nodes,
            } => Node::new(
                Sequence::new(build_all(children, bindings)?)
                    .always_check_all_nodes(*always_check_all_nodes),
            ),
            NodeKindDef::Selector { children } => {
                Node::new(Selector::new(build_all(children, bindings)?))
            }
            NodeKindDef::Inverter { child } => Node::new(Inverter::new(child.build(bindings)?)),
            NodeKindDef::Repeater { child, retry } => {
                Node::new(Repeater::with_policy(child.build(bindings)?, *retry))
            }
            NodeKindDef::Wait { seconds } => Node::new(Wait::new(seconds_to_duration(*seconds)?)),
            NodeKindDef::FireEvent { event } => Node::new(FireEvent::new(event.clone())),
            NodeKindDef::MoveTo { target, epsilon } => {
                if !epsilon.is_finite() || *epsilon < 0.0 {
                    return Err(BtError::InvalidDefinition(format!(
                        "move_to epsilon must be a non-negative number, got {epsilon}"
                    )));
                }
                let target = target.map(Vec2::from);
                Node::new(MoveTo::new(target).with_epsilon(*epsilon))
            }
            NodeKindDef::Succeed {} => Node::new(Succeed),
            NodeKindDef::Fail {} => Node::new(Fail),
            NodeKindDef::Call { method } => {
                let Some(bound) = bindings.get(method) else {
                    return Err(BtError::UnknownBinding(method.clone()));
                };
                let bound = Rc::clone(bound);
                Node::new(Call::new(move |ctx: &TickContext, agent: &mut A| (*bound)(ctx, agent)))
                    .with_label(method.clone())
            }
        };

        Ok(match &self.label {
            Some(label) => node.with_label(label.clone()),
            None => node,
        })
    }
}

fn build_all<A>(defs: &[TreeDef], bindings: &Bindings<A>) -> Result<Vec<Node<A>>, BtError>
where
    A: NavAgent + EventTarget + 'static,
{
    defs.iter().map(|d| d.build(bindings)).collect()
}

fn seconds_to_duration(seconds: f64) -> Result<Duration, BtError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(BtError::InvalidDefinition(format!(
            "wait seconds must be a non-negative number, got {seconds}"
        )));
    }
    Ok(Duration::from_micros((seconds * 1e6).round() as u64))
}

type BoundMethod<A> = Rc<dyn Fn(&TickContext, &mut A) -> Status>;

/// Named methods that `call` nodes resolve against.
pub struct Bindings<A>
where
    A: 'static,
{
    methods: BTreeMap<String, BoundMethod<A>>,
}

impl<A> Default for Bindings<A>
where
    A: 'static,
{
    fn default() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }
}

impl<A> Bindings<A>
where
    A: 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind<F>(&mut self, name: impl Into<String>, method: F) -> &mut Self
    where
        F: Fn(&TickContext, &mut A) -> Status + 'static,
    {
        self.methods.insert(name.into(), Rc::new(method));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&TickContext, &mut A) -> Status + 'static,
    {
        self.bind(name, method);
        self
    }

    pub fn get(&self, name: &str) -> Option<&BoundMethod<A>> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.methods.keys().map(String::as_str)
    }
}

impl<A> Preset<A>
where
    A: NavAgent + EventTarget + 'static,
{
    pub fn from_def(def: &TreeDef, bindings: &Bindings<A>) -> Result<Self, BtError> {
        Ok(Preset::new(def.build(bindings)?))
    }
}
