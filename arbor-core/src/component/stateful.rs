//! Stateful Components
//!
//! A [`Component`] describes output; a [`StatefulComponent`] wraps one with
//! props, mutable state and the cache of what it last put on screen.
//!
//! # Lifecycle
//!
//! 1. `instantiate`: render, create the top-level handle, compose the
//!    children, seed the diff baseline, fire `on_mount`.
//! 2. `set_state`: compute the patch, skip it if it changes nothing, merge
//!    it, fire `on_update`, render again and reconcile.
//!
//! Both steps run to completion on the calling thread.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::compose::TreeComposer;
use crate::dom::{Document, NodeHandle};
use crate::error::{Error, Result};
use crate::node::{flatten, DeclarativeNode};
use crate::util::{clone_value, loosely_equal, value_kind, Record};

use super::reconcile::{reconcile, Patch, RenderCache};

/// Author-defined rendering logic.
///
/// Only [`render`](Component::render) is required.
pub trait Component {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Describe the component's output for the given props and state.
    fn render(&self, props: Option<&Record>, state: &Record) -> Option<DeclarativeNode>;

    /// Called once the component's live tree exists.
    fn on_mount(&mut self) {}

    /// Called after a state patch was merged, before reconciliation.
    fn on_update(&mut self, _prev_props: Option<&Record>, _prev_state: &Record) {}
}

/// Updater function form of a state change.
pub type Updater = Box<dyn FnOnce(&Record, Option<&Record>) -> Record>;

/// A state change passed to [`StatefulComponent::set_state`].
pub enum Update {
    /// Shallow-merged onto the current state.
    Patch(Record),
    /// Computes the patch from the previous state and props.
    With(Updater),
}

impl Update {
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(&Record, Option<&Record>) -> Record + 'static,
    {
        Update::With(Box::new(f))
    }

    fn into_patch(self, state: &Record, props: Option<&Record>) -> Record {
        match self {
            Update::Patch(patch) => patch,
            Update::With(f) => f(state, props),
        }
    }
}

impl From<Record> for Update {
    fn from(patch: Record) -> Self {
        Update::Patch(patch)
    }
}

impl TryFrom<&Value> for Update {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match clone_value(value)? {
            Value::Object(map) => Ok(Update::Patch(map.into_iter().collect())),
            other => Err(Error::NotARecord {
                kind: value_kind(&other),
            }),
        }
    }
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Patch(patch) => f.debug_tuple("Patch").field(patch).finish(),
            Update::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Result of a [`set_state`](StatefulComponent::set_state) call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The patch changed nothing; no render happened.
    Skipped,
    /// The component re-rendered and these patches were applied.
    Reconciled(Vec<Patch>),
}

/// A component with state and a rendered-tree cache.
pub struct StatefulComponent {
    component: Box<dyn Component>,
    props: Option<Record>,
    state: Record,
    /// `None` until instantiated.
    rendered: Option<RenderCache>,
}

impl StatefulComponent {
    pub fn new(component: impl Component + 'static, props: Option<Record>, state: Record) -> Self {
        Self {
            component: Box::new(component),
            props,
            state,
            rendered: None,
        }
    }

    pub fn name(&self) -> &str {
        self.component.name()
    }

    pub fn props(&self) -> Option<&Record> {
        self.props.as_ref()
    }

    pub fn state(&self) -> &Record {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.rendered.is_some()
    }

    /// Root of the component's live subtree.
    pub fn top_level(&self) -> Option<&NodeHandle> {
        self.rendered.as_ref().map(|r| &r.top_level)
    }

    /// Handles the component created directly, in pre-order.
    pub fn child_handles(&self) -> &[NodeHandle] {
        self.rendered
            .as_ref()
            .map(|r| r.child_handles.as_slice())
            .unwrap_or(&[])
    }

    /// The flattened render used as the next diff baseline.
    pub fn last_flattened(&self) -> &[DeclarativeNode] {
        self.rendered
            .as_ref()
            .map(|r| r.last_flattened.as_slice())
            .unwrap_or(&[])
    }

    /// Render and build the live subtree. Returns the top-level handle.
    pub fn instantiate(&mut self, document: &mut dyn Document) -> Result<NodeHandle> {
        let root = self
            .component
            .render(self.props.as_ref(), &self.state)
            .ok_or_else(|| Error::EmptyRender {
                component: self.name().to_string(),
            })?;

        let mut composer = TreeComposer::new(document);
        let mut top_level = NodeHandle::create(composer.document(), root.tag(), root.attributes());
        top_level.assign_id(composer.ids().root_id(root.tag()));

        let children = root.children().unwrap_or_default();
        let composed = composer.compose_tree(children, top_level, Vec::new())?;
        let baseline = flatten(children);

        debug!(
            component = self.name(),
            handles = composed.children.len(),
            "instantiated component"
        );

        let top_level = composed.parent.clone();
        self.rendered = Some(RenderCache::new(composed.parent, composed.children, baseline));
        self.component.on_mount();
        Ok(top_level)
    }

    /// Apply a state change and reconcile the live tree.
    ///
    /// `props` is only passed to an updater function.
    pub fn set_state(
        &mut self,
        document: &mut dyn Document,
        update: impl Into<Update>,
        props: Option<&Record>,
    ) -> Result<UpdateOutcome> {
        if self.rendered.is_none() {
            return Err(Error::NotMounted {
                component: self.name().to_string(),
            });
        }

        let patch = update.into().into_patch(&self.state, props);
        if loosely_equal(&self.state, &patch) {
            debug!(component = self.name(), "state unchanged, skipping update");
            return Ok(UpdateOutcome::Skipped);
        }

        let prev_state = self.state.clone();
        self.state.extend(patch);
        self.component.on_update(self.props.as_ref(), &prev_state);

        let next = self
            .component
            .render(self.props.as_ref(), &self.state)
            .map(DeclarativeNode::into_children)
            .unwrap_or_default();
        let next = flatten(&next);

        let Some(cache) = self.rendered.as_mut() else {
            return Ok(UpdateOutcome::Skipped);
        };
        let patches = reconcile(document, cache, next);
        debug!(
            component = self.component.name(),
            patches = patches.len(),
            "reconciled"
        );
        Ok(UpdateOutcome::Reconciled(patches))
    }
}

impl fmt::Debug for StatefulComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatefulComponent")
            .field("name", &self.name())
            .field("props", &self.props)
            .field("state", &self.state)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

/// Shared reference to a [`StatefulComponent`].
///
/// This is what appears inside declarative trees. Cloning it shares the
/// component.
#[derive(Clone)]
pub struct ComponentRef(Rc<RefCell<StatefulComponent>>);

impl ComponentRef {
    pub fn new(component: StatefulComponent) -> Self {
        Self(Rc::new(RefCell::new(component)))
    }

    pub fn borrow(&self) -> Ref<'_, StatefulComponent> {
        self.0.borrow()
    }

    fn borrow_busy(&self) -> Result<RefMut<'_, StatefulComponent>> {
        self.0.try_borrow_mut().map_err(|_| Error::ComponentBusy {
            component: self.name(),
        })
    }

    /// Component name, or a placeholder while it is mutably borrowed.
    pub fn name(&self) -> String {
        self.0
            .try_borrow()
            .map(|c| c.name().to_string())
            .unwrap_or_else(|_| "<busy>".to_string())
    }

    /// See [`StatefulComponent::instantiate`].
    pub fn instantiate(&self, document: &mut dyn Document) -> Result<NodeHandle> {
        self.borrow_busy()?.instantiate(document)
    }

    /// See [`StatefulComponent::set_state`].
    pub fn set_state(
        &self,
        document: &mut dyn Document,
        update: impl Into<Update>,
        props: Option<&Record>,
    ) -> Result<UpdateOutcome> {
        self.borrow_busy()?.set_state(document, update, props)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentRef({})", self.name())
    }
}
