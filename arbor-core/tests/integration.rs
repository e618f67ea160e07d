//! Integration Tests for the Reconciliation Engine
//!
//! These tests mount whole components into a `MemoryDocument` and verify the
//! live tree and the mutation journal after state changes.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use arbor_core::compose::TreeComposer;
use arbor_core::dom::{Mutation, Schema};
use arbor_core::node::flatten;
use arbor_core::prelude::*;

/// A counter rendering `div > span{count}`.
struct Counter;

impl Component for Counter {
    fn render(&self, _props: Option<&Record>, state: &Record) -> Option<DeclarativeNode> {
        let count = state.get("count").cloned().unwrap_or(json!(0));
        Some(build(
            Tag::Div,
            Some(record([("className", json!("counter"))])),
            vec![build(
                Tag::Span,
                Some(record([("textContent", json!(count.to_string()))])),
                vec![],
            )
            .into()],
        ))
    }
}

/// Renders a `button` while idle and a `div` while busy.
struct Toggle;

impl Component for Toggle {
    fn render(&self, _props: Option<&Record>, state: &Record) -> Option<DeclarativeNode> {
        let busy = state.get("busy").and_then(|v| v.as_bool()).unwrap_or(false);
        let tag = if busy { Tag::Div } else { Tag::Button };
        Some(build(
            Tag::Section,
            None,
            vec![build(tag, Some(record([("textContent", json!("go"))])), vec![]).into()],
        ))
    }
}

/// Wraps a nested component next to a label.
struct Panel {
    inner: ComponentRef,
}

impl Component for Panel {
    fn render(&self, _props: Option<&Record>, state: &Record) -> Option<DeclarativeNode> {
        let title = state.get("title").cloned().unwrap_or(json!(""));
        Some(build(
            Tag::Div,
            None,
            vec![
                build(Tag::H2, Some(record([("textContent", title)])), vec![]).into(),
                self.inner.clone().into(),
            ],
        ))
    }
}

fn counter() -> ComponentRef {
    ComponentRef::new(StatefulComponent::new(Counter, None, record([("count", json!(0))])))
}

fn replacements(doc: &MemoryDocument) -> usize {
    doc.journal()
        .iter()
        .filter(|m| matches!(m, Mutation::Replace { .. }))
        .count()
}

// ----------------------------------------------------------------------------
// Composition
// ----------------------------------------------------------------------------

/// A single built node composes into exactly one matching live handle.
#[test]
fn build_then_compose_yields_matching_handle() {
    let mut doc = MemoryDocument::new();
    let attrs = record([("className", json!("hero")), ("title", json!("Welcome"))]);
    let children = vec![build(Tag::Section, Some(attrs.clone()), vec![]).into()];

    let mut composer = TreeComposer::new(&mut doc);
    let parent = NodeHandle::create(composer.document(), Tag::Div, None);
    let composed = composer.compose_tree(&children, parent, Vec::new()).unwrap();

    assert_eq!(composed.children.len(), 1);
    let handle = &composed.children[0];
    assert_eq!(handle.tag(), Tag::Section);
    assert_eq!(handle.attributes(), &attrs);
    assert_eq!(doc.property(handle.node(), "className"), Some(&json!("hero")));
    assert_eq!(doc.property(handle.node(), "title"), Some(&json!("Welcome")));
}

/// `div.top > button{hey}` gives one `button` child under the parent.
#[test]
fn top_div_with_button() {
    let mut doc = MemoryDocument::new();
    let tree = build(
        Tag::Div,
        Some(record([("className", json!("top"))])),
        vec![build(Tag::Button, Some(record([("textContent", json!("hey"))])), vec![]).into()],
    );

    let mut composer = TreeComposer::new(&mut doc);
    let parent = NodeHandle::create(composer.document(), tree.tag(), tree.attributes());
    let composed = composer
        .compose_tree(tree.children().unwrap(), parent, Vec::new())
        .unwrap();

    assert_eq!(composed.children.len(), 1);
    assert_eq!(composed.children[0].tag(), Tag::Button);
    assert_eq!(
        doc.property(composed.children[0].node(), "textContent"),
        Some(&json!("hey"))
    );
    assert_eq!(doc.child_count(composed.parent.node()), 1);
    assert_eq!(doc.property(composed.parent.node(), "className"), Some(&json!("top")));
}

/// Flattening `div > [span, Component]` only yields the span.
#[test]
fn flatten_does_not_descend_into_components() {
    let tree = build(Tag::Div, None, vec![build(Tag::Span, None, vec![]).into(), counter().into()]);

    let flat = flatten(tree.children().unwrap());

    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].tag(), Tag::Span);
}

/// A stray value among children drops the whole children list.
#[test]
fn malformed_children_collapse() {
    let node = DeclarativeNode::create(
        Tag::Ul,
        vec![
            build(Tag::Li, None, vec![]).into(),
            "oops".into(),
            build(Tag::Li, None, vec![]).into(),
        ],
    );

    assert!(node.children().is_none());
}

// ----------------------------------------------------------------------------
// Reconciliation
// ----------------------------------------------------------------------------

/// `{count: 0}` → `{count: 1}` patches the span once, without replacement.
#[test]
fn counter_increment_patches_text_once() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let counter = counter();
    mount(&mut doc, root, &counter).unwrap();
    doc.clear_journal();

    let outcome = counter
        .set_state(&mut doc, record([("count", json!(1))]), None)
        .unwrap();

    let UpdateOutcome::Reconciled(patches) = outcome else {
        panic!("expected a reconciliation pass");
    };
    assert_eq!(patches.len(), 1);
    assert!(matches!(
        &patches[0],
        Patch::Update { attributes, .. } if attributes["textContent"] == json!("1")
    ));
    assert_eq!(replacements(&doc), 0);

    let span = counter.borrow().child_handles()[0].node();
    assert_eq!(doc.property(span, "textContent"), Some(&json!("1")));
}

/// Re-sending the current state does nothing at all.
#[test]
fn equal_state_is_idempotent() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let counter = counter();
    mount(&mut doc, root, &counter).unwrap();
    counter
        .set_state(&mut doc, record([("count", json!(3))]), None)
        .unwrap();
    doc.clear_journal();

    let outcome = counter
        .set_state(&mut doc, record([("count", json!(" 3 "))]), None)
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Skipped);
    assert!(doc.journal().is_empty());
}

/// A tag change at the same slot replaces the node and patches nothing.
#[test]
fn tag_change_replaces_node() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let toggle = ComponentRef::new(StatefulComponent::new(
        Toggle,
        None,
        record([("busy", json!(false))]),
    ));
    let top = mount(&mut doc, root, &toggle).unwrap();
    doc.clear_journal();

    let outcome = toggle
        .set_state(&mut doc, record([("busy", json!(true))]), None)
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Reconciled(vec![Patch::Replace {
            identifier: "button-0".to_string(),
            tag: Tag::Div,
        }])
    );
    assert_eq!(replacements(&doc), 1);

    let live = doc.children(top.node());
    assert_eq!(live.len(), 1);
    assert_eq!(doc.node(live[0]).unwrap().tag(), Tag::Div);
    assert_eq!(doc.property(live[0], "textContent"), Some(&json!("go")));
}

/// Updating the parent leaves the nested component's subtree alone, and the
/// nested component can update independently.
#[test]
fn nested_components_own_their_subtrees() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let inner = counter();
    let panel = ComponentRef::new(StatefulComponent::new(
        Panel {
            inner: inner.clone(),
        },
        None,
        record([("title", json!("Stats"))]),
    ));
    mount(&mut doc, root, &panel).unwrap();

    assert_eq!(panel.borrow().child_handles().len(), 1);
    assert_eq!(inner.borrow().child_handles().len(), 1);
    let inner_span = inner.borrow().child_handles()[0].node();
    doc.clear_journal();

    panel
        .set_state(&mut doc, record([("title", json!("Totals"))]), None)
        .unwrap();
    assert!(doc.journal().iter().all(|m| match m {
        Mutation::SetProperty { node, .. } => *node != inner_span,
        _ => true,
    }));

    inner
        .set_state(&mut doc, record([("count", json!(7))]), None)
        .unwrap();
    assert_eq!(doc.property(inner_span, "textContent"), Some(&json!("7")));
}

/// Mount fires `on_mount` for the root and for nested components.
#[test]
fn mount_fires_hooks_for_every_component() {
    struct Probe(Rc<Cell<u32>>);

    impl Component for Probe {
        fn render(&self, _props: Option<&Record>, _state: &Record) -> Option<DeclarativeNode> {
            Some(build(Tag::P, None, vec![]))
        }

        fn on_mount(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let mounts = Rc::new(Cell::new(0));
    let probe = ComponentRef::new(StatefulComponent::new(Probe(mounts.clone()), None, Record::new()));
    let panel = ComponentRef::new(StatefulComponent::new(
        Panel { inner: probe },
        None,
        Record::new(),
    ));

    let mut doc = MemoryDocument::new();
    let root = doc.root();
    mount(&mut doc, root, &panel).unwrap();

    assert_eq!(mounts.get(), 1);
}

/// Invalid keys are skipped without aborting the pass.
#[test]
fn invalid_attributes_do_not_abort_reconciliation() {
    struct Link;

    impl Component for Link {
        fn render(&self, _props: Option<&Record>, state: &Record) -> Option<DeclarativeNode> {
            Some(build(
                Tag::Nav,
                None,
                vec![build(
                    Tag::Span,
                    Some(record([
                        ("href", state["href"].clone()),
                        ("textContent", state["label"].clone()),
                    ])),
                    vec![],
                )
                .into()],
            ))
        }
    }

    let mut doc = MemoryDocument::with_schema(Schema::default());
    let root = doc.root();
    let link = ComponentRef::new(StatefulComponent::new(
        Link,
        None,
        record([("href", json!("/a")), ("label", json!("A"))]),
    ));
    mount(&mut doc, root, &link).unwrap();

    link.set_state(&mut doc, record([("href", json!("/b")), ("label", json!("B"))]), None)
        .unwrap();

    let span = link.borrow().child_handles()[0].node();
    assert_eq!(doc.property(span, "textContent"), Some(&json!("B")));
    assert!(doc.property(span, "href").is_none());
}
