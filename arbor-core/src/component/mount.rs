//! Mounting a root component into a host document.

use tracing::debug;

use crate::dom::{Document, NodeHandle, NodeKey};
use crate::error::Result;

use super::ComponentRef;

/// Instantiate `component` and append its live tree under `host`.
///
/// Returns the component's top-level handle. `on_mount` has already fired
/// by the time this returns.
pub fn mount(document: &mut dyn Document, host: NodeKey, component: &ComponentRef) -> Result<NodeHandle> {
    let top_level = component.instantiate(document)?;
    document.append_child(host, top_level.node());
    debug!(component = %component.name(), host = host.raw(), "mounted");
    Ok(top_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, StatefulComponent};
    use crate::dom::MemoryDocument;
    use crate::error::Error;
    use crate::node::{build, DeclarativeNode, Tag};
    use crate::util::Record;

    struct Shell;

    impl Component for Shell {
        fn render(&self, _props: Option<&Record>, _state: &Record) -> Option<DeclarativeNode> {
            Some(build(Tag::Main, None, vec![build(Tag::H1, None, vec![]).into()]))
        }
    }

    struct Blank;

    impl Component for Blank {
        fn render(&self, _props: Option<&Record>, _state: &Record) -> Option<DeclarativeNode> {
            None
        }
    }

    #[test]
    fn mount_appends_under_the_host() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let shell = ComponentRef::new(StatefulComponent::new(Shell, None, Record::new()));

        let top = mount(&mut doc, root, &shell).unwrap();

        assert_eq!(doc.children(root), &[top.node()]);
        assert_eq!(doc.children(top.node()).len(), 1);
        assert!(shell.borrow().is_mounted());
    }

    #[test]
    fn failed_mount_leaves_the_host_untouched() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let blank = ComponentRef::new(StatefulComponent::new(Blank, None, Record::new()));

        let err = mount(&mut doc, root, &blank).unwrap_err();

        assert!(matches!(err, Error::EmptyRender { .. }));
        assert!(doc.children(root).is_empty());
    }
}
