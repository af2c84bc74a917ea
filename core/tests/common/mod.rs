use std::collections::HashMap;
use std::rc::Rc;

use bomviewer_core::MarkerTarget;

/// Minimal element tree: each node knows its attributes and its parent.
#[derive(Clone, Debug)]
pub struct FakeElement(Rc<Node>);

#[derive(Debug)]
struct Node {
    attributes: HashMap<String, String>,
    parent: Option<FakeElement>,
}

impl FakeElement {
    pub fn root(attributes: &[(&str, &str)]) -> Self {
        Self::build(attributes, None)
    }

    pub fn child(&self, attributes: &[(&str, &str)]) -> Self {
        Self::build(attributes, Some(self.clone()))
    }

    fn build(attributes: &[(&str, &str)], parent: Option<FakeElement>) -> Self {
        let attributes = attributes
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self(Rc::new(Node { attributes, parent }))
    }
}

impl MarkerTarget for FakeElement {
    fn has_attribute(&self, name: &str) -> bool {
        self.0.attributes.contains_key(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.get(name).cloned()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }
}
