use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) selected: bool,
    pub(crate) required: bool,
    pub(crate) offset_top: f64,
    pub(crate) offset_height: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    pub(crate) fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        let selected = attrs.contains_key("selected");
        let required = attrs.contains_key("required");
        let element = Element {
            tag_name,
            attrs,
            value,
            checked,
            selected,
            required,
            offset_top: 0.0,
            offset_height: 0.0,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            self.id_index.insert(id_attr, id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestor chain from the node's parent up to the document root.
    pub(crate) fn ancestors(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(node_id);
        while let Some(id) = current {
            chain.push(id);
            current = self.parent(id);
        }
        chain
    }

    /// All element nodes in document (pre-order) order, starting below `from`.
    pub(crate) fn elements_in_document_order(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(from, &mut out);
        out
    }

    fn collect_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            for &child in self.children(node_id) {
                if self.element(child).is_some() {
                    out.push(child);
                }
                self.collect_elements(child, out);
            }
        });
    }

    pub(crate) fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|element| element.tag_name.as_str())
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.element(node_id)?.attrs.get(name).map(String::as_str)
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) {
        let previous_id = self.attr(node_id, "id").map(str::to_string);
        if let Some(element) = self.element_mut(node_id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
        if name == "id" {
            if let Some(previous) = previous_id {
                self.id_index.remove(&previous);
            }
            self.id_index.insert(value.to_string(), node_id);
        }
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) {
        let removed = self
            .element_mut(node_id)
            .and_then(|element| element.attrs.remove(name));
        if name == "id" {
            if let Some(previous) = removed {
                self.id_index.remove(&previous);
            }
        }
    }

    pub(crate) fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.attr(node_id, "class")
            .map(|list| list.split_ascii_whitespace().any(|entry| entry == class))
            .unwrap_or(false)
    }

    pub(crate) fn add_class(&mut self, node_id: NodeId, class: &str) {
        if self.has_class(node_id, class) {
            return;
        }
        let mut list = self.attr(node_id, "class").unwrap_or("").to_string();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(class);
        self.set_attr(node_id, "class", &list);
    }

    pub(crate) fn remove_class(&mut self, node_id: NodeId, class: &str) {
        let Some(list) = self.attr(node_id, "class") else {
            return;
        };
        let kept = list
            .split_ascii_whitespace()
            .filter(|entry| *entry != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node_id, "class", &kept);
    }

    pub(crate) fn toggle_class(&mut self, node_id: NodeId, class: &str) -> bool {
        if self.has_class(node_id, class) {
            self.remove_class(node_id, class);
            false
        } else {
            self.add_class(node_id, class);
            true
        }
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            let Some(node) = self.nodes.get(node_id.0) else {
                return;
            };
            if let NodeType::Text(text) = &node.node_type {
                out.push_str(text);
            }
            for &child in &node.children {
                self.collect_text(child, out);
            }
        });
    }

    pub(crate) fn clear_children(&mut self, node_id: NodeId) {
        let children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, text: &str) {
        self.clear_children(node_id);
        self.create_text(node_id, text.to_string());
    }

    pub(crate) fn body(&self) -> Option<NodeId> {
        self.elements_in_document_order(self.root)
            .into_iter()
            .find(|&id| {
                self.tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("body"))
                    .unwrap_or(false)
            })
    }

    /// Container new overlay nodes attach to: `<body>` when present, else the root.
    pub(crate) fn body_or_root(&self) -> NodeId {
        self.body().unwrap_or(self.root)
    }

    pub(crate) fn is_checkbox(&self, node_id: NodeId) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        element.tag_name.eq_ignore_ascii_case("input")
            && element
                .attrs
                .get("type")
                .map(|kind| kind.eq_ignore_ascii_case("checkbox"))
                .unwrap_or(false)
    }

    pub(crate) fn is_multi_select(&self, node_id: NodeId) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        element.tag_name.eq_ignore_ascii_case("select")
            && element.attrs.contains_key("multiple")
    }

    pub(crate) fn is_form_control(&self, node_id: NodeId) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        element.tag_name.eq_ignore_ascii_case("input")
            || element.tag_name.eq_ignore_ascii_case("select")
            || element.tag_name.eq_ignore_ascii_case("textarea")
    }

    pub(crate) fn is_submit_control(&self, node_id: NodeId) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        if element.tag_name.eq_ignore_ascii_case("button") {
            return element
                .attrs
                .get("type")
                .map(|kind| kind.eq_ignore_ascii_case("submit"))
                .unwrap_or(true);
        }
        if element.tag_name.eq_ignore_ascii_case("input") {
            return element
                .attrs
                .get("type")
                .map(|kind| kind.eq_ignore_ascii_case("submit"))
                .unwrap_or(false);
        }
        false
    }

    pub(crate) fn selected_option_values(&self, select_id: NodeId) -> Vec<String> {
        self.elements_in_document_order(select_id)
            .into_iter()
            .filter(|&id| {
                self.tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("option"))
                    .unwrap_or(false)
            })
            .filter(|&id| self.element(id).map(|option| option.selected).unwrap_or(false))
            .map(|id| self.option_value(id))
            .collect()
    }

    pub(crate) fn option_value(&self, option_id: NodeId) -> String {
        match self.attr(option_id, "value") {
            Some(value) => value.to_string(),
            None => self.text_content(option_id).trim().to_string(),
        }
    }

    /// Text of the `<label for=...>` pointing at this control, if any.
    pub(crate) fn label_text_for(&self, control_id: NodeId) -> Option<String> {
        let target = self.attr(control_id, "id")?;
        let label = self
            .elements_in_document_order(self.root)
            .into_iter()
            .find(|&id| {
                self.tag_name(id)
                    .map(|tag| tag.eq_ignore_ascii_case("label"))
                    .unwrap_or(false)
                    && self.attr(id, "for") == Some(target)
            })?;
        Some(self.text_content(label))
    }

    pub(crate) fn enclosing_form(&self, node_id: NodeId) -> Option<NodeId> {
        self.ancestors(node_id).into_iter().find(|&id| {
            self.tag_name(id)
                .map(|tag| tag.eq_ignore_ascii_case("form"))
                .unwrap_or(false)
        })
    }

    /// Bottom edge of the lowest laid-out element; the document height unless
    /// a page-level override is set.
    pub(crate) fn layout_height(&self) -> f64 {
        self.elements_in_document_order(self.root)
            .into_iter()
            .filter_map(|id| self.element(id))
            .map(|element| element.offset_top + element.offset_height)
            .fold(0.0, f64::max)
    }

    /// Short opening-tag rendering used in assertion failure messages.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let Some(element) = self.element(node_id) else {
            return "<non-element>".to_string();
        };
        let mut out = format!("<{}", element.tag_name);
        let mut attrs = element.attrs.iter().collect::<Vec<_>>();
        attrs.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in attrs {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');
        out
    }
}
