//! The in-memory element tree.
//!
//! Nodes live in an arena owned by [`DicomObject`]
//! and are addressed by [`NodeId`].
//! A parent owns the identifiers of its children,
//! while each child only keeps the identifier of its parent,
//! used for traversal.
//! The root and items key their children by tag,
//! sequences keep their items in order.

use crate::node::{DataElement, Item, Node};
use crate::{
    AccessByNameError, AccessError, DecodeElementSnafu, NoSuchAttributeNameSnafu,
    NoSuchDataElementAliasSnafu, NoSuchDataElementTagSnafu, NotAPrimitiveElementSnafu,
};
use dcmtree_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dcmtree_core::value::PrimitiveValue;
use dcmtree_core::{Length, Tag};
use dcmtree_encoding::codec::EncodeValueError;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// The identifier of a node in a [`DicomObject`].
///
/// Identifiers of discarded nodes stay invalid
/// even after their storage is reused by new nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// An error from an illegal operation on the element tree.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum TreeError {
    #[snafu(display("Items can only be inserted into a sequence with `add_item`"))]
    ItemViaAdd { backtrace: Backtrace },
    #[snafu(display("Node {:?} cannot hold data elements", parent))]
    NotADataSet { parent: NodeId, backtrace: Backtrace },
    #[snafu(display("Node {:?} is not a sequence", node))]
    NotASequence { node: NodeId, backtrace: Backtrace },
    #[snafu(display("Node {:?} is not an item", node))]
    NotAnItem { node: NodeId, backtrace: Backtrace },
    #[snafu(display("Node {:?} is not a data element", node))]
    NotAnElement { node: NodeId, backtrace: Backtrace },
    #[snafu(display("Node {:?} has no tag to change", node))]
    NotTagged { node: NodeId, backtrace: Backtrace },
    #[snafu(display("Item index {} is out of range for a sequence of {} items", index, len))]
    ItemIndexOutOfRange {
        index: usize,
        len: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("No node {:?} in this object", node))]
    NoSuchNode { node: NodeId, backtrace: Backtrace },
    #[snafu(display("Node {:?} cannot be moved into its own subtree", node))]
    CyclicAttach { node: NodeId, backtrace: Backtrace },
    #[snafu(display("The root node cannot be moved or discarded"))]
    RootNode { backtrace: Backtrace },
    #[snafu(display("Could not encode the value of element {}", tag))]
    EncodeValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncodeValueError,
    },
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;

/// The key of a child in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKey {
    /// A data element or sequence in a data set.
    Tag(Tag),
    /// An item in a sequence.
    Index(usize),
}

impl From<Tag> for ChildKey {
    fn from(tag: Tag) -> Self {
        ChildKey::Tag(tag)
    }
}

impl From<usize> for ChildKey {
    fn from(index: usize) -> Self {
        ChildKey::Index(index)
    }
}

#[derive(Debug, Clone)]
enum Children {
    Leaf,
    Keyed(BTreeMap<Tag, NodeId>),
    Indexed(Vec<NodeId>),
}

impl Children {
    fn for_node(node: &Node) -> Self {
        match node {
            Node::Element(_) => Children::Leaf,
            Node::Sequence(_) => Children::Indexed(Vec::new()),
            Node::Root | Node::Item(_) => Children::Keyed(BTreeMap::new()),
        }
    }

    fn len(&self) -> usize {
        match self {
            Children::Leaf => 0,
            Children::Keyed(m) => m.len(),
            Children::Indexed(v) => v.len(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: Children,
}

/// Arena storage, bumping its generation whenever the slot is freed.
#[derive(Debug, Clone)]
struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

/// A DICOM object held in memory as a tree of nodes.
///
/// # Example
///
/// ```
/// # use dcmtree_object::{DicomObject, DataElement, Item, Sequence};
/// # use dcmtree_core::{Tag, VR};
/// let mut obj = DicomObject::new();
/// obj.put(DataElement::new(Tag(0x0010, 0x0010), VR::PN, "Doe^John")?)?;
/// let seq = obj.put(Sequence::new(Tag(0x0008, 0x1140)))?;
/// let item = obj.add_item(seq, None, None)?;
/// obj.add(item, DataElement::new(Tag(0x0008, 0x1150), VR::UI, "1.2.3")?)?;
///
/// assert_eq!(obj.element(Tag(0x0010, 0x0010))?.to_str()?, "Doe^John");
/// assert_eq!(obj.count_all(obj.root()), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DicomObject {
    slots: Vec<Entry>,
    free: Vec<usize>,
}

impl Default for DicomObject {
    fn default() -> Self {
        DicomObject::new()
    }
}

impl DicomObject {
    const ROOT: NodeId = NodeId {
        index: 0,
        generation: 0,
    };

    /// Create an empty object.
    pub fn new() -> Self {
        DicomObject {
            slots: vec![Entry {
                generation: 0,
                slot: Some(Slot {
                    node: Node::Root,
                    parent: None,
                    children: Children::Keyed(BTreeMap::new()),
                }),
            }],
            free: Vec::new(),
        }
    }

    /// The root node of the object.
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.slots
            .get(id.index)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.slot.as_ref())
            .context(NoSuchNodeSnafu { node: id })
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot> {
        self.slots
            .get_mut(id.index)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.slot.as_mut())
            .context(NoSuchNodeSnafu { node: id })
    }

    /// Fetch a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slot(id).ok().map(|s| &s.node)
    }

    /// Fetch a node for modification.
    ///
    /// Changing a tag goes through [`retag`](Self::retag),
    /// since it re-keys the node in its parent.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slot_mut(id).ok().map(|s| &mut s.node)
    }

    /// The parent of a node, if it is attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).ok().and_then(|s| s.parent)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let slot = Slot {
            children: Children::for_node(&node),
            node,
            parent: None,
        };
        if let Some(index) = self.free.pop() {
            let entry = &mut self.slots[index];
            entry.slot = Some(slot);
            return NodeId {
                index,
                generation: entry.generation,
            };
        }
        self.slots.push(Entry {
            generation: 0,
            slot: Some(slot),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Create a node without attaching it anywhere.
    /// It can later be placed with [`attach`](Self::attach)
    /// or [`attach_item`](Self::attach_item).
    pub fn create(&mut self, node: impl Into<Node>) -> Result<NodeId> {
        let node = node.into();
        ensure!(!matches!(node, Node::Root), RootNodeSnafu);
        Ok(self.alloc(node))
    }

    /// Add a data element or sequence to the root or to an item.
    ///
    /// An existing node under the same tag is detached and discarded.
    /// Items are rejected,
    /// they are inserted with [`add_item`](Self::add_item) instead.
    pub fn add(&mut self, parent: NodeId, node: impl Into<Node>) -> Result<NodeId> {
        let node = node.into();
        ensure!(!node.is_item(), ItemViaAddSnafu);
        ensure!(!matches!(node, Node::Root), RootNodeSnafu);
        ensure!(
            self.slot(parent)?.node.holds_elements(),
            NotADataSetSnafu { parent }
        );
        let id = self.alloc(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Add an item to a sequence.
    ///
    /// With an index, the items at or after that position move up by one.
    /// Without one, the item is appended.
    /// Without an item, an empty one is created.
    pub fn add_item(
        &mut self,
        sequence: NodeId,
        item: Option<Item>,
        index: Option<usize>,
    ) -> Result<NodeId> {
        self.check_insert_index(sequence, index)?;
        let id = self.alloc(Node::Item(item.unwrap_or_default()));
        self.attach_item(sequence, id, index)?;
        Ok(id)
    }

    fn check_insert_index(&self, sequence: NodeId, index: Option<usize>) -> Result<()> {
        match &self.slot(sequence)?.children {
            Children::Indexed(items) => {
                if let Some(index) = index {
                    ensure!(
                        index <= items.len(),
                        ItemIndexOutOfRangeSnafu {
                            index,
                            len: items.len()
                        }
                    );
                }
                Ok(())
            }
            _ => NotASequenceSnafu { node: sequence }.fail(),
        }
    }

    /// Move an existing data element or sequence under a new parent,
    /// detaching it from its previous parent first.
    /// An existing node under the same tag is discarded.
    pub fn attach(&mut self, parent: NodeId, id: NodeId) -> Result<()> {
        ensure!(id != Self::ROOT, RootNodeSnafu);
        let tag = match &self.slot(id)?.node {
            Node::Element(e) => e.tag(),
            Node::Sequence(s) => s.tag(),
            Node::Item(_) => return ItemViaAddSnafu.fail(),
            Node::Root => return RootNodeSnafu.fail(),
        };
        ensure!(
            self.slot(parent)?.node.holds_elements(),
            NotADataSetSnafu { parent }
        );
        ensure!(!self.is_ancestor(id, parent), CyclicAttachSnafu { node: id });

        self.detach(id);
        self.make_structured(parent);
        let replaced = match &mut self.slot_mut(parent)?.children {
            Children::Keyed(map) => map.insert(tag, id),
            _ => None,
        };
        self.slot_mut(id)?.parent = Some(parent);
        if let Some(old) = replaced {
            self.free_subtree(old, true);
        }
        Ok(())
    }

    /// Move an existing item into a sequence,
    /// detaching it from its previous sequence first.
    pub fn attach_item(&mut self, sequence: NodeId, id: NodeId, index: Option<usize>) -> Result<()> {
        ensure!(self.slot(id)?.node.is_item(), NotAnItemSnafu { node: id });
        ensure!(!self.is_ancestor(id, sequence), CyclicAttachSnafu { node: id });
        self.detach(id);
        self.check_insert_index(sequence, index)?;
        if let Children::Indexed(items) = &mut self.slot_mut(sequence)?.children {
            match index {
                Some(index) => items.insert(index, id),
                None => items.push(id),
            }
        }
        self.slot_mut(id)?.parent = Some(sequence);
        Ok(())
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// An item receiving data elements stops being a fragment.
    fn make_structured(&mut self, parent: NodeId) {
        if let Ok(Slot {
            node: Node::Item(item),
            ..
        }) = self.slot_mut(parent)
        {
            if item.payload().is_some() {
                item.set_payload(None);
                item.set_length(Length::UNDEFINED);
            }
        }
    }

    /// Unlink a node from its parent, if any.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Ok(slot) = self.slot_mut(parent) {
            match &mut slot.children {
                Children::Keyed(map) => map.retain(|_, child| *child != id),
                Children::Indexed(items) => items.retain(|child| *child != id),
                Children::Leaf => {}
            }
        }
        if let Ok(slot) = self.slot_mut(id) {
            slot.parent = None;
        }
    }

    fn free_subtree(&mut self, id: NodeId, detach: bool) {
        if detach {
            self.detach(id);
        }
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.free_subtree(child, false);
        }
        if let Some(entry) = self.slots.get_mut(id.index) {
            if entry.generation == id.generation && entry.slot.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
    }

    /// Detach a child from its parent.
    ///
    /// The child stays in the object, detached,
    /// so that it can be attached elsewhere or [discarded](Self::discard).
    pub fn remove(&mut self, parent: NodeId, key: impl Into<ChildKey>) -> Option<NodeId> {
        let id = match key.into() {
            ChildKey::Tag(tag) => self.child(parent, tag)?,
            ChildKey::Index(index) => self.item(parent, index)?,
        };
        self.detach(id);
        Some(id)
    }

    /// Free a node and everything below it,
    /// detaching it from its parent first.
    pub fn discard(&mut self, id: NodeId) -> Result<()> {
        ensure!(id != Self::ROOT, RootNodeSnafu);
        self.slot(id)?;
        self.free_subtree(id, true);
        Ok(())
    }

    /// Change the tag of a data element or sequence,
    /// re-keying it in its parent.
    /// An existing node under the new tag is discarded.
    pub fn retag(&mut self, id: NodeId, tag: Tag) -> Result<()> {
        match &mut self.slot_mut(id)?.node {
            Node::Element(e) => e.set_tag(tag),
            Node::Sequence(s) => s.set_tag(tag),
            _ => return NotTaggedSnafu { node: id }.fail(),
        }
        if let Some(parent) = self.parent(id) {
            self.detach(id);
            self.attach(parent, id)?;
        }
        Ok(())
    }

    /// Turn an item into a fragment holding the given payload,
    /// discarding its children.
    pub fn set_payload(&mut self, item: NodeId, payload: Vec<u8>) -> Result<()> {
        ensure!(self.slot(item)?.node.is_item(), NotAnItemSnafu { node: item });
        let children: Vec<NodeId> = self.children(item).collect();
        for child in children {
            self.free_subtree(child, true);
        }
        if let Node::Item(i) = &mut self.slot_mut(item)?.node {
            i.set_payload(Some(payload));
        }
        Ok(())
    }

    /// Replace the value of a data element,
    /// re-encoding its binary.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<PrimitiveValue>) -> Result<()> {
        match &mut self.slot_mut(id)?.node {
            Node::Element(e) => {
                let tag = e.tag();
                e.set_value(value).context(EncodeValueSnafu { tag })
            }
            _ => NotAnElementSnafu { node: id }.fail(),
        }
    }

    /// Iterate over the children of a node:
    /// data elements and sequences in tag order,
    /// or the items of a sequence in index order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let (keyed, indexed) = match self.slot(id).map(|s| &s.children) {
            Ok(Children::Keyed(map)) => (Some(map.values()), None),
            Ok(Children::Indexed(items)) => (None, Some(items.iter())),
            _ => (None, None),
        };
        keyed
            .into_iter()
            .flatten()
            .chain(indexed.into_iter().flatten())
            .copied()
    }

    /// The number of direct children of a node.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.slot(id).map(|s| s.children.len()).unwrap_or(0)
    }

    /// Iterate over the data element children of a node.
    pub fn elements(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &DataElement)> + '_ {
        self.children(id)
            .filter_map(move |c| self.get(c).and_then(Node::as_element).map(|e| (c, e)))
    }

    /// Iterate over the sequence children of a node.
    pub fn sequences(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |c| self.get(*c).map_or(false, Node::is_sequence))
    }

    /// Iterate over the items of a sequence.
    pub fn items(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |c| self.get(*c).map_or(false, Node::is_item))
    }

    /// The child of a data set with the given tag.
    pub fn child(&self, parent: NodeId, tag: Tag) -> Option<NodeId> {
        match &self.slot(parent).ok()?.children {
            Children::Keyed(map) => map.get(&tag).copied(),
            _ => None,
        }
    }

    /// The item of a sequence at the given index.
    pub fn item(&self, sequence: NodeId, index: usize) -> Option<NodeId> {
        match &self.slot(sequence).ok()?.children {
            Children::Indexed(items) => items.get(index).copied(),
            _ => None,
        }
    }

    /// The position of an item in its sequence.
    pub fn item_index(&self, item: NodeId) -> Option<usize> {
        let parent = self.parent(item)?;
        match &self.slot(parent).ok()?.children {
            Children::Indexed(items) => items.iter().position(|i| *i == item),
            _ => None,
        }
    }

    /// The number of nodes below the given one, at any depth.
    pub fn count_all(&self, id: NodeId) -> usize {
        self.children(id).map(|c| 1 + self.count_all(c)).sum()
    }

    /// The topmost ancestor of a node:
    /// the root for an attached node,
    /// or the head of a detached subtree.
    pub fn top_parent(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Put a data element or sequence in the root data set.
    pub fn put(&mut self, node: impl Into<Node>) -> Result<NodeId> {
        self.add(Self::ROOT, node)
    }

    /// The root data element with the given tag.
    pub fn element(&self, tag: Tag) -> Result<&DataElement, AccessError> {
        let id = self
            .child(Self::ROOT, tag)
            .context(NoSuchDataElementTagSnafu { tag })?;
        self.get(id)
            .and_then(Node::as_element)
            .context(NotAPrimitiveElementSnafu { tag })
    }

    /// The value of the root data element with the given tag.
    pub fn value(&self, tag: Tag) -> Result<PrimitiveValue, AccessError> {
        self.element(tag)?
            .decoded()
            .context(DecodeElementSnafu { tag })
    }

    /// The root data element with the given attribute name,
    /// resolved through the given dictionary.
    pub fn element_by_name<D>(&self, name: &str, dict: &D) -> Result<&DataElement, AccessByNameError>
    where
        D: DataDictionary,
    {
        let tag = dict
            .by_name(name)
            .map(|e| e.tag())
            .context(NoSuchAttributeNameSnafu { name })?;
        self.element(tag)
            .map_err(|_| NoSuchDataElementAliasSnafu { tag, alias: name }.build())
    }

    /// Whether the subtree at `a` in this object
    /// equals the subtree at `b` in `other`.
    ///
    /// Nodes are compared by tag, VR, and value or children.
    /// Values are compared in little endian,
    /// so the same data read in different byte orders is equal.
    pub fn subtree_eq(&self, a: NodeId, other: &DicomObject, b: NodeId) -> bool {
        let (Some(x), Some(y)) = (self.get(a), other.get(b)) else {
            return false;
        };
        let same_node = match (x, y) {
            (Node::Root, Node::Root) => true,
            (Node::Element(x), Node::Element(y)) => {
                return x.tag() == y.tag()
                    && x.vr() == y.vr()
                    && x.canonical_bin() == y.canonical_bin();
            }
            (Node::Sequence(x), Node::Sequence(y)) => x.tag() == y.tag() && x.vr() == y.vr(),
            (Node::Item(x), Node::Item(y)) => x.payload() == y.payload(),
            _ => false,
        };
        same_node
            && self.child_count(a) == other.child_count(b)
            && self
                .children(a)
                .zip(other.children(b))
                .all(|(ca, cb)| self.subtree_eq(ca, other, cb))
    }

    fn hash_subtree<H: Hasher>(&self, id: NodeId, state: &mut H) {
        let Some(node) = self.get(id) else {
            return;
        };
        node.tag().hash(state);
        node.vr().hash(state);
        match node {
            Node::Element(e) => e.canonical_bin().hash(state),
            Node::Item(i) => i.payload().hash(state),
            _ => {}
        }
        self.child_count(id).hash(state);
        for child in self.children(id) {
            self.hash_subtree(child, state);
        }
    }
}

impl PartialEq for DicomObject {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root(), other, other.root())
    }
}

impl Eq for DicomObject {}

impl Hash for DicomObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_subtree(self.root(), state);
    }
}
