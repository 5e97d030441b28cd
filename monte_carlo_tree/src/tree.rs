//! An arena of nodes addressed by generational ids.
//!
//! Every node is owned by the arena. A node lists its children by id and
//! points back at its parent by id, so parent links never keep anything
//! alive and removing a subtree can never leave a dangling reference:
//! ids of removed nodes simply stop resolving.

/// Handle to a node in a [`Tree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Position of the node's slot in the arena.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// How many times the slot had been reused when this id was handed out.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Entry<T> {
    data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

#[derive(Debug)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    root: NodeId,
    len: usize,
}

impl<T> Tree<T> {
    /// Creates a tree holding only a root node.
    pub fn new_root(data: T) -> Self {
        let mut tree = Tree {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            len: 0,
        };

        tree.root = tree.allocate(data, None);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes.  Never zero, since the root can't be removed.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.entry(id).map(|e| &e.data)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.entry_mut(id).map(|e| &mut e.data)
    }

    /// Like [`Tree::get`], for ids that must be live.
    pub fn data(&self, id: NodeId) -> &T {
        self.get(id)
            .unwrap_or_else(|| panic!("{:?} does not refer to a live node", id))
    }

    /// Like [`Tree::get_mut`], for ids that must be live.
    pub fn data_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("{:?} does not refer to a live node", id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id)?.parent
    }

    /// Children of the node, in insertion order.  Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.entry(id) {
            Some(entry) => &entry.children,
            None => &[],
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    /// Adds a new node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, data: T) -> NodeId {
        assert!(
            self.contains(parent),
            "can't add a child under {:?}, which is not a live node",
            parent
        );

        let child = self.allocate(data, Some(parent));

        self.entry_mut(parent)
            .expect("parent was checked to be live")
            .children
            .push(child);

        child
    }

    /// Walks from the given node up through every ancestor to the root,
    /// starting with the node itself.
    pub fn path_to_root(&self, id: NodeId) -> PathToRoot<'_, T> {
        PathToRoot {
            tree: self,
            cursor: Some(id).filter(|&id| self.contains(id)),
        }
    }

    /// Number of edges between the node and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).count().saturating_sub(1)
    }

    /// Removes the node and everything beneath it, detaching it from its parent.
    /// The root can't be removed.
    ///
    /// Search builds a fresh tree per move and never calls this; it is here
    /// for callers that keep one tree across moves and prune what the chosen
    /// move made unreachable.
    pub fn remove_subtree(&mut self, id: NodeId) {
        assert!(id != self.root, "the root of a tree can't be removed");

        let parent = match self.entry(id) {
            Some(entry) => entry.parent,
            None => return,
        };

        if let Some(siblings) = parent.and_then(|p| self.entry_mut(p)) {
            siblings.children.retain(|&c| c != id);
        }

        let mut pending = vec![id];
        while let Some(cur) = pending.pop() {
            let slot = &mut self.slots[cur.index as usize];

            if let Some(entry) = slot.entry.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(cur.index);
                self.len -= 1;
                pending.extend(entry.children);
            }
        }
    }

    fn allocate(&mut self, data: T, parent: Option<NodeId>) -> NodeId {
        let entry = Entry {
            data,
            parent,
            children: Vec::new(),
        };

        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);

            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });

        NodeId {
            index,
            generation: 0,
        }
    }

    fn entry(&self, id: NodeId) -> Option<&Entry<T>> {
        let slot = self.slots.get(id.index as usize)?;

        if slot.generation != id.generation {
            return None;
        }

        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry<T>> {
        let slot = self.slots.get_mut(id.index as usize)?;

        if slot.generation != id.generation {
            return None;
        }

        slot.entry.as_mut()
    }
}

pub struct PathToRoot<'a, T> {
    tree: &'a Tree<T>,
    cursor: Option<NodeId>,
}

impl<'a, T> Iterator for PathToRoot<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cursor?;
        self.cursor = self.tree.parent(cur);

        Some(cur)
    }
}
