//! Record hierarchy derived from the flat record list.
//!
//! The remote list is flat. Nesting comes from `parent_id` first, then from
//! the first folder whose `children` lists the record; anything else hangs off
//! the implicit root. The derived tree is always a proper tree: dangling child
//! references are dropped, a record referenced by several folders is attached
//! once, and parent links that would form a cycle are ignored.

use super::record::{FileRecord, RecordId};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;

new_key_type! { pub struct NodeId; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    DuplicateId(RecordId),
    DanglingChild { parent: RecordId, child: RecordId },
    DuplicateReference { child: RecordId, parent: RecordId },
    Cycle(RecordId),
}

#[derive(Debug, Clone)]
struct Node {
    record: Option<RecordId>,
    name: String,
    is_folder: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: NodeId,
    pub record_id: RecordId,
    pub depth: u16,
    pub name: String,
    pub is_folder: bool,
    pub is_expanded: bool,
}

pub struct RecordTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    index: FxHashMap<RecordId, NodeId>,
    expanded: FxHashSet<RecordId>,
    issues: Vec<TreeIssue>,
}

impl Default for RecordTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTree {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node {
            record: None,
            name: String::from("root"),
            is_folder: true,
            parent: None,
            children: Vec::new(),
        });
        Self {
            arena,
            root,
            index: FxHashMap::default(),
            expanded: FxHashSet::default(),
            issues: Vec::new(),
        }
    }

    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut tree = Self::new();
        tree.rebuild(records);
        tree
    }

    /// Replaces the hierarchy. Expansion state survives for folders that still
    /// exist.
    pub fn rebuild(&mut self, records: &[FileRecord]) {
        self.arena.retain(|id, _| id == self.root);
        if let Some(root) = self.arena.get_mut(self.root) {
            root.children.clear();
        }
        self.index.clear();
        self.issues.clear();

        let mut kept: Vec<&FileRecord> = Vec::with_capacity(records.len());
        for record in records {
            if self.index.contains_key(&record.id) {
                tracing::warn!(id = %record.id, "duplicate record id ignored");
                self.issues.push(TreeIssue::DuplicateId(record.id.clone()));
                continue;
            }
            let node = self.arena.insert(Node {
                record: Some(record.id.clone()),
                name: record.name.clone(),
                is_folder: record.is_folder(),
                parent: None,
                children: Vec::new(),
            });
            self.index.insert(record.id.clone(), node);
            kept.push(record);
        }

        let parents = self.resolve_parents(&kept);

        for record in &kept {
            let Some(&node) = self.index.get(&record.id) else {
                continue;
            };
            let parent = parents
                .get(&record.id)
                .and_then(|p| self.index.get(p).copied())
                .unwrap_or(self.root);
            if let Some(n) = self.arena.get_mut(node) {
                n.parent = Some(parent);
            }
            if let Some(p) = self.arena.get_mut(parent) {
                p.children.push(node);
            }
        }

        let folders: FxHashSet<&RecordId> = kept
            .iter()
            .filter(|r| r.is_folder())
            .map(|r| &r.id)
            .collect();
        self.expanded.retain(|id| folders.contains(id));
    }

    fn resolve_parents(&mut self, records: &[&FileRecord]) -> FxHashMap<RecordId, RecordId> {
        let folders: FxHashSet<&RecordId> = records
            .iter()
            .filter(|r| r.is_folder())
            .map(|r| &r.id)
            .collect();

        let mut listed_by: FxHashMap<&RecordId, &RecordId> = FxHashMap::default();
        for folder in records.iter().filter(|r| r.is_folder()) {
            for child in folder.children() {
                if !self.index.contains_key(child) {
                    tracing::warn!(parent = %folder.id, child = %child, "dangling child reference");
                    self.issues.push(TreeIssue::DanglingChild {
                        parent: folder.id.clone(),
                        child: child.clone(),
                    });
                    continue;
                }
                if child == &folder.id {
                    self.issues.push(TreeIssue::Cycle(child.clone()));
                    continue;
                }
                if listed_by.contains_key(child) {
                    self.issues.push(TreeIssue::DuplicateReference {
                        child: child.clone(),
                        parent: folder.id.clone(),
                    });
                    continue;
                }
                listed_by.insert(child, &folder.id);
            }
        }

        let mut parents: FxHashMap<RecordId, RecordId> = FxHashMap::default();
        for record in records {
            let explicit = record
                .parent_id
                .as_ref()
                .filter(|p| *p != &record.id && folders.contains(p));
            let Some(parent) = explicit.or_else(|| listed_by.get(&record.id).copied()) else {
                continue;
            };

            if would_cycle(&parents, &record.id, parent, records.len()) {
                tracing::warn!(id = %record.id, parent = %parent, "parent link would form a cycle");
                self.issues.push(TreeIssue::Cycle(record.id.clone()));
                continue;
            }
            parents.insert(record.id.clone(), parent.clone());
        }
        parents
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn issues(&self) -> &[TreeIssue] {
        &self.issues
    }

    pub fn node(&self, id: &RecordId) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    pub fn record_id(&self, node: NodeId) -> Option<&RecordId> {
        self.arena.get(node).and_then(|n| n.record.as_ref())
    }

    pub fn is_folder(&self, id: &RecordId) -> bool {
        self.node(id)
            .and_then(|n| self.arena.get(n))
            .map(|n| n.is_folder)
            .unwrap_or(false)
    }

    /// `None` for top-level records and unknown ids.
    pub fn parent(&self, id: &RecordId) -> Option<&RecordId> {
        let node = self.arena.get(self.node(id)?)?;
        self.record_id(node.parent?)
    }

    pub fn children(&self, id: &RecordId) -> Vec<&RecordId> {
        let Some(node) = self.node(id).and_then(|n| self.arena.get(n)) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|&c| self.record_id(c))
            .collect()
    }

    pub fn top_level(&self) -> Vec<&RecordId> {
        self.arena
            .get(self.root)
            .map(|root| {
                root.children
                    .iter()
                    .filter_map(|&c| self.record_id(c))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &RecordId) -> bool {
        if !self.is_folder(id) {
            return false;
        }
        self.expanded.insert(id.clone())
    }

    pub fn collapse(&mut self, id: &RecordId) -> bool {
        self.expanded.remove(id)
    }

    pub fn toggle_expand(&mut self, id: &RecordId) -> bool {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expands every ancestor of `id` so its row becomes visible.
    pub fn reveal(&mut self, id: &RecordId) -> bool {
        let mut changed = false;
        let mut current = self.parent(id).cloned();
        let mut hops = 0usize;
        while let Some(parent) = current {
            changed |= self.expanded.insert(parent.clone());
            current = self.parent(&parent).cloned();
            hops += 1;
            if hops > self.index.len() {
                break;
            }
        }
        changed
    }

    pub fn flatten_for_view(&self) -> Vec<TreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = Vec::new();
        self.push_sorted_children(self.root, 0, &mut stack);

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            let Some(record_id) = node.record.clone() else {
                continue;
            };
            let is_expanded = node.is_folder && self.expanded.contains(&record_id);
            result.push(TreeRow {
                id,
                record_id,
                depth,
                name: node.name.clone(),
                is_folder: node.is_folder,
                is_expanded,
            });
            if is_expanded {
                self.push_sorted_children(id, depth.saturating_add(1), &mut stack);
            }
        }

        result
    }

    fn push_sorted_children(&self, id: NodeId, depth: u16, stack: &mut Vec<(NodeId, u16)>) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let mut children: Vec<(NodeId, &Node)> = node
            .children
            .iter()
            .filter_map(|&c| self.arena.get(c).map(|n| (c, n)))
            .collect();
        children.sort_by(|(_, a), (_, b)| match (a.is_folder, b.is_folder) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });
        // stack pops from the back
        for (child, _) in children.into_iter().rev() {
            stack.push((child, depth));
        }
    }
}

fn would_cycle(
    parents: &FxHashMap<RecordId, RecordId>,
    child: &RecordId,
    parent: &RecordId,
    limit: usize,
) -> bool {
    let mut current = Some(parent);
    let mut hops = 0usize;
    while let Some(id) = current {
        if id == child {
            return true;
        }
        current = parents.get(id);
        hops += 1;
        if hops > limit {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/models/record_tree.rs"]
mod tests;
