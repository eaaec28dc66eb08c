//! Destination-indexed sort structure
//!
//! An unbalanced binary search tree keyed by destination name, stored as an arena of
//! nodes linked by index. Each node owns the bucket of parcels awaiting dispatch to
//! that destination, in the order they were sorted. Nodes are created on first use
//! and never pruned, so a destination may remain in the tree with an empty bucket.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::parcel::Parcel;
use crate::types::ParcelId;

type NodeIndex = usize;

#[derive(Debug, Clone)]
struct DestinationNode {
    name: String,
    bucket: VecDeque<Parcel>,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

impl DestinationNode {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), bucket: VecDeque::new(), left: None, right: None }
    }
}

/// Ordered index from destination name to its bucket of sorted parcels
#[derive(Debug, Clone, Default)]
pub struct DestinationSorter {
    nodes: Vec<DestinationNode>,
    root: Option<NodeIndex>,
}

impl DestinationSorter {
    /// Create an empty sorter
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parcel to the end of its destination's bucket, creating the node
    /// in lexicographic position if needed
    pub fn insert_parcel(&mut self, parcel: Parcel) {
        let index = self.find_or_create(parcel.destination());
        self.nodes[index].bucket.push_back(parcel);
    }

    /// Snapshot of a destination's bucket in sort order
    ///
    /// Unknown destinations yield an empty vector.
    pub fn city_parcels(&self, destination: &str) -> Vec<Parcel> {
        self.find(destination)
            .map(|index| self.nodes[index].bucket.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The earliest-sorted parcel waiting for `destination`
    pub fn front(&self, destination: &str) -> Option<&Parcel> {
        self.find(destination).and_then(|index| self.nodes[index].bucket.front())
    }

    /// Remove the first parcel with `parcel_id` from the destination's bucket
    pub fn remove_parcel(&mut self, destination: &str, parcel_id: ParcelId) -> Option<Parcel> {
        let index = self.find(destination)?;
        let bucket = &mut self.nodes[index].bucket;
        let position = bucket.iter().position(|p| p.id() == parcel_id)?;
        bucket.remove(position)
    }

    /// Number of parcels waiting for `destination`
    pub fn count_city_parcels(&self, destination: &str) -> usize {
        self.find(destination).map_or(0, |index| self.nodes[index].bucket.len())
    }

    /// Whether a node exists for `destination`
    pub fn contains(&self, destination: &str) -> bool {
        self.find(destination).is_some()
    }

    /// Height of the tree; an empty tree has height 0
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut pending: Vec<(NodeIndex, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((index, depth)) = pending.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[index];
            pending.extend(node.left.map(|child| (child, depth + 1)));
            pending.extend(node.right.map(|child| (child, depth + 1)));
        }

        max_depth
    }

    /// Number of destination nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total parcels across all buckets
    pub fn total_parcels(&self) -> usize {
        self.nodes.iter().map(|node| node.bucket.len()).sum()
    }

    /// Destination with the most waiting parcels
    ///
    /// Ties go to the destination met first in lexicographic order. Returns `None`
    /// when every bucket is empty.
    pub fn city_with_highest_load(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (name, count) in self.in_order() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name)
    }

    /// Destinations and their bucket sizes in lexicographic order
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { sorter: self, stack: Vec::new() };
        iter.push_left_spine(self.root);
        iter
    }

    fn find(&self, destination: &str) -> Option<NodeIndex> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match destination.cmp(node.name.as_str()) {
                Ordering::Equal => return Some(index),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn find_or_create(&mut self, destination: &str) -> NodeIndex {
        let Some(mut index) = self.root else {
            self.nodes.push(DestinationNode::new(destination));
            self.root = Some(0);
            return 0;
        };

        loop {
            let ordering = destination.cmp(self.nodes[index].name.as_str());
            let child = match ordering {
                Ordering::Equal => return index,
                Ordering::Less => self.nodes[index].left,
                Ordering::Greater => self.nodes[index].right,
            };

            match child {
                Some(next) => index = next,
                None => {
                    let created = self.nodes.len();
                    self.nodes.push(DestinationNode::new(destination));
                    if ordering == Ordering::Less {
                        self.nodes[index].left = Some(created);
                    } else {
                        self.nodes[index].right = Some(created);
                    }
                    return created;
                }
            }
        }
    }
}

/// In-order (lexicographic) traversal over `(destination, bucket size)`
#[derive(Debug)]
pub struct InOrder<'a> {
    sorter: &'a DestinationSorter,
    stack: Vec<NodeIndex>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut current: Option<NodeIndex>) {
        while let Some(index) = current {
            self.stack.push(index);
            current = self.sorter.nodes[index].left;
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let sorter = self.sorter;
        let node = &sorter.nodes[index];
        self.push_left_spine(node.right);
        Some((node.name.as_str(), node.bucket.len()))
    }
}
