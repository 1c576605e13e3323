//! Ordered walk over the ancestry of one commit
//!
//! ## Algorithm
//!
//! The walk discovers history on demand. Each commit record is fetched once,
//! when the first child naming it as a parent is expanded, and a commit is
//! expanded (its parents fetched) only after it has been emitted or when the
//! ordering below cannot be decided without it.
//!
//! - a commit is ready once every child seen so far has been emitted,
//! - the ready commit with the newest committer timestamp goes first,
//! - equal timestamps fall back to discovery order (parents in record order),
//! - a ready commit is held back while some unexpanded commit outside its
//!   known ancestry could still turn out to be one of its descendants; that
//!   commit is expanded first.
//!
//! A commit therefore never precedes one of its descendants, even when
//! committer clocks are skewed. On linear stretches of history nothing is
//! held back, so a consumer that stops after `n` commits fetches about `n`
//! records. Path filtering (and the tree diffs it needs) happens one commit at
//! a time as the walk is consumed.

use crate::areas::repository::Repository;
use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::log::path_filter::PathFilter;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::iter::FusedIterator;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct WalkState: u8 {
        const NONE = 0b0000;
        const SEEN = 0b0001;
        const QUEUED = 0b0010;
        const EXPANDED = 0b0100;
        const EMITTED = 0b1000;
    }
}

impl fmt::Debug for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(WalkState::SEEN) {
            flags.push("SEEN");
        }
        if self.contains(WalkState::QUEUED) {
            flags.push("QUEUED");
        }
        if self.contains(WalkState::EXPANDED) {
            flags.push("EXPANDED");
        }
        if self.contains(WalkState::EMITTED) {
            flags.push("EMITTED");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

#[derive(Debug)]
struct WalkNode {
    /// Taken out once the commit has been emitted
    commit: Option<Commit>,
    parent_ids: Vec<ObjectId>,
    timestamp: i64,
    discovery: usize,
    /// Expanded children that have not been emitted yet
    pending_children: usize,
    state: WalkState,
}

impl WalkNode {
    fn key(&self) -> (i64, Reverse<usize>) {
        (self.timestamp, Reverse(self.discovery))
    }
}

/// Heap key: newest first, then earliest discovered
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ReadyCommit {
    timestamp: i64,
    discovery: Reverse<usize>,
    oid: ObjectId,
}

#[derive(Debug, Default)]
struct Walk {
    nodes: HashMap<ObjectId, WalkNode>,
    /// May hold stale entries; `QUEUED` on the node is authoritative
    ready: BinaryHeap<ReadyCommit>,
    unexpanded: HashSet<ObjectId>,
    last_emitted: Option<ObjectId>,
}

impl Walk {
    fn start(repository: &Repository, start: &ObjectId) -> Result<Self> {
        let mut walk = Walk::default();
        walk.discover(repository.resolve(start)?);
        walk.enqueue(start);

        Ok(walk)
    }

    fn next_commit(&mut self, repository: &Repository) -> Result<Option<Commit>> {
        if let Some(oid) = self.last_emitted.take() {
            self.expand(repository, &oid)?;
        }

        loop {
            let Some(candidate) = self.peek_ready() else {
                let newest = self.newest(self.unexpanded.iter());
                match newest {
                    Some(oid) => {
                        self.expand(repository, &oid)?;
                        continue;
                    }
                    None => {
                        self.ensure_drained()?;
                        return Ok(None);
                    }
                }
            };

            match self.blocking_node(&candidate) {
                Some(oid) => {
                    tracing::trace!(candidate = %candidate, blocking = %oid, "expanding before emission");
                    self.expand(repository, &oid)?;
                }
                None => return self.emit(&candidate).map(Some),
            }
        }
    }

    fn discover(&mut self, commit: Commit) {
        let oid = *commit.id();
        self.nodes.insert(
            oid,
            WalkNode {
                parent_ids: commit.parent_ids().to_vec(),
                timestamp: commit.timestamp().timestamp(),
                discovery: self.nodes.len(),
                pending_children: 0,
                state: WalkState::SEEN,
                commit: Some(commit),
            },
        );
        self.unexpanded.insert(oid);
    }

    /// Fetch the parents of `oid` and count it as their child
    ///
    /// A commit that was already emitted no longer holds its parents back.
    fn expand(&mut self, repository: &Repository, oid: &ObjectId) -> Result<()> {
        let Some(node) = self.nodes.get_mut(oid) else {
            return Ok(());
        };
        if node.state.contains(WalkState::EXPANDED) {
            return Ok(());
        }
        node.state |= WalkState::EXPANDED;
        let child_emitted = node.state.contains(WalkState::EMITTED);
        let parent_ids = node.parent_ids.clone();
        self.unexpanded.remove(oid);

        for parent_id in parent_ids {
            match self.nodes.get(&parent_id).map(|parent| parent.state) {
                Some(state) if state.contains(WalkState::EMITTED) => {
                    return Err(cycle_error(&parent_id));
                }
                Some(_) => {
                    if !child_emitted && let Some(parent) = self.nodes.get_mut(&parent_id) {
                        parent.pending_children += 1;
                        parent.state.remove(WalkState::QUEUED);
                    }
                }
                None => {
                    self.discover(repository.resolve(&parent_id)?);
                    if child_emitted {
                        self.enqueue(&parent_id);
                    } else if let Some(parent) = self.nodes.get_mut(&parent_id) {
                        parent.pending_children = 1;
                    }
                }
            }
        }

        tracing::trace!(oid = %oid, discovered = self.nodes.len(), "expanded commit");
        Ok(())
    }

    fn enqueue(&mut self, oid: &ObjectId) {
        let Some(node) = self.nodes.get_mut(oid) else {
            return;
        };
        if node.pending_children > 0
            || node.state.intersects(WalkState::QUEUED | WalkState::EMITTED)
        {
            return;
        }

        node.state |= WalkState::QUEUED;
        self.ready.push(ReadyCommit {
            timestamp: node.timestamp,
            discovery: Reverse(node.discovery),
            oid: *oid,
        });
    }

    /// The best ready commit, dropping stale heap entries on the way
    fn peek_ready(&mut self) -> Option<ObjectId> {
        loop {
            let top = self.ready.peek()?;
            let valid = self.nodes.get(&top.oid).is_some_and(|node| {
                node.state.contains(WalkState::QUEUED) && !node.state.contains(WalkState::EMITTED)
            });
            if valid {
                return Some(top.oid);
            }
            self.ready.pop();
        }
    }

    /// An unexpanded commit that might still be a descendant of `candidate`
    ///
    /// Only unexpanded commits hide undiscovered history. Those reachable from
    /// `candidate` are its ancestors and cannot hold it back.
    fn blocking_node(&self, candidate: &ObjectId) -> Option<ObjectId> {
        if self.unexpanded.iter().all(|oid| oid == candidate) {
            return None;
        }

        let ancestors = self.known_ancestors(candidate);
        self.newest(
            self.unexpanded
                .iter()
                .filter(|oid| *oid != candidate && !ancestors.contains(*oid)),
        )
    }

    fn known_ancestors(&self, oid: &ObjectId) -> HashSet<ObjectId> {
        let mut ancestors = HashSet::new();
        let mut queue = VecDeque::from([*oid]);

        while let Some(oid) = queue.pop_front() {
            let Some(node) = self.nodes.get(&oid) else {
                continue;
            };
            for parent_id in &node.parent_ids {
                let unemitted = self
                    .nodes
                    .get(parent_id)
                    .is_some_and(|parent| !parent.state.contains(WalkState::EMITTED));
                if unemitted && ancestors.insert(*parent_id) {
                    queue.push_back(*parent_id);
                }
            }
        }

        ancestors
    }

    fn newest<'a>(&self, oids: impl Iterator<Item = &'a ObjectId>) -> Option<ObjectId> {
        oids.filter_map(|oid| self.nodes.get(oid).map(|node| (node.key(), *oid)))
            .max_by_key(|(key, _)| *key)
            .map(|(_, oid)| oid)
    }

    fn emit(&mut self, oid: &ObjectId) -> Result<Commit> {
        self.ready.pop();
        let node = self.nodes.get_mut(oid).ok_or_else(|| cycle_error(oid))?;
        let commit = node.commit.take().ok_or_else(|| cycle_error(oid))?;
        node.state.remove(WalkState::QUEUED);
        node.state |= WalkState::EMITTED;

        if node.state.contains(WalkState::EXPANDED) {
            for parent_id in commit.parent_ids() {
                if let Some(parent) = self.nodes.get_mut(parent_id) {
                    parent.pending_children = parent.pending_children.saturating_sub(1);
                }
                self.enqueue(parent_id);
            }
        }
        self.last_emitted = Some(*oid);

        Ok(commit)
    }

    /// Commits left behind once nothing is ready can only sit on a parent cycle
    fn ensure_drained(&self) -> Result<()> {
        match self
            .nodes
            .iter()
            .find(|(_, node)| !node.state.contains(WalkState::EMITTED))
        {
            Some((oid, node)) => Err(HistoryError::parse(
                "parent",
                format!("commit {oid} is part of a parent cycle ({:?})", node.state),
            )),
            None => Ok(()),
        }
    }
}

fn cycle_error(oid: &ObjectId) -> HistoryError {
    HistoryError::parse("parent", format!("commit {oid} is part of a parent cycle"))
}

/// Lazy, restartable walk over the history reachable from one commit
///
/// Yields `Result<Commit>`; the first error ends the walk. Building a new
/// `RevList` restarts from the start commit.
pub struct RevList<'r> {
    repository: &'r Repository,
    start: ObjectId,
    path_filter: PathFilter,
    walk: Option<Walk>,
    finished: bool,
}

impl<'r> RevList<'r> {
    pub fn new(repository: &'r Repository, start: ObjectId, path_filter: PathFilter) -> Self {
        Self {
            repository,
            start,
            path_filter,
            walk: None,
            finished: false,
        }
    }

    fn next_commit(&mut self) -> Result<Option<Commit>> {
        if self.walk.is_none() {
            self.walk = Some(Walk::start(self.repository, &self.start)?);
        }
        let Some(walk) = self.walk.as_mut() else {
            return Ok(None);
        };

        while let Some(commit) = walk.next_commit(self.repository)? {
            if self.path_filter.matches(self.repository.store(), &commit)? {
                tracing::trace!(oid = %commit.id(), "emitting commit");
                return Ok(Some(commit));
            }
        }

        tracing::debug!(start = %self.start, commits = walk.nodes.len(), "walk finished");
        Ok(None)
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_commit() {
            Ok(Some(commit)) => Some(Ok(commit)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for RevList<'_> {}
