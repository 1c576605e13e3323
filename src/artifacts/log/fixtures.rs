use crate::areas::memory::MemoryStore;
use crate::areas::repository::Repository;
use crate::areas::store::ObjectStore;
use crate::artifacts::core::error::Result;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::signature::Signature;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use bytes::Bytes;
use chrono::DateTime;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builds commit graphs in memory, one commit per call
pub struct HistoryBuilder {
    store: MemoryStore,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Store a commit whose tree holds exactly `files`
    pub fn commit(
        &self,
        message: &str,
        epoch: i64,
        parents: &[ObjectId],
        files: &[(&str, &str)],
    ) -> ObjectId {
        let tree_id = self.tree(files);
        let signature = Self::signature(epoch);

        self.store
            .insert(&Commit::new(
                tree_id,
                parents.to_vec(),
                signature.clone(),
                signature,
                message.to_string(),
            ))
            .unwrap()
    }

    pub fn tree(&self, files: &[(&str, &str)]) -> ObjectId {
        let mut tree = Tree::new();
        for (name, content) in files {
            let blob_id = self
                .store
                .insert(&Blob::new(Bytes::copy_from_slice(content.as_bytes())))
                .unwrap();
            tree = tree.with_entry(
                name.to_string(),
                TreeEntry::new(blob_id, EntryMode::File(FileMode::Regular)),
            );
        }

        self.store.insert(&tree).unwrap()
    }

    /// Store an annotated tag and point `refs/tags/<name>` at it
    pub fn tag(&self, name: &str, target: ObjectId, target_type: ObjectType) -> ObjectId {
        let tag_id = self
            .store
            .insert(&Tag::new(
                target,
                target_type,
                name.to_string(),
                Some(Self::signature(1_800_000_000)),
                format!("Release {name}"),
            ))
            .unwrap();
        self.store.set_ref(format!("refs/tags/{name}"), tag_id);

        tag_id
    }

    pub fn signature(epoch: i64) -> Signature {
        Signature::new(
            Name().fake(),
            SafeEmail().fake(),
            DateTime::from_timestamp(epoch, 0).unwrap().fixed_offset(),
        )
    }

    pub fn build(self) -> Repository {
        Repository::with_store(self.store)
    }

    /// Repository whose store counts object loads and `diff_touches_path` calls
    pub fn build_counting(self) -> (Repository, Arc<StoreCounters>) {
        let counters = Arc::new(StoreCounters::default());
        let store = CountingStore {
            inner: self.store,
            counters: counters.clone(),
        };

        (Repository::with_store(store), counters)
    }
}

/// Linear history of six commits, newest first in the returned ids
///
/// `notes.txt` appears in the fourth commit and never changes afterwards, so
/// it is touched by exactly one commit (index 2 of the returned ids). `HEAD`
/// and `refs/heads/main` point at the newest commit.
pub fn six_commit_history() -> (Repository, Vec<ObjectId>) {
    let builder = HistoryBuilder::new();
    let mut ids: Vec<ObjectId> = Vec::new();

    for n in 1..=6_i64 {
        let readme = format!("version {n}");
        let parents: Vec<ObjectId> = ids.last().copied().into_iter().collect();
        let mut files = vec![("README.md", readme.as_str())];
        if n >= 4 {
            files.push(("notes.txt", "meeting notes"));
        }

        let id = builder.commit(&format!("commit {n}"), 1_700_000_000 + n * 60, &parents, &files);
        ids.push(id);
    }
    ids.reverse();
    builder.store().set_ref("HEAD", ids[0]);
    builder.store().set_ref("refs/heads/main", ids[0]);

    (builder.build(), ids)
}

#[derive(Debug, Default)]
pub struct StoreCounters {
    loads: AtomicUsize,
    diffs: AtomicUsize,
}

impl StoreCounters {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn diffs(&self) -> usize {
        self.diffs.load(Ordering::SeqCst)
    }
}

struct CountingStore {
    inner: MemoryStore,
    counters: Arc<StoreCounters>,
}

impl ObjectStore for CountingStore {
    fn load(&self, oid: &ObjectId) -> Result<Bytes> {
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(oid)
    }

    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        self.inner.read_ref(name)
    }

    fn diff_touches_path(
        &self,
        commit_oid: &ObjectId,
        parent_oid: Option<&ObjectId>,
        path: &Path,
    ) -> Result<bool> {
        self.counters.diffs.fetch_add(1, Ordering::SeqCst);
        self.inner.diff_touches_path(commit_oid, parent_oid, path)
    }
}
