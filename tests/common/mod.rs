#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use bitlog::ObjectId;
use bitlog::artifacts::objects::blob::Blob;
use bitlog::artifacts::objects::commit::Commit;
use bitlog::artifacts::objects::entry_mode::{EntryMode, FileMode};
use bitlog::artifacts::objects::object::{Object, Packable};
use bitlog::artifacts::objects::object_type::ObjectType;
use bitlog::artifacts::objects::signature::Signature;
use bitlog::artifacts::objects::tag::Tag;
use bitlog::artifacts::objects::tree::{Tree, TreeEntry};
use bytes::Bytes;
use chrono::DateTime;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use rstest::fixture;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A `.git` directory on disk, populated object by object
pub struct DiskRepository {
    dir: TempDir,
}

impl DiskRepository {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child(".git/objects")
            .create_dir_all()
            .expect("Failed to create objects dir");
        dir.child(".git/refs/heads")
            .create_dir_all()
            .expect("Failed to create refs dir");
        dir.child(".git/HEAD")
            .write_str("ref: refs/heads/main\n")
            .expect("Failed to write HEAD");

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git_dir(&self) -> PathBuf {
        self.dir.path().join(".git")
    }

    pub fn write_object(&self, object: &impl Object) -> ObjectId {
        let oid = object.object_id().expect("Failed to hash object");
        let path = self.git_dir().join("objects").join(oid.to_path());
        std::fs::create_dir_all(path.parent().expect("object path has a parent"))
            .expect("Failed to create object dir");

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&object.serialize().expect("Failed to serialize object"))
            .expect("Failed to compress object");
        std::fs::write(path, encoder.finish().expect("Failed to finish zlib stream"))
            .expect("Failed to write object");

        oid
    }

    /// Write a commit whose tree holds exactly `files`
    pub fn commit(
        &self,
        message: &str,
        epoch: i64,
        parents: &[ObjectId],
        files: &[(&str, &str)],
    ) -> ObjectId {
        let mut tree = Tree::new();
        for (name, content) in files {
            let blob_id = self.write_object(&Blob::new(Bytes::copy_from_slice(content.as_bytes())));
            tree = tree.with_entry(
                name.to_string(),
                TreeEntry::new(blob_id, EntryMode::File(FileMode::Regular)),
            );
        }
        let tree_id = self.write_object(&tree);
        let signature = random_signature(epoch);

        self.write_object(&Commit::new(
            tree_id,
            parents.to_vec(),
            signature.clone(),
            signature,
            message.to_string(),
        ))
    }

    pub fn set_branch(&self, name: &str, oid: &ObjectId) {
        self.dir
            .child(format!(".git/refs/heads/{name}"))
            .write_str(&format!("{oid}\n"))
            .expect("Failed to write branch");
    }

    /// Write an annotated tag of a commit and point `refs/tags/<name>` at it
    pub fn tag(&self, name: &str, target: &ObjectId) -> ObjectId {
        let tag_id = self.write_object(&Tag::new(
            *target,
            ObjectType::Commit,
            name.to_string(),
            Some(random_signature(9_000)),
            format!("Release {name}\n"),
        ));
        self.dir
            .child(format!(".git/refs/tags/{name}"))
            .write_str(&format!("{tag_id}\n"))
            .expect("Failed to write tag ref");

        tag_id
    }

    /// Write a file directly under `.git`, next to `HEAD`
    pub fn write_git_file(&self, name: &str, content: &str) {
        self.dir
            .child(format!(".git/{name}"))
            .write_str(content)
            .expect("Failed to write git file");
    }

    pub fn set_packed_refs(&self, refs: &[(&str, &ObjectId)]) {
        let mut content = String::from("# pack-refs with: peeled fully-peeled sorted\n");
        for (name, oid) in refs {
            content.push_str(&format!("{oid} {name}\n"));
        }

        self.dir
            .child(".git/packed-refs")
            .write_str(&content)
            .expect("Failed to write packed-refs");
    }
}

pub fn random_signature(epoch: i64) -> Signature {
    Signature::new(
        Name().fake(),
        SafeEmail().fake(),
        DateTime::from_timestamp(epoch, 0)
            .expect("valid timestamp")
            .fixed_offset(),
    )
}

/// Five commits on `main`, newest first in the returned ids
///
/// | # | message              | README.md | notes.txt |
/// |---|----------------------|-----------|-----------|
/// | 0 | Update README again  | v3        | b         |
/// | 1 | Fix typo in notes    | v2        | b         |
/// | 2 | Update README        | v2        | a         |
/// | 3 | Add notes            | v1        | a         |
/// | 4 | Initial commit       | v1        |           |
#[fixture]
pub fn linear_history() -> (DiskRepository, Vec<ObjectId>) {
    let repository = DiskRepository::new();

    let c1 = repository.commit("Initial commit", 1_000, &[], &[("README.md", "v1")]);
    let c2 = repository.commit(
        "Add notes",
        2_000,
        &[c1],
        &[("README.md", "v1"), ("notes.txt", "a")],
    );
    let c3 = repository.commit(
        "Update README",
        3_000,
        &[c2],
        &[("README.md", "v2"), ("notes.txt", "a")],
    );
    let c4 = repository.commit(
        "Fix typo in notes\n\nThe second paragraph\nspans two lines.",
        4_000,
        &[c3],
        &[("README.md", "v2"), ("notes.txt", "b")],
    );
    let c5 = repository.commit(
        "Update README again",
        5_000,
        &[c4],
        &[("README.md", "v3"), ("notes.txt", "b")],
    );
    repository.set_branch("main", &c5);

    (repository, vec![c5, c4, c3, c2, c1])
}

pub fn run_bitlog_command(repository: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlog").expect("Failed to find bitlog binary");
    cmd.arg("-C").arg(repository).arg("--color").arg("never");
    cmd.args(args);
    cmd.env_remove("BITLOG_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn oneline(oid: &ObjectId, summary: &str) -> String {
    format!("{} {}", oid.to_short_oid(), summary)
}
