//! Throwaway git repositories for integration tests.

#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Could not create parent dir");
        }
        fs::write(path, content).expect("Could not write file");
    }

    /// Write `name` and commit it with `message` on top of HEAD
    pub fn commit(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write(name, content);

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(name))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("Could not get sig");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD");
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .expect("Could not create tag");
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo
            .remote(name, url)
            .expect("Could not add remote");
    }

    pub fn head(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD")
            .id()
            .to_string()
    }
}
