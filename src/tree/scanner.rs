//! TreeScanner - lazy depth-first walk of a directory tree

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::analysis::{char_count, normalize_absolute};
use crate::error::{Error, Result};

use super::config::ScanConfig;
use super::entry::{Entry, EntryKind};
use super::filter::NameFilter;
use super::utils::{entry_name, truncate_name};

/// Walks a directory tree and yields one `Entry` per visited object.
///
/// Each directory is yielded first, followed by the subtrees of its
/// subdirectories and then its files. Children are sorted by name.
#[derive(Debug, Clone)]
pub struct TreeScanner {
    config: ScanConfig,
}

impl TreeScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Start a scan of `root`.
    ///
    /// The root is listed eagerly so an unreadable root fails here with
    /// `Error::NotAccessible`. Everything below it is read lazily as the
    /// returned iterator advances; failures there become error entries.
    pub fn scan(&self, root: &Path) -> Result<Scan> {
        let metadata = fs::metadata(root).map_err(|e| Error::not_accessible(root, e))?;
        if !metadata.is_dir() {
            return Err(Error::not_accessible(
                root,
                io::Error::new(io::ErrorKind::NotADirectory, "Not a directory"),
            ));
        }

        let absolute = normalize_absolute(root).map_err(|e| Error::not_accessible(root, e))?;
        let filter = NameFilter::new(&self.config);
        let listing = list_children(root, &absolute, &filter)
            .map_err(|e| Error::not_accessible(root, e))?;

        debug!("scanning {}", absolute.display());

        Ok(Scan {
            config: self.config.clone(),
            filter,
            root: absolute.clone(),
            stack: vec![Pending::Dir {
                node: Node {
                    path: root.to_path_buf(),
                    name: entry_name(&absolute),
                    absolute,
                },
                depth: 0,
                listing: Some(listing),
                descend: true,
            }],
        })
    }
}

/// A path together with its absolute form and raw name.
#[derive(Debug, Clone)]
struct Node {
    path: PathBuf,
    absolute: PathBuf,
    name: String,
}

impl Node {
    fn child(&self, name: String) -> Node {
        Node {
            path: self.path.join(&name),
            absolute: self.absolute.join(&name),
            name,
        }
    }
}

/// Children of one directory that passed the filter.
#[derive(Debug, Default)]
struct Listing {
    /// (name, descend) pairs; symlinked directories are listed but not entered
    dirs: Vec<(String, bool)>,
    files: Vec<String>,
    failures: Vec<io::Error>,
}

#[derive(Debug)]
enum Pending {
    Dir {
        node: Node,
        depth: usize,
        listing: Option<Listing>,
        descend: bool,
    },
    File {
        node: Node,
        depth: usize,
    },
    Failed {
        node: Node,
        depth: usize,
        error: io::Error,
    },
}

/// Lazy sequence of entries for one scan. Dropping it stops the walk; entries
/// already yielded stay valid.
#[derive(Debug)]
pub struct Scan {
    config: ScanConfig,
    filter: NameFilter,
    root: PathBuf,
    stack: Vec<Pending>,
}

impl Scan {
    /// Absolute root with `.` and `..` folded away.
    pub fn absolute_root(&self) -> &Path {
        &self.root
    }

    fn display_name(&self, name: &str, is_file: bool) -> String {
        if self.config.truncate_names {
            truncate_name(name, self.config.truncate_limit, is_file)
        } else {
            name.to_string()
        }
    }

    fn make_entry(&self, node: Node, depth: usize, kind: EntryKind) -> Entry {
        let name = self.display_name(&node.name, kind == EntryKind::File);
        Entry {
            absolute_length: char_count(&node.absolute),
            path: node.path,
            name,
            depth,
            kind,
            error: None,
        }
    }

    /// Queue the children of `node` so that they pop in display order:
    /// failures, then subdirectories, then files.
    fn push_children(&mut self, node: &Node, depth: usize, listing: Listing) {
        for name in listing.files.into_iter().rev() {
            self.stack.push(Pending::File {
                node: node.child(name),
                depth,
            });
        }
        for (name, descend) in listing.dirs.into_iter().rev() {
            self.stack.push(Pending::Dir {
                node: node.child(name),
                depth: depth + 1,
                listing: None,
                descend,
            });
        }
        for error in listing.failures.into_iter().rev() {
            self.stack.push(Pending::Failed {
                node: node.clone(),
                depth,
                error,
            });
        }
    }

    fn expand(&mut self, node: &Node, depth: usize, listing: Option<Listing>) {
        let listing = match listing {
            Some(listing) => Ok(listing),
            None => list_children(&node.path, &node.absolute, &self.filter),
        };
        match listing {
            Ok(listing) => self.push_children(node, depth, listing),
            Err(error) => self.stack.push(Pending::Failed {
                node: node.clone(),
                depth,
                error,
            }),
        }
    }
}

impl Iterator for Scan {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        match self.stack.pop()? {
            Pending::Dir {
                node,
                depth,
                listing,
                descend,
            } => {
                if descend {
                    self.expand(&node, depth, listing);
                }
                Some(self.make_entry(node, depth, EntryKind::Directory))
            }
            Pending::File { node, depth } => Some(self.make_entry(node, depth, EntryKind::File)),
            Pending::Failed { node, depth, error } => {
                let error = Error::EntryUnreadable {
                    path: node.path.clone(),
                    source: error,
                };
                warn!("{}", error);
                let mut entry = self.make_entry(node, depth, EntryKind::Error);
                entry.error = Some(error.to_string());
                Some(entry)
            }
        }
    }
}

/// Read one directory, drop filtered children, and sort the rest by name.
fn list_children(path: &Path, absolute: &Path, filter: &NameFilter) -> io::Result<Listing> {
    debug!("listing {}", absolute.display());

    let mut listing = Listing::default();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                listing.failures.push(e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                listing.failures.push(e);
                continue;
            }
        };

        // Symlinks to directories are shown as directories but never entered,
        // which keeps link cycles from recursing.
        let (is_dir, descend) = if file_type.is_symlink() {
            let target_is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
            (target_is_dir, false)
        } else {
            (file_type.is_dir(), true)
        };

        if is_dir {
            if filter.keeps_dir(&name) {
                listing.dirs.push((name, descend));
            }
        } else if filter.keeps_file(&name) {
            listing.files.push(name);
        }
    }

    listing.dirs.sort_by(|a, b| a.0.cmp(&b.0));
    listing.files.sort();
    Ok(listing)
}
