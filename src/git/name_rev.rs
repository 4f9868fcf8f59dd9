//! Revision names in the style of `git name-rev`
//!
//! libgit2 has no `name-rev`, so the names are derived here by walking the
//! history from every branch, tag and remote-tracking ref. A commit reached
//! through first parents is named `tip~N`; a commit reached through the
//! k-th parent of a merge is named `<merge name>^k`. When several refs reach
//! the same commit, tag names win over branch names, then the name with the
//! shortest weighted distance wins, then the name from the older tip.

use git2::{ObjectType, Oid, ReferenceType, Repository};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Cost of stepping into a non-first parent, so that first-parent chains
/// are always preferred over names that cross a merge.
const MERGE_TRAVERSAL_WEIGHT: u64 = 65_535;

/// A commit's name relative to one ref tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionName {
    /// Tip name, e.g. `feature/suma`, `tags/v1` or `main~2^2`
    pub tip: String,
    /// Number of first-parent steps below `tip`
    pub generation: u32,
    /// Weighted distance from the ref, used to pick between candidates
    pub distance: u64,
    /// Whether the name was derived from a tag
    pub from_tag: bool,
    /// Tagger date for annotated tags, commit date of the tip otherwise
    pub tip_date: i64,
    /// Tip is an annotated tag peeled to its commit (rendered with `^0`)
    peeled: bool,
}

impl RevisionName {
    fn tip(tip: String, from_tag: bool, tip_date: i64, peeled: bool) -> Self {
        Self {
            tip,
            generation: 0,
            distance: 0,
            from_tag,
            tip_date,
            peeled,
        }
    }

    fn is_better_than(&self, other: &RevisionName) -> bool {
        if self.from_tag != other.from_tag {
            return self.from_tag;
        }
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        self.tip_date < other.tip_date
    }

    /// Name of this commit's `n`-th parent (1-based).
    fn for_parent(&self, n: usize) -> RevisionName {
        if n == 1 {
            return RevisionName {
                tip: self.tip.clone(),
                generation: self.generation + 1,
                distance: self.distance + 1,
                from_tag: self.from_tag,
                tip_date: self.tip_date,
                peeled: self.peeled,
            };
        }
        let base = if self.generation > 0 {
            format!("{}~{}", self.tip, self.generation)
        } else {
            self.tip.clone()
        };
        RevisionName {
            tip: format!("{base}^{n}"),
            generation: 0,
            distance: self.distance + MERGE_TRAVERSAL_WEIGHT,
            from_tag: self.from_tag,
            tip_date: self.tip_date,
            peeled: false,
        }
    }
}

impl fmt::Display for RevisionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.generation, self.peeled) {
            (0, true) => write!(f, "{}^0", self.tip),
            (0, false) => write!(f, "{}", self.tip),
            (generation, _) => write!(f, "{}~{}", self.tip, generation),
        }
    }
}

/// Best known name for every commit reachable from a ref.
#[derive(Debug, Default)]
pub struct RevisionNames {
    names: HashMap<Oid, RevisionName>,
}

impl RevisionNames {
    /// Name every commit reachable from `refs/heads`, `refs/tags` and `refs/remotes`.
    pub fn compute(repo: &Repository) -> Result<Self, git2::Error> {
        let mut names = HashMap::new();
        for (oid, name) in collect_tips(repo)? {
            name_from_tip(repo, &mut names, oid, name)?;
        }
        debug!("Named {} commits", names.len());
        Ok(Self { names })
    }

    pub fn get(&self, oid: Oid) -> Option<&RevisionName> {
        self.names.get(&oid)
    }

    /// Rendered name, e.g. `main~2` or `feature/resta`.
    pub fn name_of(&self, oid: Oid) -> Option<String> {
        self.get(oid).map(ToString::to_string)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Ref tips, tags first and then oldest first, as `git name-rev` orders
/// them. Ref names break the remaining ties so every run agrees.
fn collect_tips(repo: &Repository) -> Result<Vec<(Oid, RevisionName)>, git2::Error> {
    let mut tips = Vec::new();

    for reference in repo.references()? {
        let reference = reference?;
        if reference.kind() == Some(ReferenceType::Symbolic) {
            continue;
        }
        let Some(full_name) = reference.name() else {
            continue;
        };
        let (display, from_tag) = if let Some(name) = full_name.strip_prefix("refs/heads/") {
            (name.to_string(), false)
        } else if let Some(name) = full_name.strip_prefix("refs/tags/") {
            (format!("tags/{name}"), true)
        } else if let Some(name) = full_name.strip_prefix("refs/remotes/") {
            (format!("remotes/{name}"), false)
        } else {
            continue;
        };
        let Some(target) = reference.target() else {
            continue;
        };

        let object = repo.find_object(target, None)?;
        let peeled = object.kind() == Some(ObjectType::Tag);
        let tagger_date = object
            .as_tag()
            .and_then(|tag| tag.tagger().map(|sig| sig.when().seconds()));
        // Tags may point at trees or blobs; those name nothing.
        let Ok(commit) = object.peel_to_commit() else {
            continue;
        };
        let tip_date = tagger_date.unwrap_or_else(|| commit.time().seconds());
        tips.push((
            full_name.to_string(),
            commit.id(),
            RevisionName::tip(display, from_tag, tip_date, peeled),
        ));
    }

    tips.sort_by(|(a_ref, _, a), (b_ref, _, b)| {
        b.from_tag
            .cmp(&a.from_tag)
            .then(a.tip_date.cmp(&b.tip_date))
            .then_with(|| a_ref.cmp(b_ref))
    });
    Ok(tips.into_iter().map(|(_, oid, name)| (oid, name)).collect())
}

fn name_from_tip(
    repo: &Repository,
    names: &mut HashMap<Oid, RevisionName>,
    tip: Oid,
    name: RevisionName,
) -> Result<(), git2::Error> {
    let mut stack = vec![(tip, name)];

    while let Some((oid, candidate)) = stack.pop() {
        if let Some(existing) = names.get(&oid) {
            if !candidate.is_better_than(existing) {
                continue;
            }
        }

        let commit = repo.find_commit(oid)?;
        let parents: Vec<Oid> = commit.parent_ids().collect();
        // Reverse so the first parent is popped (and named) first.
        for (idx, parent) in parents.iter().enumerate().rev() {
            stack.push((*parent, candidate.for_parent(idx + 1)));
        }
        names.insert(oid, candidate);
    }

    Ok(())
}
