//! Repository fixtures shared by the integration tests.
//!
//! Repositories are written directly with git2 (explicit signatures and
//! parents) so the tests do not depend on a configured `git` binary.

#![allow(dead_code)]

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature};
use std::path::Path;
use tempfile::TempDir;

pub const CALC_INITIAL: &str = r#"fun multiplica(num1: Int, num2: Int): Int = num1 * num2

fun main(args: Array<String>) {
    val (operation, num1, num2) = parseArguments(args)
    val result = when (operation) {
        "multiplica" -> multiplica(num1, num2)
        else -> throw IllegalArgumentException("Operación no soportada")
    }
    showResult(operation, result)
}
"#;

pub const CALC_FINAL: &str = r#"fun multiplica(num1: Int, num2: Int): Int = num1 * num2

fun divide(num1: Int, num2: Int): Int {
    if (num2 == 0) throw IllegalArgumentException("División por cero")
    return num1 / num2
}

fun suma(num1: Int, num2: Int): Int = num1 + num2

fun resta(num1: Int, num2: Int): Int = num1 - num2

fun main(args: Array<String>) {
    val (operation, num1, num2) = parseArguments(args)
    val result = when (operation) {
        "multiplica" -> multiplica(num1, num2)
        "divide" -> divide(num1, num2)
        "suma" -> suma(num1, num2)
        "resta" -> resta(num1, num2)
        else -> throw IllegalArgumentException("Operación no soportada")
    }
    showResult(operation, result)
}
"#;

pub struct Fixture {
    pub dir: TempDir,
    pub repo: Repository,
}

/// Commit ids of the full exercise.
pub struct Exercise {
    pub initial: Oid,
    pub division: Oid,
    pub suma: Oid,
    pub resta: Oid,
    pub main: Oid,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("init repo");
        {
            let mut config = repo.config().expect("repo config");
            config.set_str("user.name", "Ada Student").expect("set user.name");
            config
                .set_str("user.email", "ada@example.com")
                .expect("set user.email");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit `Calc.kt` with the given parents; no ref is moved.
    pub fn commit(&self, message: &str, parents: &[Oid], calc: &str) -> Oid {
        let sig = Signature::now("Ada Student", "ada@example.com").expect("signature");
        let blob = self.repo.blob(calc.as_bytes()).expect("write blob");
        let mut builder = self.repo.treebuilder(None).expect("treebuilder");
        builder.insert("Calc.kt", blob, 0o100644).expect("insert blob");
        let tree = self
            .repo
            .find_tree(builder.write().expect("write tree"))
            .expect("find tree");
        let parent_commits: Vec<Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).expect("find parent"))
            .collect();
        let parent_refs: Vec<&Commit> = parent_commits.iter().collect();
        self.repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .expect("create commit")
    }

    pub fn branch(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/heads/{name}"), target, true, "fixture")
            .expect("write branch ref");
    }

    pub fn write_calc(&self, content: &str) {
        std::fs::write(self.dir.path().join("Calc.kt"), content).expect("write Calc.kt");
    }

    /// The exercise done right:
    ///
    /// ```text
    /// main:  C0 ---- M1 ---- M2 ---- M3
    ///         |\    /        /       /
    ///         | D1 (feature/division)
    ///         |\            /
    ///         | S1 (feature/suma)
    ///          \                   /
    ///           R1 (feature/resta)
    /// ```
    pub fn perfect() -> (Self, Exercise) {
        let f = Self::new();
        let initial = f.commit("Commit inicial", &[], CALC_INITIAL);
        let division = f.commit("Funcionalidad dividir sin error", &[initial], CALC_INITIAL);
        let m1 = f.commit(
            "Merge branch 'feature/division'",
            &[initial, division],
            CALC_INITIAL,
        );
        let suma = f.commit("Funcionalidad sumar", &[initial], CALC_INITIAL);
        let resta = f.commit("Funcionalidad restar", &[initial], CALC_INITIAL);
        let m2 = f.commit("Conflicto suma resuelto", &[m1, suma], CALC_INITIAL);
        let m3 = f.commit("Conflicto resta resuelto", &[m2, resta], CALC_FINAL);

        f.branch("main", m3);
        f.branch("feature/division", division);
        f.branch("feature/suma", suma);
        f.branch("feature/resta", resta);
        f.write_calc(CALC_FINAL);

        (
            f,
            Exercise {
                initial,
                division,
                suma,
                resta,
                main: m3,
            },
        )
    }

    /// Only the initial commit and `feature/suma` forked from it.
    pub fn started() -> Self {
        let f = Self::new();
        let initial = f.commit("Commit inicial", &[], CALC_INITIAL);
        let suma = f.commit("Funcionalidad sumar", &[initial], CALC_INITIAL);
        f.branch("main", initial);
        f.branch("feature/suma", suma);
        f.write_calc(CALC_INITIAL);
        f
    }
}
