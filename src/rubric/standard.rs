//! The calculator-kata git workflow rubric
//!
//! Students build a small Kotlin calculator (`Calc.kt`) while practising
//! branching: a division feature that is first merged with a bug, reverted
//! and fixed, then `feature/suma` and `feature/resta` forked from the
//! initial commit and merged back with conflicts resolved.

use super::{Check, Rule};
use serde::{Deserialize, Serialize};

/// Every literal the standard rubric looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectations {
    pub principal_branch: String,
    pub division_branch: String,
    pub suma_branch: String,
    pub resta_branch: String,

    pub initial_commit: String,
    pub division_error_commit: String,
    pub division_commit: String,
    pub suma_commit: String,
    pub resta_commit: String,
    pub suma_conflict_commit: String,
    pub resta_conflict_commit: String,

    /// Source file checked in the working tree
    pub source_file: String,
    pub multiplica_signature: String,
    pub divide_error_signature: String,
    pub divide_guard: String,
    pub divide_dispatch: String,
    pub suma_signature: String,
    pub suma_dispatch: String,
    pub resta_signature: String,
    pub resta_dispatch: String,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            principal_branch: "main".into(),
            division_branch: "feature/division".into(),
            suma_branch: "feature/suma".into(),
            resta_branch: "feature/resta".into(),

            initial_commit: "Commit inicial".into(),
            division_error_commit: "Funcionalidad dividir con error".into(),
            division_commit: "Funcionalidad dividir sin error".into(),
            suma_commit: "Funcionalidad sumar".into(),
            resta_commit: "Funcionalidad restar".into(),
            suma_conflict_commit: "Conflicto suma resuelto".into(),
            resta_conflict_commit: "Conflicto resta resuelto".into(),

            source_file: "Calc.kt".into(),
            multiplica_signature: "fun multiplica(num1: Int, num2: Int): Int".into(),
            divide_error_signature: "fun divideE(num1: Int, num2: Int): Int".into(),
            divide_guard: "if (num2 == 0)".into(),
            divide_dispatch: r#""divide" -> divide(num1, num2)"#.into(),
            suma_signature: "fun suma(num1: Int, num2: Int): Int".into(),
            suma_dispatch: r#""suma" -> suma(num1, num2)"#.into(),
            resta_signature: "fun resta(num1: Int, num2: Int): Int".into(),
            resta_dispatch: r#""resta" -> resta(num1, num2)"#.into(),
        }
    }
}

fn rule(id: &str, points: u32, check: Check, success: String, failure: String) -> Rule {
    Rule {
        id: id.to_string(),
        points,
        success,
        failure,
        check,
    }
}

/// The twelve rules, in grading order.
pub(super) fn rules(e: &Expectations) -> Vec<Rule> {
    let file = |text: &str| Check::file_contains(&e.source_file, text);
    let commit = |message: &str| Check::CommitMessage(message.to_string());
    let merged = |branch: &str| Check::Merged(branch.to_string());
    let derives = |branch: &str| Check::DerivesFrom {
        branch: branch.to_string(),
        parent: e.principal_branch.clone(),
        anchor: e.initial_commit.clone(),
    };

    vec![
        rule(
            "repository",
            5,
            Check::RepositoryExists,
            "Repositorio local creado y vinculado.".into(),
            "Repositorio local no creado o no vinculado.".into(),
        ),
        rule(
            "initial-commit",
            10,
            Check::All(vec![
                commit(&e.initial_commit),
                file(&e.multiplica_signature),
            ]),
            "Commit inicial y codigo encontrado.".into(),
            "Commit inicial erroneo o codigo no encontrado.".into(),
        ),
        rule(
            "division-branch",
            5,
            Check::BranchExists(e.division_branch.clone()),
            format!("Rama '{}' encontrada.", e.division_branch),
            format!("Rama '{}' no encontrada.", e.division_branch),
        ),
        rule(
            "division-revert",
            15,
            Check::All(vec![
                Check::BranchExists(e.division_branch.clone()),
                Check::not(commit(&e.division_error_commit)),
                Check::not(file(&e.divide_error_signature)),
            ]),
            "Revocación de merge y commit.".into(),
            "Revocación de merge y commit erronea.".into(),
        ),
        rule(
            "division-fix",
            10,
            Check::All(vec![file(&e.divide_guard), file(&e.divide_dispatch)]),
            "División corregida con control de errores.".into(),
            "División no corregida o código incorrecto.".into(),
        ),
        rule(
            "division-merge",
            10,
            Check::All(vec![
                merged(&e.division_branch),
                commit(&e.division_commit),
            ]),
            format!("Merge final de '{}' encontrado.", e.division_branch),
            format!("Merge final de '{}' no encontrado.", e.division_branch),
        ),
        rule(
            "suma-branch",
            5,
            derives(&e.suma_branch),
            format!("Rama '{}' encontrada.", e.suma_branch),
            format!("Rama '{}' no encontrada o con origen erroneo.", e.suma_branch),
        ),
        rule(
            "resta-branch",
            5,
            derives(&e.resta_branch),
            format!("Rama '{}' encontrada.", e.resta_branch),
            format!("Rama '{}' no encontrada o con origen erroneo.", e.resta_branch),
        ),
        rule(
            "suma-feature",
            10,
            Check::All(vec![
                file(&e.suma_signature),
                file(&e.suma_dispatch),
                commit(&e.suma_commit),
            ]),
            "Función de suma añadida.".into(),
            "Función de suma no añadida o código incorrecto.".into(),
        ),
        rule(
            "resta-feature",
            10,
            Check::All(vec![
                file(&e.resta_signature),
                file(&e.resta_dispatch),
                commit(&e.resta_commit),
            ]),
            "Función de resta añadida.".into(),
            "Función de resta no añadida o código incorrecto.".into(),
        ),
        rule(
            "suma-merge",
            7,
            Check::All(vec![
                merged(&e.suma_branch),
                commit(&e.suma_conflict_commit),
            ]),
            format!("Merge de '{}' y conflicto resuelto encontrado.", e.suma_branch),
            format!("Merge de '{}' o conflicto resuelto no encontrado.", e.suma_branch),
        ),
        rule(
            "resta-merge",
            8,
            Check::All(vec![
                merged(&e.resta_branch),
                commit(&e.resta_conflict_commit),
            ]),
            format!("Merge de '{}' y conflicto resuelto encontrado.", e.resta_branch),
            format!("Merge de '{}' o conflicto resuelto no encontrado.", e.resta_branch),
        ),
    ]
}
