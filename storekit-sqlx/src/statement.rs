//! Statement assembly for the repository operations.
//!
//! Builds the exact SQL each operation needs from a [`Record`]'s metadata and
//! a condition set. Condition fragments are emitted as written by the caller;
//! the only rewriting done here is rendering `?` placeholders into the active
//! dialect's style. Fragments are joined with `AND`, each wrapped in
//! parentheses so a fragment containing `OR` keeps its meaning.

use crate::dialect::Dialect;
use storekit_core::{Condition, Record, Value};

pub(crate) struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Render a condition fragment, replacing each `?` outside single-quoted
/// literals with the dialect placeholder at the running index.
fn render_fragment(expr: &str, dialect: Dialect, index: &mut usize) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut in_literal = false;
    for ch in expr.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                out.push_str(&dialect.placeholder(*index));
                *index += 1;
            }
            _ => out.push(ch),
        }
    }
    out
}

fn where_clause<T: Record>(
    dialect: Dialect,
    conds: &[Condition],
    params: &mut Vec<Value>,
    index: &mut usize,
) -> String {
    let mut clauses = Vec::with_capacity(conds.len() + 1);
    for cond in conds {
        let rendered = render_fragment(cond.expr(), dialect, index);
        clauses.push(format!("({rendered})"));
        params.extend(cond.params().iter().cloned());
    }
    if let Some(marker) = T::deleted_at_column() {
        clauses.push(format!("{marker} IS NULL"));
    }
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

pub(crate) fn select<T: Record>(dialect: Dialect, conds: &[Condition], first: bool) -> Statement {
    let mut params = Vec::new();
    let mut index = 1;
    let filter = where_clause::<T>(dialect, conds, &mut params, &mut index);
    let mut sql = format!(
        "SELECT {} FROM {}{}",
        T::columns().join(", "),
        T::table_name(),
        filter
    );
    if first {
        sql.push_str(&format!(" ORDER BY {} ASC LIMIT 1", T::id_column()));
    }
    Statement { sql, params }
}

pub(crate) fn insert<T: Record>(dialect: Dialect, record: &T, returning: bool) -> Statement {
    let with_id = record.id_is_set();
    let mut cols = Vec::new();
    let mut params = Vec::new();
    for (col, value) in T::columns().iter().zip(record.values()) {
        if *col == T::id_column() && !with_id {
            continue;
        }
        cols.push(*col);
        params.push(value);
    }
    let placeholders = (1..=cols.len())
        .map(|i| dialect.placeholder(i))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::table_name(),
        cols.join(", "),
        placeholders
    );
    if returning {
        sql.push_str(&format!(" RETURNING {}", T::columns().join(", ")));
    }
    Statement { sql, params }
}

/// Multi-row insert. The id column is included only when every record carries
/// an identity; otherwise it is omitted and the store assigns all of them.
pub(crate) fn insert_batch<T: Record>(dialect: Dialect, records: &[T]) -> Statement {
    let with_id = records.iter().all(|r| r.id_is_set());
    let cols: Vec<&str> = T::columns()
        .iter()
        .copied()
        .filter(|col| with_id || *col != T::id_column())
        .collect();
    let mut params = Vec::new();
    let mut rows = Vec::with_capacity(records.len());
    let mut index = 1;
    for record in records {
        let mut placeholders = Vec::with_capacity(cols.len());
        for (col, value) in T::columns().iter().zip(record.values()) {
            if *col == T::id_column() && !with_id {
                continue;
            }
            placeholders.push(dialect.placeholder(index));
            index += 1;
            params.push(value);
        }
        rows.push(format!("({})", placeholders.join(", ")));
    }
    let sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        T::table_name(),
        cols.join(", "),
        rows.join(", ")
    );
    Statement { sql, params }
}

pub(crate) fn update<T: Record>(dialect: Dialect, record: &T) -> Statement {
    let mut sets = Vec::new();
    let mut params = Vec::new();
    let mut index = 1;
    for (col, value) in T::columns().iter().zip(record.values()) {
        if *col == T::id_column() {
            continue;
        }
        sets.push(format!("{col} = {}", dialect.placeholder(index)));
        index += 1;
        params.push(value);
    }
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        T::table_name(),
        sets.join(", "),
        T::id_column(),
        dialect.placeholder(index)
    );
    params.push(record.id().clone().into());
    Statement { sql, params }
}

pub(crate) fn delete<T: Record>(dialect: Dialect, record: &T) -> Statement {
    let id_placeholder = dialect.placeholder(1);
    let params = vec![record.id().clone().into()];
    let sql = match T::deleted_at_column() {
        Some(marker) => format!(
            "UPDATE {} SET {marker} = CURRENT_TIMESTAMP WHERE {} = {id_placeholder} AND {marker} IS NULL",
            T::table_name(),
            T::id_column()
        ),
        None => format!(
            "DELETE FROM {} WHERE {} = {id_placeholder}",
            T::table_name(),
            T::id_column()
        ),
    };
    Statement { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User {
        id: i64,
        name: String,
        email: String,
    }

    impl Record for User {
        type Id = i64;

        fn table_name() -> &'static str {
            "users"
        }

        fn columns() -> &'static [&'static str] {
            &["id", "name", "email"]
        }

        fn values(&self) -> Vec<Value> {
            vec![
                self.id.into(),
                self.name.clone().into(),
                self.email.clone().into(),
            ]
        }

        fn id(&self) -> &i64 {
            &self.id
        }
    }

    struct Post {
        id: i64,
        title: String,
        deleted_at: Option<String>,
    }

    impl Record for Post {
        type Id = i64;

        fn table_name() -> &'static str {
            "posts"
        }

        fn columns() -> &'static [&'static str] {
            &["id", "title", "deleted_at"]
        }

        fn values(&self) -> Vec<Value> {
            vec![
                self.id.into(),
                self.title.clone().into(),
                self.deleted_at.clone().into(),
            ]
        }

        fn id(&self) -> &i64 {
            &self.id
        }

        fn deleted_at_column() -> Option<&'static str> {
            Some("deleted_at")
        }
    }

    #[test]
    fn test_select_all() {
        let stmt = select::<User>(Dialect::Sqlite, &[], false);
        assert_eq!(stmt.sql, "SELECT id, name, email FROM users");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_select_first_orders_by_id() {
        let stmt = select::<User>(Dialect::Sqlite, &[Condition::eq("name", "a")], true);
        assert_eq!(
            stmt.sql,
            "SELECT id, name, email FROM users WHERE (name = ?) ORDER BY id ASC LIMIT 1"
        );
        assert_eq!(stmt.params, vec![Value::Text("a".into())]);
    }

    #[test]
    fn test_select_skips_soft_deleted() {
        let stmt = select::<Post>(Dialect::Sqlite, &[], false);
        assert_eq!(
            stmt.sql,
            "SELECT id, title, deleted_at FROM posts WHERE deleted_at IS NULL"
        );
    }

    #[test]
    fn test_postgres_placeholders_run_across_fragments() {
        let conds = [
            Condition::eq("name", "a"),
            Condition::raw_with("email = ? OR email = ?", [Value::from("x"), Value::from("y")]),
        ];
        let stmt = select::<User>(Dialect::Postgres, &conds, false);
        assert_eq!(
            stmt.sql,
            "SELECT id, name, email FROM users WHERE (name = $1) AND (email = $2 OR email = $3)"
        );
        assert_eq!(stmt.params.len(), 3);
    }

    #[test]
    fn test_placeholder_inside_literal_kept() {
        let conds = [Condition::raw_with("name = '?' OR name = ?", [Value::from("a")])];
        let stmt = select::<User>(Dialect::Postgres, &conds, false);
        assert_eq!(
            stmt.sql,
            "SELECT id, name, email FROM users WHERE (name = '?' OR name = $1)"
        );
    }

    #[test]
    fn test_insert_omits_unset_id() {
        let user = User {
            id: 0,
            name: "a".into(),
            email: "a@b.com".into(),
        };
        let stmt = insert(Dialect::Sqlite, &user, true);
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (name, email) VALUES (?, ?) RETURNING id, name, email"
        );
        assert_eq!(stmt.params.len(), 2);
    }

    #[test]
    fn test_insert_keeps_set_id() {
        let user = User {
            id: 7,
            name: "a".into(),
            email: "a@b.com".into(),
        };
        let stmt = insert(Dialect::Postgres, &user, false);
        assert_eq!(stmt.sql, "INSERT INTO users (id, name, email) VALUES ($1, $2, $3)");
        assert_eq!(stmt.params[0], Value::Int(7));
    }

    #[test]
    fn test_insert_batch() {
        let users = vec![
            User {
                id: 0,
                name: "a".into(),
                email: "a@x".into(),
            },
            User {
                id: 0,
                name: "b".into(),
                email: "b@x".into(),
            },
        ];
        let stmt = insert_batch(Dialect::Postgres, &users);
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (name, email) VALUES ($1, $2), ($3, $4)"
        );
        assert_eq!(stmt.params.len(), 4);
    }

    #[test]
    fn test_update_by_id() {
        let user = User {
            id: 3,
            name: "a".into(),
            email: "a@b.com".into(),
        };
        let stmt = update(Dialect::Sqlite, &user);
        assert_eq!(stmt.sql, "UPDATE users SET name = ?, email = ? WHERE id = ?");
        assert_eq!(stmt.params[2], Value::Int(3));
    }

    #[test]
    fn test_delete_hard() {
        let user = User {
            id: 3,
            name: "a".into(),
            email: "a@b.com".into(),
        };
        let stmt = delete(Dialect::Sqlite, &user);
        assert_eq!(stmt.sql, "DELETE FROM users WHERE id = ?");
        assert_eq!(stmt.params, vec![Value::Int(3)]);
    }

    #[test]
    fn test_delete_soft_marks_row() {
        let post = Post {
            id: 5,
            title: "t".into(),
            deleted_at: None,
        };
        let stmt = delete(Dialect::Sqlite, &post);
        assert_eq!(
            stmt.sql,
            "UPDATE posts SET deleted_at = CURRENT_TIMESTAMP WHERE id = ? AND deleted_at IS NULL"
        );
    }
}
