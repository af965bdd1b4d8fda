use super::TableDef;
use crate::{Error, Result};

use std::collections::HashSet;

/// Returns `true` for plain SQL identifiers: an ASCII letter or `_` followed
/// by ASCII letters, digits or `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TableDef {
    /// Checks the definition before it is used to build statements.
    pub fn verify(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(Error::invalid_schema(format!(
                "table name `{}` is not a valid identifier",
                self.name
            )));
        }

        if self.columns.is_empty() {
            return Err(Error::invalid_table(&self.name, "no columns declared"));
        }

        if self.endpoints.is_empty() {
            return Err(Error::invalid_table(&self.name, "no endpoints declared"));
        }

        if self.port == 0 {
            return Err(Error::invalid_table(&self.name, "port 0 is not usable"));
        }

        let mut seen = HashSet::new();

        for column in &self.columns {
            if !is_identifier(&column.name) {
                return Err(Error::invalid_table(
                    &self.name,
                    format!("column name `{}` is not a valid identifier", column.name),
                ));
            }

            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_table(
                    &self.name,
                    format!("duplicate column `{}`", column.name),
                ));
            }

            if column.auto_increment {
                self.verify_auto_increment(column)?;
            }
        }

        Ok(())
    }

    fn verify_auto_increment(&self, column: &super::Column) -> Result<()> {
        let single = self
            .single_primary_key()
            .is_some_and(|pk| pk.name == column.name);

        if !single || column.ty != super::ColumnType::Integer {
            return Err(Error::invalid_table(
                &self.name,
                format!(
                    "auto_increment column `{}` must be the only primary key and an INTEGER",
                    column.name
                ),
            ));
        }

        Ok(())
    }
}
