//! Material table validation.

use thiserror::Error;

use super::key::MaterialKey;
use super::table::MaterialTable;

/// Errors that can occur when validating a [`MaterialTable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialTableError {
    #[error("Material name for '{key}' is empty")]
    EmptyName { key: MaterialKey },

    #[error("Material name for '{key}' has leading or trailing whitespace: {name:?}")]
    PaddedName { key: MaterialKey, name: String },
}

/// Check a single material name.
pub fn validate_name(key: MaterialKey, name: &str) -> Result<(), MaterialTableError> {
    if name.is_empty() {
        return Err(MaterialTableError::EmptyName { key });
    }

    if name.trim() != name {
        return Err(MaterialTableError::PaddedName {
            key,
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Check every entry of a table, reporting the first problem in key order.
pub fn validate_table(table: &MaterialTable) -> Result<(), MaterialTableError> {
    for (key, name) in table.iter() {
        validate_name(key, name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name(MaterialKey::Red, "id231_stn_03").is_ok());
        assert!(validate_name(MaterialKey::Red, "stone wall").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            validate_name(MaterialKey::Green, ""),
            Err(MaterialTableError::EmptyName {
                key: MaterialKey::Green
            })
        );
    }

    #[test]
    fn test_padded_name() {
        assert!(matches!(
            validate_name(MaterialKey::Blue, " sand"),
            Err(MaterialTableError::PaddedName { .. })
        ));
    }
}
