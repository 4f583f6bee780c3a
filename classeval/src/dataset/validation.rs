use std::path::Path;

use serde::{Deserialize, Serialize};

use super::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub image: String,
    pub class_id: usize,
}

/// Image identifiers with their ground-truth class ids, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSet {
    pub entries: Vec<ValidationEntry>,
}

impl ValidationSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Splits into the image-name and ground-truth sequences, index aligned.
    pub fn into_parts(self) -> (Vec<String>, Vec<usize>) {
        self.entries
            .into_iter()
            .map(|entry| (entry.image, entry.class_id))
            .unzip()
    }
}

/// Parses `<image> <class id>` records, one per line. Blank lines are
/// ignored; anything else that is not exactly two fields is an error.
pub fn parse_validation_list(text: &str) -> Result<ValidationSet, LoadError> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [image, class_id] => {
                let class_id = class_id.parse::<usize>().map_err(|_| {
                    LoadError::InvalidClassId {
                        line: line_number,
                        value: class_id.to_string(),
                    }
                })?;
                entries.push(ValidationEntry {
                    image: image.to_string(),
                    class_id,
                });
            },
            _ => {
                return Err(LoadError::MalformedLine {
                    line: line_number,
                    content: line.to_string(),
                });
            },
        }
    }

    Ok(ValidationSet {
        entries,
    })
}

pub fn load_validation_list(path: &Path) -> Result<ValidationSet, LoadError> {
    let text =
        std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_validation_list(&text)
}
