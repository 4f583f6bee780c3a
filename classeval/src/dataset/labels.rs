use std::path::Path;

use super::LoadError;

/// Human readable class names; the position of a name is its class id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLabels {
    labels: Vec<String>,
}

impl ClassLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(
        &self,
        class_id: usize,
    ) -> Option<&str> {
        self.labels.get(class_id).map(String::as_str)
    }

    /// Label text, or `class_<id>` for ids past the end of the list.
    pub fn name(
        &self,
        class_id: usize,
    ) -> String {
        self.get(class_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("class_{}", class_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// One label per line. Blank lines are kept so ids stay aligned.
pub fn parse_class_labels(text: &str) -> ClassLabels {
    ClassLabels::new(text.lines())
}

pub fn load_class_labels(path: &Path) -> Result<ClassLabels, LoadError> {
    let text =
        std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_class_labels(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_labels_indexes_lines() {
        let labels = parse_class_labels("tench\r\ngoldfish\n\nshark\n");
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.get(0), Some("tench"));
        assert_eq!(labels.get(1), Some("goldfish"));
        assert_eq!(labels.get(2), Some(""));
        assert_eq!(labels.get(3), Some("shark"));
        assert_eq!(labels.get(4), None);
    }

    #[test]
    fn test_parse_class_labels_empty() {
        assert!(parse_class_labels("").is_empty());
    }

    #[test]
    fn test_load_class_labels_from_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("words.txt");
        std::fs::write(&path, "cat\ndog\n").unwrap();

        let labels = load_class_labels(&path).unwrap();
        assert_eq!(labels.iter().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn test_load_class_labels_missing_file() {
        let directory = tempfile::tempdir().unwrap();
        let result = load_class_labels(&directory.path().join("words.txt"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
