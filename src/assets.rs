//! Label vocabulary loading

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Read every line of a label file, in order.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let labels_error = |source| Error::Labels {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(labels_error)?;
    parse_labels(BufReader::new(file)).map_err(labels_error)
}

/// Split a label resource into lines. A trailing newline does not add an entry.
pub fn parse_labels<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    reader.lines().collect()
}
