//! Owned records handed to serialisers.
//!
//! Field names match the JSON bodies served by the HTTP layer, where a
//! search hit reports the chapter title under `chapter`.

use serde::{Deserialize, Serialize};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub language: String,
    pub filename: String,
    pub series: String,
    pub chapter: String,
    pub line: String,
}

/// A chapter as shown in the reader: title separate from the rest of the
/// body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterView {
    pub filename: String,
    pub series: String,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_record_json_shape() {
        let record = SearchRecord {
            language: "jp".to_string(),
            filename: "001.txt".to_string(),
            series: "seriesA".to_string(),
            chapter: "Title One".to_string(),
            line: "これはテストです".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["language"], "jp");
        assert_eq!(json["chapter"], "Title One");
        assert_eq!(json["line"], "これはテストです");
    }
}
