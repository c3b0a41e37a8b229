//! Synthetic corpora for the `permdiff` benchmarks.
//!
//! Each corpus describes a pair of profiles with a given number of entries
//! per keyed section and a fraction of entries that differ. The XML is
//! generated on demand, so the benches carry no fixture files.
//!
//! # Examples
//!
//! ```
//! use permdiff_benches::available_corpora;
//!
//! let corpus = available_corpora().iter().find(|c| c.name() == "small").unwrap();
//! let dataset = corpus.load().unwrap();
//! assert!(dataset.compare().has_differences());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fmt::Write as _;

use permdiff_core::{compare_documents, ComparisonReport, Document, LoadError};

const SECTIONS: [(&str, &str); 4] = [
    ("userPermissions", "name"),
    ("fieldPermissions", "field"),
    ("objectPermissions", "object"),
    ("classAccesses", "apexClass"),
];

/// A generated profile pair.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    entries: usize,
    change_every: usize,
}

static CORPORA: [Corpus; 3] = [
    Corpus { name: "small", entries: 20, change_every: 5 },
    Corpus { name: "medium", entries: 500, change_every: 10 },
    Corpus { name: "large", entries: 5_000, change_every: 50 },
];

/// Returns every registered corpus, smallest first.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

impl Corpus {
    /// Corpus name used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entries generated per keyed section.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Generates the XML text of both profiles.
    #[must_use]
    pub fn xml(&self) -> (String, String) {
        (self.profile(false), self.profile(true))
    }

    /// Generates and parses both profiles.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        let (lhs, rhs) = self.xml();
        Ok(Dataset {
            bytes: lhs.len() + rhs.len(),
            lhs: Document::parse_str(&lhs)?.with_label(format!("{}-a", self.name)),
            rhs: Document::parse_str(&rhs)?.with_label(format!("{}-b", self.name)),
        })
    }

    fn profile(&self, changed: bool) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Profile xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n",
        );
        for (section, key) in SECTIONS {
            for index in 0..self.entries {
                let marked = changed && index % self.change_every == 0;
                // Shift the key range on the changed side so both exclusive buckets fill up.
                let id = if changed && index % (self.change_every * 2) == 1 {
                    index + self.entries
                } else {
                    index
                };
                let _ = write!(
                    xml,
                    "    <{section}>\n        <enabled>{}</enabled>\n        <{key}>Item{id:05}</{key}>\n    </{section}>\n",
                    !marked
                );
            }
        }
        xml.push_str("    <custom>false</custom>\n</Profile>\n");
        xml
    }
}

/// A parsed corpus.
#[derive(Clone, Debug)]
pub struct Dataset {
    lhs: Document,
    rhs: Document,
    bytes: usize,
}

impl Dataset {
    /// Left-hand profile.
    #[must_use]
    pub fn lhs(&self) -> &Document {
        &self.lhs
    }

    /// Right-hand profile.
    #[must_use]
    pub fn rhs(&self) -> &Document {
        &self.rhs
    }

    /// Combined size of both XML texts.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Compares the two profiles.
    #[must_use]
    pub fn compare(&self) -> ComparisonReport {
        compare_documents(&self.lhs, &self.rhs)
    }
}
