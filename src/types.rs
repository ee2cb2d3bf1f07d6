use std::path::PathBuf;

pub(crate) const FROM: &str = "from";
pub(crate) const TO: &str = "to";
pub(crate) const SEQ: &str = "seq";

/// One parsed track-list line: placeholder name to captured value, in
/// template order, followed by the generated `seq` and a backfilled `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    fields: Vec<(String, String)>,
}

impl TrackRecord {
    pub(crate) fn from_pairs<'n, 'v>(
        pairs: impl IntoIterator<Item = (&'n str, &'v str)>,
    ) -> Self {
        let mut record = Self::default();
        for (name, value) in pairs {
            // An empty `to` capture means the line carried no end time.
            if name == TO && value.is_empty() {
                continue;
            }
            record.set(name, value);
        }
        record
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The raw `from` value.
    pub fn start(&self) -> &str {
        self.get(FROM).unwrap_or_default()
    }

    /// The raw `to` value, captured or backfilled.
    pub fn end(&self) -> Option<&str> {
        self.get(TO)
    }

    pub fn seq(&self) -> &str {
        self.get(SEQ).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub(crate) fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }
}

/// A single planned `ffmpeg` cut.
#[derive(Debug, Clone)]
pub(crate) struct TrackJob {
    pub(crate) seq: String,
    pub(crate) from: String,
    pub(crate) to: Option<String>,
    pub(crate) output_path: PathBuf,
}
