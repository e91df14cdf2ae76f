use dnsprofiler_domain::config::ClassificationConfig;
use dnsprofiler_domain::Classification;
use hickory_proto::op::Message;

/// Tags requests as internal or external by the suffix of the first question.
///
/// Matching is case-insensitive and label aligned: suffix `bosh.` matches
/// `db.bosh.` and `bosh.` but not `notbosh.`. A message without questions
/// gets no classification.
#[derive(Debug, Clone)]
pub struct SuffixClassifier {
    internal_suffixes: Vec<String>,
}

impl SuffixClassifier {
    pub fn new<I, S>(internal_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let internal_suffixes = internal_domains
            .into_iter()
            .map(|d| normalize(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { internal_suffixes }
    }

    pub fn from_config(config: &ClassificationConfig) -> Self {
        Self::new(&config.internal_domains)
    }

    pub fn classify(&self, message: &Message) -> Option<Classification> {
        let query = message.queries().first()?;
        Some(self.classify_name(&query.name().to_string()))
    }

    pub fn classify_name(&self, name: &str) -> Classification {
        let name = normalize(name);
        let internal = self
            .internal_suffixes
            .iter()
            .any(|suffix| name == *suffix || name.ends_with(&format!(".{}", suffix)));

        if internal {
            Classification::Internal
        } else {
            Classification::External
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
