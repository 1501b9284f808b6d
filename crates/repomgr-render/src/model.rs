use repomgr_types::Verdict;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRepo {
    pub name: String,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: Verdict,
    pub repos: Vec<RenderableRepo>,
}

impl RenderableReport {
    pub fn warnings_total(&self) -> usize {
        self.repos.iter().map(|r| r.warnings.len()).sum()
    }

    /// `(repo name, warning)` pairs in report order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.repos.iter().flat_map(|repo| {
            repo.warnings
                .iter()
                .map(move |w| (repo.name.as_str(), w.as_str()))
        })
    }
}
