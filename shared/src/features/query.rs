use domain::ScrapeError;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Success { data: T },
    Error { error: ScrapeError },
}

impl<T> std::default::Default for QueryState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> QueryState<T> {
    pub fn get_data(&self) -> Option<&T> {
        match &self {
            QueryState::Success { data } => Some(data),
            QueryState::Loading | QueryState::Error { .. } => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> From<Result<T, ScrapeError>> for QueryState<T> {
    fn from(value: Result<T, ScrapeError>) -> Self {
        match value {
            Ok(data) => Self::Success { data },
            Err(error) => Self::Error { error },
        }
    }
}
