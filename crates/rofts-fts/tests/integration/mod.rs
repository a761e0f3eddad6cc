mod fallback;
mod reindex;
mod resilience;
mod scenario;
mod stopwords;
