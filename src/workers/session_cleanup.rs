use chrono::Duration;

use crate::session::SessionRegistry;

pub async fn run(sessions: &SessionRegistry, max_idle: Duration) {
    tracing::debug!("session_cleanup: start");
    let evicted = sessions.evict_idle(max_idle).await;
    for summary in &evicted {
        tracing::debug!(
            session_id = %summary.session_id,
            shown = summary.shown,
            "session_cleanup: expired"
        );
    }
    tracing::info!(cleaned = evicted.len(), "session_cleanup: done");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::SchedulerConfig;
    use crate::store::operations::vocabularies::NewVocabulary;
    use crate::store::Store;

    #[tokio::test]
    async fn evicts_only_idle_sessions() {
        let store = Arc::new(Store::new());
        let vocabulary = store
            .create_vocabulary(
                9,
                &NewVocabulary {
                    name: "German".to_string(),
                    goal_language: "German".to_string(),
                    native_language: "English".to_string(),
                    goal_code: "de".to_string(),
                    native_code: "en".to_string(),
                    level: String::new(),
                },
            )
            .unwrap();
        let registry = SessionRegistry::new(store, SchedulerConfig::default());
        registry.start(9, vocabulary.id).await.unwrap();

        run(&registry, Duration::hours(1)).await;
        assert_eq!(registry.active_count().await, 1);

        run(&registry, Duration::seconds(-1)).await;
        assert_eq!(registry.active_count().await, 0);
    }
}
