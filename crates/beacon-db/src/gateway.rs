//! `CitationGateway` implementation backed by the libSQL store.

use beacon_core::entities::{Alert, Citation, NewAlert, UserSettings};
use beacon_core::errors::GatewayError;
use beacon_core::gateway::{AlertUpdate, CitationFilter, CitationGateway};
use beacon_core::identity::AuthIdentity;
use beacon_core::subscription::{AlertSubscription, CitationSubscription};

use crate::service::BeaconStore;

impl CitationGateway for BeaconStore {
    async fn query_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<Vec<Citation>, GatewayError> {
        Ok(Self::query_citations(self, user, filter).await?)
    }

    async fn count_citations(
        &self,
        user: &AuthIdentity,
        filter: &CitationFilter,
    ) -> Result<u64, GatewayError> {
        Ok(Self::count_citations(self, user, filter).await?)
    }

    async fn list_alerts(
        &self,
        user: &AuthIdentity,
        limit: u32,
    ) -> Result<Vec<Alert>, GatewayError> {
        Ok(Self::list_alerts(self, user, limit).await?)
    }

    async fn insert_alert(
        &self,
        user: &AuthIdentity,
        alert: &NewAlert,
    ) -> Result<Alert, GatewayError> {
        Ok(self.create_alert(user, alert).await?)
    }

    async fn update_alert(
        &self,
        user: &AuthIdentity,
        alert_id: &str,
        update: &AlertUpdate,
    ) -> Result<(), GatewayError> {
        Self::update_alert(self, user, alert_id, update).await?;
        Ok(())
    }

    async fn delete_alert(&self, user: &AuthIdentity, alert_id: &str) -> Result<(), GatewayError> {
        Self::delete_alert(self, user, alert_id).await?;
        Ok(())
    }

    fn subscribe_alerts(&self, user: &AuthIdentity) -> AlertSubscription {
        Self::subscribe_alerts(self, user)
    }

    fn subscribe_citations(&self, user: &AuthIdentity) -> CitationSubscription {
        Self::subscribe_citations(self, user)
    }

    async fn get_user_settings(
        &self,
        user: &AuthIdentity,
    ) -> Result<Option<UserSettings>, GatewayError> {
        Ok(self.get_settings(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use beacon_core::enums::{Engine, Severity};

    use super::*;
    use crate::test_support::helpers::{new_alert, new_citation, test_store, user};

    async fn unread_through<G: CitationGateway>(gateway: &G, user: &AuthIdentity) -> usize {
        gateway
            .list_alerts(user, 50)
            .await
            .unwrap()
            .iter()
            .filter(|a| !a.is_read)
            .count()
    }

    #[tokio::test]
    async fn alert_lifecycle_through_gateway() {
        let store = test_store().await;
        let alice = user("alice");

        let alert = CitationGateway::insert_alert(
            &store,
            &alice,
            &new_alert("competitor_gain", Severity::High),
        )
        .await
        .unwrap();
        assert_eq!(unread_through(&store, &alice).await, 1);

        CitationGateway::update_alert(&store, &alice, &alert.id, &AlertUpdate::mark_read())
            .await
            .unwrap();
        assert_eq!(unread_through(&store, &alice).await, 0);

        CitationGateway::delete_alert(&store, &alice, &alert.id)
            .await
            .unwrap();
        CitationGateway::delete_alert(&store, &alice, &alert.id)
            .await
            .unwrap();
        assert!(
            CitationGateway::list_alerts(&store, &alice, 50)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn validation_failure_surfaces_as_invalid_request() {
        let store = test_store().await;
        let err = CitationGateway::insert_alert(&store, &user("alice"), &new_alert(" ", Severity::Low))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn citation_reads_through_gateway() {
        let store = test_store().await;
        let alice = user("alice");
        store
            .record_citation(&alice, &new_citation(Engine::Claude, "Acme", "q", true))
            .await
            .unwrap();

        let citations =
            CitationGateway::query_citations(&store, &alice, &CitationFilter::competitors())
                .await
                .unwrap();
        assert_eq!(citations.len(), 1);
        let own = CitationGateway::count_citations(&store, &alice, &CitationFilter::own_for_query("q"))
            .await
            .unwrap();
        assert_eq!(own, 0);
        assert!(
            CitationGateway::get_user_settings(&store, &alice)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn gateway_subscription_receives_inserts() {
        let store = test_store().await;
        let alice = user("alice");
        let mut sub = CitationGateway::subscribe_alerts(&store, &alice);
        assert_eq!(store.subscriber_count(), 1);

        let alert = store
            .create_alert(&alice, &new_alert("share_drop", Severity::Medium))
            .await
            .unwrap();
        assert_eq!(sub.recv().await.unwrap().id, alert.id);

        sub.close();
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn gateway_citation_subscription_receives_recorded_citations() {
        let store = test_store().await;
        let alice = user("alice");
        let mut sub = CitationGateway::subscribe_citations(&store, &alice);

        let recorded = store
            .record_citation(&alice, &new_citation(Engine::Chatgpt, "Beacon", "q", false))
            .await
            .unwrap();
        assert_eq!(sub.recv().await.unwrap(), recorded);

        sub.close();
        assert_eq!(store.citation_subscriber_count(), 0);
    }
}
